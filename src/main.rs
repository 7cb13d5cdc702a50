#![no_std]
#![no_main]
#![feature(abi_x86_interrupt)]

mod art;
mod interrupts;
mod shell;

use core::panic::PanicInfo;
use quarkos::constants;
use quarkos::{logger, println, try_println, vga_buffer};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("{}", info);
    try_println!("{}", info);
    loop {
        x86_64::instructions::hlt();
    }
}

#[no_mangle]
pub extern "C" fn _start() -> ! {
    let logger_ready = logger::init(constants::log::LEVEL).is_ok();
    log::info!("starting QuarkOS");

    // exception handlers only; input is polled, no sti
    interrupts::init();

    vga_buffer::clear_screen();
    if !logger_ready {
        println!("WARNING: serial logger unavailable");
    }

    art::print_rick_and_morty();
    println!("Welcome to QuarkOS v1.0");
    log::info!("console ready");

    shell::run()
}
