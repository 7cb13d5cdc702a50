use x86_64::instructions::hlt;
use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame, PageFaultErrorCode};
use lazy_static::lazy_static;
use pic8259::ChainedPics;
use spin::Mutex;
use quarkos::constants::interrupts::{PIC_1_DATA, PIC_1_OFFSET, PIC_2_DATA, PIC_2_OFFSET};
use quarkos::port::{HardwarePorts, PortIo};
use quarkos::try_println;

/// Programmable Interrupt Controller (PIC) setup
pub static PICS: Mutex<ChainedPics> =
    Mutex::new(unsafe { ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET) });

lazy_static! {
    static ref IDT: InterruptDescriptorTable = {
        let mut idt = InterruptDescriptorTable::new();
        idt.breakpoint.set_handler_fn(breakpoint_handler);
        idt.double_fault.set_handler_fn(double_fault_handler);
        idt.page_fault.set_handler_fn(page_fault_handler);
        idt.general_protection_fault.set_handler_fn(general_protection_fault_handler);
        idt
    };
}

/// Install the exception handlers and park the PICs.
///
/// Input is polled, so interrupts stay disabled (no sti). The PICs are still
/// remapped past the exception vectors and fully masked, so a stray IRQ can
/// never be mistaken for a CPU fault.
pub fn init() {
    IDT.load();
    log::debug!("IDT loaded");

    unsafe {
        PICS.lock().initialize();
    }
    let mut ports = unsafe { HardwarePorts::new() };
    ports.write_byte(PIC_1_DATA, 0xff);
    ports.write_byte(PIC_2_DATA, 0xff);
    log::debug!(
        "PICs remapped to {}/{} and masked ({:#04x}, {:#04x})",
        PIC_1_OFFSET,
        PIC_2_OFFSET,
        ports.read_byte(PIC_1_DATA),
        ports.read_byte(PIC_2_DATA)
    );
}

fn halt_forever() -> ! {
    loop {
        hlt();
    }
}

extern "x86-interrupt" fn breakpoint_handler(stack_frame: InterruptStackFrame) {
    log::warn!("breakpoint at {:?}", stack_frame.instruction_pointer);
}

extern "x86-interrupt" fn double_fault_handler(
    stack_frame: InterruptStackFrame,
    _error_code: u64,
) -> ! {
    log::error!("double fault\n{:#?}", stack_frame);
    try_println!("EXCEPTION: DOUBLE FAULT - halting");
    halt_forever();
}

extern "x86-interrupt" fn page_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: PageFaultErrorCode,
) {
    use x86_64::registers::control::Cr2;

    log::error!("page fault at {:?}: {:?}", Cr2::read(), error_code);
    try_println!("EXCEPTION: PAGE FAULT");
    try_println!("Accessed Address: {:?}", Cr2::read());
    try_println!("Error Code: {:?}", error_code);
    try_println!("{:#?}", stack_frame);
    halt_forever();
}

extern "x86-interrupt" fn general_protection_fault_handler(
    stack_frame: InterruptStackFrame,
    error_code: u64,
) {
    log::error!("general protection fault, code {}", error_code);
    try_println!("EXCEPTION: GENERAL PROTECTION FAULT");
    try_println!("Error Code: {}", error_code);
    try_println!("{:#?}", stack_frame);
    halt_forever();
}
