use crate::constants::power::{SHUTDOWN_PORT, SHUTDOWN_VALUE};
use crate::port::{HardwarePorts, PortIo};

/// Asks the (virtual) chipset to power the machine off.
pub fn power_off<P: PortIo>(ports: &mut P) {
    ports.write_word(SHUTDOWN_PORT, SHUTDOWN_VALUE);
}

/// Power off, and halt forever on machines that ignore the request.
pub fn shutdown() -> ! {
    log::info!("powering off");
    let mut ports = unsafe { HardwarePorts::new() };
    power_off(&mut ports);

    loop {
        x86_64::instructions::hlt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePorts;

    #[test]
    fn power_off_writes_acpi_word() {
        let mut ports = FakePorts::new();
        power_off(&mut ports);
        assert_eq!(ports.word_writes, [(0x604, 0x2000)]);
    }
}
