use x86_64::instructions::port::Port;

/// Byte and word access to the 16-bit I/O port space.
///
/// Controllers are generic over this so the same driver code runs against
/// the real machine and against test doubles.
pub trait PortIo {
    fn read_byte(&mut self, port: u16) -> u8;
    fn write_byte(&mut self, port: u16, value: u8);
    fn read_word(&mut self, port: u16) -> u16;
    fn write_word(&mut self, port: u16, value: u16);
}

/// `in`/`out` instructions on the running CPU.
#[derive(Debug)]
pub struct HardwarePorts {
    _private: (),
}

impl HardwarePorts {
    /// # Safety
    ///
    /// Must run in ring 0, and the caller must be the only code driving the
    /// devices behind the ports it touches through this handle.
    pub const unsafe fn new() -> Self {
        HardwarePorts { _private: () }
    }
}

impl PortIo for HardwarePorts {
    fn read_byte(&mut self, port: u16) -> u8 {
        unsafe { Port::<u8>::new(port).read() }
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        unsafe { Port::<u8>::new(port).write(value) }
    }

    fn read_word(&mut self, port: u16) -> u16 {
        unsafe { Port::<u16>::new(port).read() }
    }

    fn write_word(&mut self, port: u16, value: u16) {
        unsafe { Port::<u16>::new(port).write(value) }
    }
}
