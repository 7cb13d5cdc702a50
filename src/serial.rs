use core::fmt;
use spin::Mutex;
use crate::constants::serial::COM1;
use crate::port::{HardwarePorts, PortIo};

// register offsets from the port base
const DATA_REG: u16 = 0;
const INT_EN_REG: u16 = 1;
const FIFO_REG: u16 = 2;
const LINE_CTRL_REG: u16 = 3;
const MODEM_CTRL_REG: u16 = 4;
const LINE_STATUS_REG: u16 = 5;

const TRANSMIT_EMPTY: u8 = 0x20;

/// 16550 UART, write-only.
pub struct SerialPort<P: PortIo> {
    base: u16,
    ports: P,
}

impl<P: PortIo> SerialPort<P> {
    pub const fn new(base: u16, ports: P) -> Self {
        SerialPort { base, ports }
    }

    /// 115200 baud, 8N1, FIFO on, interrupts off.
    pub fn init(&mut self) {
        self.ports.write_byte(self.base + INT_EN_REG, 0x00);
        self.ports.write_byte(self.base + LINE_CTRL_REG, 0x80); // DLAB
        self.ports.write_byte(self.base + DATA_REG, 0x01); // divisor low
        self.ports.write_byte(self.base + INT_EN_REG, 0x00); // divisor high
        self.ports.write_byte(self.base + LINE_CTRL_REG, 0x03);
        self.ports.write_byte(self.base + FIFO_REG, 0xC7);
        self.ports.write_byte(self.base + MODEM_CTRL_REG, 0x03);
    }

    pub fn write_byte(&mut self, byte: u8) {
        while self.ports.read_byte(self.base + LINE_STATUS_REG) & TRANSMIT_EMPTY == 0 {
            core::hint::spin_loop();
        }
        self.ports.write_byte(self.base + DATA_REG, byte);
    }
}

impl<P: PortIo> fmt::Write for SerialPort<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}

pub static SERIAL1: Mutex<SerialPort<HardwarePorts>> =
    Mutex::new(SerialPort::new(COM1, unsafe { HardwarePorts::new() }));
