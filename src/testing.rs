//! Fake hardware for host-side unit tests.

use std::collections::VecDeque;

use crate::constants;
use crate::keyboard::Keyboard;
use crate::port::PortIo;
use crate::vga_buffer::{Buffer, ColorCode, Writer};

const UART_LINE_STATUS: u16 = constants::serial::COM1 + 5;
const UART_TRANSMIT_EMPTY: u8 = 0x20;

/// Emulates the CRTC index/data pair, the PS/2 status/data pair fed from a
/// script, and an always-ready UART. Everything written is recorded.
///
/// Each keyboard script entry is one status poll: `None` reports no data,
/// `Some(code)` reports data and queues `code` for the next data read.
#[derive(Debug)]
pub struct FakePorts {
    crtc_index: u8,
    crtc: [u8; 256],
    script: VecDeque<Option<u8>>,
    data_reads: usize,
    pub byte_writes: Vec<(u16, u8)>,
    pub word_writes: Vec<(u16, u16)>,
}

impl FakePorts {
    pub fn new() -> Self {
        FakePorts {
            crtc_index: 0,
            crtc: [0; 256],
            script: VecDeque::new(),
            data_reads: 0,
            byte_writes: Vec::new(),
            word_writes: Vec::new(),
        }
    }

    pub fn with_scancodes(codes: &[u8]) -> Self {
        let mut ports = Self::new();
        ports.script.extend(codes.iter().map(|&code| Some(code)));
        ports
    }

    pub fn with_script(polls: &[Option<u8>]) -> Self {
        let mut ports = Self::new();
        ports.script.extend(polls.iter().copied());
        ports
    }

    pub fn crtc_register(&self, index: u8) -> u8 {
        self.crtc[index as usize]
    }

    pub fn pending_scancodes(&self) -> usize {
        self.script.len()
    }

    pub fn data_reads(&self) -> usize {
        self.data_reads
    }
}

impl PortIo for FakePorts {
    fn read_byte(&mut self, port: u16) -> u8 {
        match port {
            constants::vga::DATA_PORT => self.crtc[self.crtc_index as usize],
            constants::keyboard::STATUS_COMMAND_PORT => {
                // A test that polls past its script would otherwise spin forever.
                match self.script.front().copied() {
                    None => panic!("keyboard script exhausted"),
                    Some(None) => {
                        self.script.pop_front();
                        0
                    }
                    Some(Some(_)) => constants::keyboard::STATUS_OUTPUT_BUFFER_FULL,
                }
            }
            constants::keyboard::DATA_PORT => {
                self.data_reads += 1;
                self.script.pop_front().flatten().unwrap_or(0)
            }
            UART_LINE_STATUS => UART_TRANSMIT_EMPTY,
            _ => 0,
        }
    }

    fn write_byte(&mut self, port: u16, value: u8) {
        match port {
            constants::vga::COMMAND_PORT => self.crtc_index = value,
            constants::vga::DATA_PORT => self.crtc[self.crtc_index as usize] = value,
            _ => {}
        }
        self.byte_writes.push((port, value));
    }

    fn read_word(&mut self, _port: u16) -> u16 {
        0
    }

    fn write_word(&mut self, port: u16, value: u16) {
        self.word_writes.push((port, value));
    }
}

/// A zeroed display surface living for the rest of the test process.
pub fn surface() -> &'static mut Buffer {
    let bytes = Box::leak(Box::new([0u8; constants::vga::SCREEN_BYTES as usize]));
    // Buffer is a transparent grid of 2-byte, align-1 cells.
    unsafe { &mut *(bytes.as_mut_ptr() as *mut Buffer) }
}

pub fn writer() -> Writer<FakePorts> {
    let mut writer = Writer::new(surface(), FakePorts::new(), ColorCode::DEFAULT);
    writer.clear_screen();
    writer
}

pub fn keyboard(codes: &[u8]) -> Keyboard<FakePorts> {
    Keyboard::new(FakePorts::with_scancodes(codes))
}
