use spin::Mutex;
use crate::constants::keyboard::{
    DATA_PORT, FIRST_PRINTABLE, LAST_PRINTABLE, LEFT_SHIFT, RELEASE_BIT, RIGHT_SHIFT, SPACE,
    STATUS_COMMAND_PORT, STATUS_OUTPUT_BUFFER_FULL,
};
use crate::port::{HardwarePorts, PortIo};

const TABLE_LEN: usize = LAST_PRINTABLE as usize + 1;

/// Builds a scan code table from a US layout row dump, where a NUL byte
/// marks a key that produces no character.
const fn layout(raw: &[u8; TABLE_LEN]) -> [Option<u8>; TABLE_LEN] {
    let mut table = [None; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        if raw[i] != 0 {
            table[i] = Some(raw[i]);
        }
        i += 1;
    }
    table
}

static UNSHIFTED: [Option<u8>; TABLE_LEN] =
    layout(b"\0\x001234567890-=\x08\0qwertyuiop[]\n\x08asdfghjkl;'`\0\\zxcvbnm,./");

static SHIFTED: [Option<u8>; TABLE_LEN] =
    layout(b"\0\0!@#$%^&*()_+\x08\0QWERTYUIOP{}\n\0ASDFGHJKL:\"~\0|ZXCVBNM<>?");

/// Anything that blocks until a key press yields a character.
pub trait CharSource {
    fn read_character(&mut self) -> u8;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardStats {
    /// Scan codes read that produced no character.
    pub ignored_scancodes: u32,
}

/// Polled PS/2 keyboard speaking scan code set 1.
pub struct Keyboard<P: PortIo> {
    ports: P,
    shift_pressed: bool,
    stats: KeyboardStats,
}

impl<P: PortIo> Keyboard<P> {
    pub const fn new(ports: P) -> Self {
        Keyboard {
            ports,
            shift_pressed: false,
            stats: KeyboardStats { ignored_scancodes: 0 },
        }
    }

    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    pub fn stats(&self) -> KeyboardStats {
        self.stats
    }

    /// Maps one raw scan code to a character. Shift make/break codes only
    /// update the modifier state; releases and unknown keys map to nothing.
    pub fn translate(&mut self, scancode: u8) -> Option<u8> {
        let released = scancode & RELEASE_BIT != 0;
        let base = scancode & !RELEASE_BIT;

        if base == LEFT_SHIFT || base == RIGHT_SHIFT {
            self.shift_pressed = !released;
            return None;
        }
        if released {
            return None;
        }

        match scancode {
            SPACE => Some(b' '),
            FIRST_PRINTABLE..=LAST_PRINTABLE => {
                let table = if self.shift_pressed { &SHIFTED } else { &UNSHIFTED };
                table[scancode as usize]
            }
            _ => None,
        }
    }

    /// One non-blocking attempt: reads a scan code if the controller has one.
    pub fn poll(&mut self) -> Option<u8> {
        let status = self.ports.read_byte(STATUS_COMMAND_PORT);
        if status & STATUS_OUTPUT_BUFFER_FULL == 0 {
            return None;
        }

        let scancode = self.ports.read_byte(DATA_PORT);
        match self.translate(scancode) {
            Some(c) if scancode & RELEASE_BIT == 0 => Some(c),
            _ => {
                self.stats.ignored_scancodes += 1;
                log::trace!("no character for scan code {:#04x}", scancode);
                None
            }
        }
    }
}

impl<P: PortIo> CharSource for Keyboard<P> {
    /// Busy-waits until a key press produces a character.
    fn read_character(&mut self) -> u8 {
        loop {
            if let Some(c) = self.poll() {
                return c;
            }
            core::hint::spin_loop();
        }
    }
}

pub static KEYBOARD: Mutex<Keyboard<HardwarePorts>> =
    Mutex::new(Keyboard::new(unsafe { HardwarePorts::new() }));
