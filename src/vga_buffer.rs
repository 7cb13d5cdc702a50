use core::fmt;
use volatile::Volatile;
use spin::Mutex;
use lazy_static::lazy_static;
use crate::constants::vga::{
    BUFFER_ADDR, BUFFER_HEIGHT, BUFFER_WIDTH, CELL_BYTES, COMMAND_PORT, CURSOR_LOCATION_HIGH,
    CURSOR_LOCATION_LOW, DATA_PORT, DEFAULT_ATTRIBUTE, ROW_BYTES, SCREEN_BYTES,
};
use crate::port::{HardwarePorts, PortIo};

const BACKSPACE: u8 = 0x08;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Attribute byte: background in bits 4-7, foreground in bits 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const DEFAULT: ColorCode = ColorCode(DEFAULT_ATTRIBUTE);

    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    pub const fn from_raw(attribute: u8) -> ColorCode {
        ColorCode(attribute)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

impl ScreenChar {
    const BLANK: ScreenChar = ScreenChar {
        ascii_character: 0,
        color_code: ColorCode::DEFAULT,
    };
}

/// The memory-mapped text surface.
#[repr(transparent)]
pub struct Buffer {
    chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// Counters for input the controller swallowed instead of failing on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    pub scrolls: u32,
    pub ignored_backspaces: u32,
}

/// Display controller. Positions at its public surface are byte offsets
/// into the buffer (always even); the CRTC registers hold cell indices.
pub struct Writer<P: PortIo> {
    color_code: ColorCode,
    buffer: &'static mut Buffer,
    ports: P,
    stats: WriterStats,
}

impl<P: PortIo> Writer<P> {
    pub fn new(buffer: &'static mut Buffer, ports: P, color_code: ColorCode) -> Self {
        Writer {
            color_code,
            buffer,
            ports,
            stats: WriterStats::default(),
        }
    }

    pub fn put_char(&mut self, byte: u8, color: ColorCode) {
        let offset = self.cursor();

        match byte {
            b'\n' => {
                if offset / ROW_BYTES >= BUFFER_HEIGHT as u16 - 1 {
                    self.scroll();
                } else {
                    self.set_cursor(offset - offset % ROW_BYTES + ROW_BYTES);
                }
            }
            BACKSPACE => {
                if offset >= CELL_BYTES {
                    let previous = offset - CELL_BYTES;
                    self.write_cell(previous, ScreenChar {
                        ascii_character: b' ',
                        color_code: color,
                    });
                    self.set_cursor(previous);
                } else {
                    self.stats.ignored_backspaces += 1;
                }
            }
            _ => {
                let offset = if offset >= SCREEN_BYTES {
                    self.scroll();
                    self.cursor()
                } else {
                    offset
                };
                self.write_cell(offset, ScreenChar {
                    ascii_character: byte,
                    color_code: color,
                });
                self.set_cursor(offset + CELL_BYTES);
            }
        }
    }

    /// Shift every row up by one, blank the last row and park the cursor at
    /// its start. Rows are copied top to bottom so each source row is read
    /// before the row below overwrites it.
    pub fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let character = self.buffer.chars[row][col].read();
                self.buffer.chars[row - 1][col].write(character);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
        self.set_cursor(SCREEN_BYTES - ROW_BYTES);
        self.stats.scrolls += 1;
        log::trace!("scrolled display");
    }

    fn clear_row(&mut self, row: usize) {
        for col in 0..BUFFER_WIDTH {
            self.buffer.chars[row][col].write(ScreenChar::BLANK);
        }
    }

    pub fn clear_screen(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.set_cursor(0);
    }

    fn write_cell(&mut self, offset: u16, character: ScreenChar) {
        let cell = (offset / CELL_BYTES) as usize;
        self.buffer.chars[cell / BUFFER_WIDTH][cell % BUFFER_WIDTH].write(character);
    }

    /// Reads back the cell at a byte offset, `None` past the surface.
    pub fn cell(&self, offset: u16) -> Option<ScreenChar> {
        if offset >= SCREEN_BYTES {
            return None;
        }
        let cell = (offset / CELL_BYTES) as usize;
        Some(self.buffer.chars[cell / BUFFER_WIDTH][cell % BUFFER_WIDTH].read())
    }

    /// Current cursor as a byte offset, clamped to the end of the surface.
    pub fn cursor(&mut self) -> u16 {
        self.ports.write_byte(COMMAND_PORT, CURSOR_LOCATION_HIGH);
        let high = self.ports.read_byte(DATA_PORT);
        self.ports.write_byte(COMMAND_PORT, CURSOR_LOCATION_LOW);
        let low = self.ports.read_byte(DATA_PORT);
        u16::from_be_bytes([high, low]).min(SCREEN_BYTES / CELL_BYTES) * CELL_BYTES
    }

    pub fn set_cursor(&mut self, offset: u16) {
        let [high, low] = (offset / CELL_BYTES).to_be_bytes();
        self.ports.write_byte(COMMAND_PORT, CURSOR_LOCATION_HIGH);
        self.ports.write_byte(DATA_PORT, high);
        self.ports.write_byte(COMMAND_PORT, CURSOR_LOCATION_LOW);
        self.ports.write_byte(DATA_PORT, low);
    }

    pub fn color(&self) -> ColorCode {
        self.color_code
    }

    pub fn set_color(&mut self, color: ColorCode) {
        self.color_code = color;
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    pub fn write_string(&mut self, s: &str) {
        let color = self.color_code;
        for byte in s.bytes() {
            match byte {
                0x20..=0x7e | b'\n' | BACKSPACE => self.put_char(byte, color),
                _ => self.put_char(0xfe, color),
            }
        }
    }
}

lazy_static! {
    pub static ref WRITER: Mutex<Writer<HardwarePorts>> = Mutex::new(Writer::new(
        unsafe { &mut *(BUFFER_ADDR as *mut Buffer) },
        unsafe { HardwarePorts::new() },
        ColorCode::DEFAULT,
    ));
}

impl<P: PortIo> fmt::Write for Writer<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s);
        Ok(())
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::vga_buffer::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

/// Like `print!`, in the given `ColorCode` for this call only.
#[macro_export]
macro_rules! colored_print {
    ($color:expr, $($arg:tt)*) => (
        $crate::vga_buffer::_print_colored($color, format_args!($($arg)*))
    );
}

/// Like `println!`, but gives up instead of waiting on a held writer lock.
#[macro_export]
macro_rules! try_println {
    ($($arg:tt)*) => (
        $crate::vga_buffer::try_print(format_args!("{}\n", format_args!($($arg)*)))
    );
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    // write_str never fails
    let _ = WRITER.lock().write_fmt(args);
}

#[doc(hidden)]
pub fn _print_colored(color: ColorCode, args: fmt::Arguments) {
    use core::fmt::Write;
    let mut writer = WRITER.lock();
    let previous = writer.color();
    writer.set_color(color);
    let _ = writer.write_fmt(args);
    writer.set_color(previous);
}

/// Print if the writer is free. Fault and panic paths use this, since they
/// may have interrupted the code holding the lock. Returns whether it printed.
pub fn try_print(args: fmt::Arguments) -> bool {
    write_if_unlocked(&*WRITER, args)
}

fn write_if_unlocked<W: fmt::Write>(lock: &Mutex<W>, args: fmt::Arguments) -> bool {
    match lock.try_lock() {
        Some(mut writer) => {
            let _ = writer.write_fmt(args);
            true
        }
        None => false,
    }
}

/// helpers used by the shell
pub fn clear_screen() {
    WRITER.lock().clear_screen();
}

pub fn put_char(byte: u8, color: ColorCode) {
    WRITER.lock().put_char(byte, color);
}
