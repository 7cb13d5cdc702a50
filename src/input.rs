use core::str;
use spin::Mutex;
use crate::keyboard::{CharSource, KEYBOARD};
use crate::port::PortIo;
use crate::vga_buffer::{ColorCode, Writer, WRITER};

const BACKSPACE: u8 = 0x08;

/// Where the line editor echoes what was typed.
pub trait Echo {
    fn echo(&mut self, byte: u8, color: ColorCode);
}

impl<P: PortIo> Echo for Writer<P> {
    fn echo(&mut self, byte: u8, color: ColorCode) {
        self.put_char(byte, color);
    }
}

/// Echoes through the global writer, holding its lock for one byte at a
/// time so a fault handler can still print while input is pending.
pub struct ScreenEcho;

impl Echo for ScreenEcho {
    fn echo(&mut self, byte: u8, color: ColorCode) {
        WRITER.lock().put_char(byte, color);
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditorStats {
    pub dropped_chars: u32,
    pub ignored_backspaces: u32,
}

#[derive(Debug, Default)]
pub struct LineEditor {
    stats: EditorStats,
}

impl LineEditor {
    pub const fn new() -> Self {
        LineEditor {
            stats: EditorStats {
                dropped_chars: 0,
                ignored_backspaces: 0,
            },
        }
    }

    pub fn stats(&self) -> EditorStats {
        self.stats
    }

    /// Reads one line into `buffer`, NUL-terminated, and returns its length.
    ///
    /// Blocks until newline. At most `buffer.len() - 1` characters are kept;
    /// anything typed beyond that is dropped until backspace makes room.
    /// Echo always uses the default color.
    pub fn read_line<S, E>(&mut self, source: &mut S, echo: &mut E, buffer: &mut [u8]) -> usize
    where
        S: CharSource,
        E: Echo,
    {
        let limit = buffer.len().saturating_sub(1);
        let mut index = 0;

        loop {
            match source.read_character() {
                b'\n' => {
                    if let Some(slot) = buffer.get_mut(index) {
                        *slot = 0;
                    }
                    echo.echo(b'\n', ColorCode::DEFAULT);
                    return index;
                }
                BACKSPACE => {
                    if index > 0 {
                        index -= 1;
                        echo.echo(BACKSPACE, ColorCode::DEFAULT);
                    } else {
                        self.stats.ignored_backspaces += 1;
                    }
                }
                c if index < limit => {
                    buffer[index] = c;
                    index += 1;
                    echo.echo(c, ColorCode::DEFAULT);
                }
                c => {
                    self.stats.dropped_chars += 1;
                    log::debug!("line buffer full, dropping {:#04x}", c);
                }
            }
        }
    }
}

/// Text of a NUL-terminated line; empty if it is not valid UTF-8.
pub fn line_str(buffer: &[u8]) -> &str {
    let len = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    str::from_utf8(&buffer[..len]).unwrap_or("")
}

static LINE_EDITOR: Mutex<LineEditor> = Mutex::new(LineEditor::new());

/// Line input from the hardware keyboard, echoed to the screen.
pub fn read_line(buffer: &mut [u8]) -> usize {
    let mut keyboard = KEYBOARD.lock();
    LINE_EDITOR.lock().read_line(&mut *keyboard, &mut ScreenEcho, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    const ENTER: u8 = 0x1C;
    const BKSP: u8 = 0x0E;

    /// Press-and-release scan codes for a run of lowercase letters.
    fn typed(text: &[u8]) -> Vec<u8> {
        let mut codes = Vec::new();
        for &c in text {
            let code = match c {
                b'a' => 0x1E,
                b'b' => 0x30,
                b'c' => 0x2E,
                b'd' => 0x20,
                _ => panic!("no scan code for {}", c as char),
            };
            codes.push(code);
            codes.push(code | 0x80);
        }
        codes
    }

    /// Records echoes instead of drawing them.
    #[derive(Default)]
    struct Recorder(Vec<(u8, ColorCode)>);

    impl Echo for Recorder {
        fn echo(&mut self, byte: u8, color: ColorCode) {
            self.0.push((byte, color));
        }
    }

    #[test]
    fn backspace_removes_previous_character() {
        let mut codes = typed(b"ab");
        codes.push(BKSP);
        codes.extend(typed(b"c"));
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut screen = testing::writer();
        let mut buffer = [0xffu8; 10];

        let len = LineEditor::new().read_line(&mut kbd, &mut screen, &mut buffer);

        assert_eq!(len, 2);
        assert_eq!(line_str(&buffer), "ac");
        assert_eq!(buffer[2], 0);
        // "ac" on screen, cursor at the start of the next row
        assert_eq!(screen.cell(0).unwrap().ascii_character, b'a');
        assert_eq!(screen.cell(2).unwrap().ascii_character, b'c');
        assert_eq!(screen.cursor(), crate::constants::vga::ROW_BYTES);
    }

    #[test]
    fn full_buffer_drops_extra_characters() {
        let mut codes = typed(b"abcd");
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut echo = Recorder::default();
        let mut editor = LineEditor::new();
        let mut buffer = [0xffu8; 3];

        let len = editor.read_line(&mut kbd, &mut echo, &mut buffer);

        assert_eq!(len, 2);
        assert_eq!(buffer, [b'a', b'b', 0]);
        assert_eq!(editor.stats().dropped_chars, 2);
        let echoed: Vec<u8> = echo.0.iter().map(|&(b, _)| b).collect();
        assert_eq!(echoed, b"ab\n");
    }

    #[test]
    fn backspace_on_empty_line_is_silent() {
        let mut codes = std::vec![BKSP, BKSP];
        codes.extend(typed(b"d"));
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut echo = Recorder::default();
        let mut editor = LineEditor::new();
        let mut buffer = [0u8; 8];

        let len = editor.read_line(&mut kbd, &mut echo, &mut buffer);

        assert_eq!(len, 1);
        assert_eq!(line_str(&buffer), "d");
        assert_eq!(editor.stats().ignored_backspaces, 2);
        assert_eq!(echo.0.len(), 2);
    }

    #[test]
    fn backspace_makes_room_in_full_buffer() {
        let mut codes = typed(b"abc");
        codes.push(BKSP);
        codes.extend(typed(b"d"));
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut buffer = [0u8; 3];

        LineEditor::new().read_line(&mut kbd, &mut Recorder::default(), &mut buffer);

        assert_eq!(line_str(&buffer), "ad");
    }

    #[test]
    fn capacity_one_yields_empty_line() {
        let mut codes = typed(b"ab");
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut echo = Recorder::default();
        let mut buffer = [0xffu8; 1];

        let len = LineEditor::new().read_line(&mut kbd, &mut echo, &mut buffer);

        assert_eq!(len, 0);
        assert_eq!(buffer, [0]);
        assert_eq!(echo.0, [(b'\n', ColorCode::DEFAULT)]);
    }

    #[test]
    fn zero_capacity_consumes_line_without_writing() {
        let mut codes = typed(b"a");
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut buffer: [u8; 0] = [];

        let len = LineEditor::new().read_line(&mut kbd, &mut Recorder::default(), &mut buffer);

        assert_eq!(len, 0);
        assert_eq!(kbd.stats().ignored_scancodes, 1);
    }

    #[test]
    fn echo_uses_default_color_regardless_of_writer_color() {
        use crate::vga_buffer::Color;
        let mut codes = typed(b"a");
        codes.push(ENTER);
        let mut kbd = testing::keyboard(&codes);
        let mut screen = testing::writer();
        screen.set_color(ColorCode::new(Color::White, Color::Blue));
        let mut buffer = [0u8; 4];

        LineEditor::new().read_line(&mut kbd, &mut screen, &mut buffer);

        assert_eq!(screen.cell(0).unwrap().color_code, ColorCode::DEFAULT);
    }

    #[test]
    fn line_str_stops_at_terminator() {
        assert_eq!(line_str(b"root\0junk"), "root");
        assert_eq!(line_str(b"abc"), "abc");
        assert_eq!(line_str(&[0xff, 0]), "");
    }
}
