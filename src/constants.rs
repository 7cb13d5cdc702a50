/// System-wide constants to avoid magic numbers

/// VGA text mode constants
pub mod vga {
    /// VGA text buffer physical address
    pub const BUFFER_ADDR: usize = 0xb8000;

    /// VGA text mode dimensions
    pub const BUFFER_HEIGHT: usize = 25;
    pub const BUFFER_WIDTH: usize = 80;

    /// Bytes per cell: glyph + attribute
    pub const CELL_BYTES: u16 = 2;
    pub const ROW_BYTES: u16 = BUFFER_WIDTH as u16 * CELL_BYTES;
    pub const SCREEN_BYTES: u16 = BUFFER_HEIGHT as u16 * ROW_BYTES;

    /// VGA control ports
    pub const COMMAND_PORT: u16 = 0x3D4;
    pub const DATA_PORT: u16 = 0x3D5;

    /// Cursor control registers
    pub const CURSOR_LOCATION_HIGH: u8 = 0x0E;
    pub const CURSOR_LOCATION_LOW: u8 = 0x0F;

    /// Green on black, the console's default attribute
    pub const DEFAULT_ATTRIBUTE: u8 = 0x02;
}

/// PS/2 Keyboard controller constants
pub mod keyboard {
    /// PS/2 keyboard data port
    pub const DATA_PORT: u16 = 0x60;

    /// PS/2 keyboard status/command port
    pub const STATUS_COMMAND_PORT: u16 = 0x64;

    /// Status register bit flags
    pub const STATUS_OUTPUT_BUFFER_FULL: u8 = 0x01;

    /// Scan code set 1
    pub const RELEASE_BIT: u8 = 0x80;
    pub const LEFT_SHIFT: u8 = 0x2A;
    pub const RIGHT_SHIFT: u8 = 0x36;
    pub const SPACE: u8 = 0x39;
    pub const FIRST_PRINTABLE: u8 = 0x02;
    pub const LAST_PRINTABLE: u8 = 0x35;
}

/// ACPI power-off as wired up by QEMU
pub mod power {
    pub const SHUTDOWN_PORT: u16 = 0x604;
    pub const SHUTDOWN_VALUE: u16 = 0x2000;
}

/// Serial line used for diagnostics
pub mod serial {
    pub const COM1: u16 = 0x3F8;
}

/// Diagnostic verbosity
pub mod log {
    pub const LEVEL: ::log::LevelFilter = ::log::LevelFilter::Debug;
}

/// Interrupt constants
pub mod interrupts {
    /// PIC (Programmable Interrupt Controller) offset
    /// We remap PIC interrupts to start at 32 to avoid conflicts with CPU exceptions
    pub const PIC_1_OFFSET: u8 = 32;
    pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

    /// PIC data ports, used for the interrupt masks
    pub const PIC_1_DATA: u16 = 0x21;
    pub const PIC_2_DATA: u16 = 0xA1;
}
