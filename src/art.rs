use quarkos::vga_buffer::{ColorCode, WRITER};
use quarkos::colored_print;

const COW_COLOR: ColorCode = ColorCode::from_raw(0x01);

const COW: &[&str] = &[
    "  ^__^\n",
    "  (oo)\\_______\n",
    "  (__)\\       )\\/\\\n",
    "      ||----w |\n",
    "      ||     ||\n",
];

/// Pixel-art portrait as (text, attribute) runs. Attributes repeat the
/// color in both nibbles, so every glyph renders as a solid block; '_'
/// marks a see-through gap drawn black on black.
const RICK_AND_MORTY: &[(&str, u8)] = &[
    ("__#_#_#\n", 0xbb),
    ("__#####____", 0xbb), ("#####\n", 0x66),
    ("__#", 0xbb), ("###", 0xff), ("#____", 0xbb), ("#", 0x66), ("###", 0xff), ("#\n", 0x66),
    ("__#", 0xff), ("#", 0x00), ("#", 0xff), ("#", 0x00), ("#____", 0xff), ("#", 0xff), ("#", 0x00), ("#", 0xff), ("#", 0x00), ("#\n", 0xff),
    ("__#", 0xff), ("#", 0x00), ("#", 0xff), ("#", 0x00), ("#____", 0xff), ("#", 0xff), ("#", 0x00), ("#", 0xff), ("#", 0x00), ("#\n", 0xff),
    ("__#####____", 0xff), ("#####\n", 0xff),
    ("___###_____", 0xff), ("_###_\n", 0xff),
    ("__##", 0x77), ("#", 0xbb), ("##____", 0x77), ("#####\n", 0xee),
    ("__##", 0x77), ("#", 0xbb), ("##____", 0x77), ("#", 0xff), ("###", 0xee), ("#\n", 0xff),
    ("__##", 0x77), ("#", 0xbb), ("##____", 0x77), ("#", 0xff), ("###", 0xee), ("#\n", 0xff),
    ("__#", 0xff), ("#", 0x77), ("#", 0xbb), ("#", 0x77), ("#____", 0xff), ("#", 0xff), ("###", 0xee), ("#\n", 0xff),
    ("___##", 0x99), ("#______", 0x77), ("###\n", 0x99),
    ("___#_#______#_#\n", 0x99),
];

pub fn print_cow() {
    for line in COW {
        colored_print!(COW_COLOR, "{}", line);
    }
}

pub fn print_rick_and_morty() {
    let mut writer = WRITER.lock();
    for &(text, attribute) in RICK_AND_MORTY {
        for byte in text.bytes() {
            let color = match byte {
                b'_' => ColorCode::from_raw(0x00),
                _ => ColorCode::from_raw(attribute),
            };
            writer.put_char(byte, color);
        }
    }
}
