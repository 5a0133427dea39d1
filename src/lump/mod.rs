mod parse;
mod repr;
mod write;

pub use parse::{parse_image, parse_mip_texture, read_raw, read_raw_file};

pub use repr::{Image, Lump, MipTexture, MipTextureHead};

pub use write::{encode_mip_texture, encode_picture};

/// Lump type tags stored in directory entries
pub mod kind {
    pub const NONE: u8 = 0x00;
    pub const LABEL: u8 = 0x01;
    /// Palettes and other opaque data
    pub const LUMP: u8 = 0x40;
    pub const QTEX: u8 = 0x41;
    pub const QPIC: u8 = 0x42;
    pub const SOUND: u8 = 0x43;
    pub const MIPTEX: u8 = 0x44;

    /// Human readable tag name for log output
    pub fn describe(kind: u8) -> &'static str {
        match kind {
            NONE => "none",
            LABEL => "label",
            LUMP => "lump",
            QTEX => "qtex",
            QPIC => "qpic",
            SOUND => "sound",
            MIPTEX => "miptex",
            _ => "unknown",
        }
    }
}

/// Compression tags stored in directory entries
pub mod compression {
    pub const NONE: u8 = 0x00;
}
