use std::ffi::{CString, IntoStringError};

use crate::common::{name_to_field, read_u32, slice_to_cstring, Name, NAME_LEN};
use crate::error::{Error, Result};
use crate::lump::kind;

/// Palette-indexed image, row-major from the top left.  Used on its own as a
/// QPIC and as each level of a mip texture.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Box<[u8]>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: impl Into<Box<[u8]>>) -> Result<Self> {
        let pixels = pixels.into();

        let pixel_ct = u64::from(width) * u64::from(height);

        if u64::try_from(pixels.len()).ok() != Some(pixel_ct) {
            return Err(Error::Parse(format!(
                "Pixel count {} != {width} * {height}",
                pixels.len()
            )));
        }

        u32::try_from(pixel_ct)
            .map_err(|_| Error::Parse(String::from("Image too large")))?;

        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Named texture with its full-size image and three successively halved
/// mip levels
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MipTexture {
    name: Name,
    mips: [Image; MipTexture::LEN],
}

impl MipTexture {
    pub const LEN: usize = 4;

    /// Build a texture from a name (truncated to 16 bytes) and mip levels.
    /// Level `i` must measure exactly the level-0 size shifted right by `i`.
    pub fn new(name: &str, mips: [Image; Self::LEN]) -> Result<Self> {
        Self::from_parts(name_to_field(name), mips)
    }

    pub fn from_parts(name: Name, mips: [Image; Self::LEN]) -> Result<Self> {
        let (width, height) = (mips[0].width, mips[0].height);

        for (i, mip) in mips.iter().enumerate() {
            if mip.width != width >> i || mip.height != height >> i {
                return Err(Error::Parse(format!(
                    "Bad mip {i}: {}x{} for a {width}x{height} texture",
                    mip.width, mip.height
                )));
            }
        }

        let total: u64 = MipTextureHead::SIZE as u64
            + mips.iter().map(|m| m.pixels.len() as u64).sum::<u64>();

        u32::try_from(total)
            .map_err(|_| Error::Parse(String::from("Texture too large")))?;

        Ok(MipTexture { name, mips })
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Obtain the name as a C string
    pub fn name_to_cstring(&self) -> CString {
        slice_to_cstring(&self.name)
    }

    /// Attempt to interpret the name as UTF-8 encoded string
    pub fn name_to_string(&self) -> std::result::Result<String, IntoStringError> {
        self.name_to_cstring().into_string()
    }

    pub fn width(&self) -> u32 {
        self.mips[0].width
    }

    pub fn height(&self) -> u32 {
        self.mips[0].height
    }

    pub fn mip(&self, index: usize) -> &Image {
        if index < Self::LEN {
            &self.mips[index]
        } else {
            panic!("Outside mip bounds ([0..{}])", Self::LEN);
        }
    }

    pub fn mips(&self) -> &[Image; Self::LEN] {
        &self.mips
    }

    /// Byte position of each level's pixels, relative to the start of the
    /// encoded lump
    pub fn offsets(&self) -> [u32; Self::LEN] {
        let mut offsets = [0u32; Self::LEN];
        let mut offset = MipTextureHead::SIZE as u32;

        for (slot, mip) in offsets.iter_mut().zip(self.mips.iter()) {
            *slot = offset;
            // total size was checked against u32 on construction
            offset += mip.pixels.len() as u32;
        }

        offsets
    }

    /// Length in bytes of the encoded lump
    pub fn encoded_len(&self) -> u32 {
        let last = &self.mips[Self::LEN - 1];
        self.offsets()[Self::LEN - 1] + last.pixels.len() as u32
    }

    pub(crate) fn head(&self) -> MipTextureHead {
        MipTextureHead {
            name: self.name,
            width: self.width(),
            height: self.height(),
            offsets: self.offsets(),
        }
    }
}

impl<'a> IntoIterator for &'a MipTexture {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.mips.iter()
    }
}

/// Fixed fields at the start of a MIPTEX lump
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MipTextureHead {
    pub(crate) name: Name,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) offsets: [u32; MipTexture::LEN],
}

impl MipTextureHead {
    pub const SIZE: usize = NAME_LEN + 4 + 4 + 4 * MipTexture::LEN;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[..16].copy_from_slice(&self.name);
        bytes[16..20].copy_from_slice(&self.width.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.height.to_le_bytes());

        for (i, offset) in self.offsets.iter().enumerate() {
            let start = 24 + 4 * i;
            bytes[start..start + 4].copy_from_slice(&offset.to_le_bytes());
        }

        bytes
    }
}

impl TryFrom<[u8; MipTextureHead::SIZE]> for MipTextureHead {
    type Error = Error;

    fn try_from(bytes: [u8; MipTextureHead::SIZE]) -> Result<Self> {
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[..16]);

        let width = read_u32(&bytes, 16);
        let height = read_u32(&bytes, 20);

        width
            .checked_mul(height)
            .ok_or(Error::Parse(String::from("Texture too large")))?;

        let mut offsets = [0u32; MipTexture::LEN];

        for (i, offset) in offsets.iter_mut().enumerate() {
            *offset = read_u32(&bytes, 24 + 4 * i);
        }

        Ok(MipTextureHead {
            name,
            width,
            height,
            offsets,
        })
    }
}

/// A lump ready to be stored in an archive
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Lump {
    /// Opaque bytes copied verbatim from a file
    Raw(Box<[u8]>),
    /// QPIC
    Picture(Image),
    MipTexture(MipTexture),
}

impl Lump {
    pub fn kind(&self) -> u8 {
        match self {
            Lump::Raw(_) => kind::LUMP,
            Lump::Picture(_) => kind::QPIC,
            Lump::MipTexture(_) => kind::MIPTEX,
        }
    }
}
