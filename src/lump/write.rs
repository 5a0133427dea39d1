use std::io::{self, Write};

use crate::common::Writes;
use crate::lump::{Image, Lump, MipTexture};

impl<W: Write> Writes<W> for Image {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.width().to_le_bytes())?;
        writer.write_all(&self.height().to_le_bytes())?;
        writer.write_all(self.pixels())
    }
}

impl<W: Write> Writes<W> for MipTexture {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.head().to_bytes())?;

        for mip in self {
            writer.write_all(mip.pixels())?;
        }

        Ok(())
    }
}

impl<W: Write> Writes<W> for Lump {
    fn write_to(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Lump::Raw(bytes) => writer.write_all(bytes),
            Lump::Picture(image) => image.write_to(writer),
            Lump::MipTexture(texture) => texture.write_to(writer),
        }
    }
}

impl Lump {
    /// Serialized lump bytes, as stored in the archive body
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Lump::Raw(bytes) => bytes.to_vec(),
            Lump::Picture(image) => encode_picture(image),
            Lump::MipTexture(texture) => encode_mip_texture(texture),
        }
    }
}

/// Encode a QPIC: width, height, then one byte per pixel
pub fn encode_picture(image: &Image) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + image.pixels().len());
    extend_with(&mut bytes, image);
    bytes
}

/// Encode a MIPTEX: 40-byte head followed by the four levels' pixels
pub fn encode_mip_texture(texture: &MipTexture) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(texture.encoded_len() as usize);
    extend_with(&mut bytes, texture);
    bytes
}

fn extend_with<T: Writes<Vec<u8>>>(bytes: &mut Vec<u8>, item: &T) {
    // writes into a Vec cannot fail
    if let Err(e) = item.write_to(bytes) {
        unreachable!("{e}");
    }
}
