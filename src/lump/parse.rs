use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};
use crate::lump::{Image, Lump, MipTexture, MipTextureHead};

/// Read a mip texture lump starting at the reader's current position
pub fn parse_mip_texture(cursor: &mut (impl Seek + Read)) -> Result<MipTexture> {
    let mut head_bytes = [0u8; MipTextureHead::SIZE];
    let lump_start = cursor.stream_position()?;

    cursor.read_exact(&mut head_bytes)?;

    let head = MipTextureHead::try_from(head_bytes)?;
    let mut mips = Vec::with_capacity(MipTexture::LEN);

    for (i, &offset) in head.offsets.iter().enumerate() {
        let (width, height) = (head.width >> i, head.height >> i);
        let pix_start = lump_start
            .checked_add(offset.into())
            .ok_or(Error::Parse(String::from("Bad offset")))?;

        cursor.seek(SeekFrom::Start(pix_start))?;

        let length = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| Error::Parse(String::from("Texture too large")))?;
        let pixels = read_raw(cursor, length)?;

        mips.push(Image::new(width, height, pixels)?);
    }

    let mips: [Image; MipTexture::LEN] = mips
        .try_into()
        .map_err(|_| Error::Parse(String::from("Missing mip levels")))?;

    MipTexture::from_parts(head.name, mips)
}

/// Read a QPIC lump: width and height followed by the pixels
pub fn parse_image(reader: &mut impl Read) -> Result<Image> {
    let mut u32_buf = [0u8; 4];
    reader.read_exact(&mut u32_buf[..])?;
    let width = u32::from_le_bytes(u32_buf);
    reader.read_exact(&mut u32_buf[..])?;
    let height = u32::from_le_bytes(u32_buf);

    let pixel_ct = width
        .checked_mul(height)
        .ok_or(Error::Parse(String::from("Image too large")))?;

    let pixels = read_raw(reader, pixel_ct as usize)?;

    Image::new(width, height, pixels)
}

/// Read `length` bytes into a boxed slice
pub fn read_raw(reader: &mut impl Read, length: usize) -> Result<Box<[u8]>> {
    let mut bytes = vec![0u8; length].into_boxed_slice();
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Load a whole file as an opaque lump
pub fn read_raw_file(path: &Path) -> Result<Lump> {
    Ok(Lump::Raw(fs::read(path)?.into_boxed_slice()))
}
