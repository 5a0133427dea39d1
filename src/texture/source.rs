use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{ImageFormat, ImageReader, Rgb, RgbImage};
use log::debug;

use crate::error::{Error, Result};
use crate::lump::Image;

/// A decoded input image.  Always carries a true-color copy; images stored
/// with their own palette also keep the original indices.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgb: RgbImage,
    indices: Option<Image>,
}

impl SourceImage {
    pub fn from_rgb(rgb: RgbImage) -> Self {
        SourceImage { rgb, indices: None }
    }

    /// Build from palette indices and the palette they refer to, given as
    /// packed RGB triples.  Indices past the end of the palette render black.
    pub fn from_indexed(indices: Image, palette: &[u8]) -> Self {
        let rgb = RgbImage::from_fn(indices.width(), indices.height(), |x, y| {
            let i = (y * indices.width() + x) as usize;
            let start = usize::from(indices.pixels()[i]) * 3;

            match palette.get(start..start + 3) {
                Some(&[r, g, b]) => Rgb([r, g, b]),
                _ => Rgb([0, 0, 0]),
            }
        });

        SourceImage {
            rgb,
            indices: Some(indices),
        }
    }

    /// Decode an image file.  Palette-based PNGs and GIFs keep their
    /// indices.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;

        match reader.format() {
            Some(ImageFormat::Png) => {
                if let Some(source) = read_indexed_png(path)? {
                    debug!("{}: palette-based PNG", path.display());
                    return Ok(source);
                }
            }
            Some(ImageFormat::Gif) => return read_indexed_gif(path),
            _ => {}
        }

        let image = reader.decode().map_err(|e| Error::decode(path, e))?;

        Ok(SourceImage::from_rgb(image.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// The source's own palette indices, if it was stored indexed
    pub fn indices(&self) -> Option<&Image> {
        self.indices.as_ref()
    }
}

fn read_indexed_png(path: &Path) -> Result<Option<SourceImage>> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);

    let mut reader = decoder.read_info().map_err(|e| Error::decode(path, e))?;

    let palette = {
        let info = reader.info();

        if info.color_type != png::ColorType::Indexed {
            return Ok(None);
        }

        match &info.palette {
            Some(palette) => palette.to_vec(),
            None => return Err(Error::decode(path, "Indexed PNG has no palette")),
        }
    };

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(|e| Error::decode(path, e))?;

    let indices = unpack_indices(
        &buf,
        frame.line_size,
        frame.width,
        frame.height,
        frame.bit_depth as u8,
    );

    let indices = Image::new(frame.width, frame.height, indices)?;

    Ok(Some(SourceImage::from_indexed(indices, &palette)))
}

/// First frame of a GIF, placed on its logical screen.  Pixels outside the
/// frame take the background index.
fn read_indexed_gif(path: &Path) -> Result<SourceImage> {
    let file = File::open(path)?;
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);

    let mut decoder = options
        .read_info(BufReader::new(file))
        .map_err(|e| Error::decode(path, e))?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let background = decoder
        .bg_color()
        .and_then(|i| u8::try_from(i).ok())
        .unwrap_or(0);
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

    let frame = decoder
        .read_next_frame()
        .map_err(|e| Error::decode(path, e))?
        .ok_or_else(|| Error::decode(path, "GIF has no frames"))?;

    let palette = match (&frame.palette, global_palette) {
        (Some(local), _) => local.clone(),
        (None, Some(global)) => global,
        (None, None) => return Err(Error::decode(path, "GIF has no palette")),
    };

    let mut indices = vec![background; width as usize * height as usize];
    let (left, top) = (u32::from(frame.left), u32::from(frame.top));
    let frame_width = usize::from(frame.width).max(1);

    for (row, line) in (top..height).zip(frame.buffer.chunks(frame_width)) {
        for (column, &index) in (left..width).zip(line) {
            indices[(row * width + column) as usize] = index;
        }
    }

    debug!("{}: GIF, {width}x{height}", path.display());

    let indices = Image::new(width, height, indices)?;

    Ok(SourceImage::from_indexed(indices, &palette))
}

/// Expand packed rows of 1, 2, 4 or 8 bit indices to one byte per pixel
pub(crate) fn unpack_indices(
    buf: &[u8],
    line_size: usize,
    width: u32,
    height: u32,
    bits: u8,
) -> Vec<u8> {
    let width = width as usize;
    let mut indices = Vec::with_capacity(width * height as usize);

    for row in buf.chunks(line_size).take(height as usize) {
        if bits == 8 {
            indices.extend_from_slice(&row[..width]);
            continue;
        }

        let bits = usize::from(bits);
        let mask = (1u8 << bits) - 1;

        for x in 0..width {
            let bit = x * bits;
            let shift = 8 - bits - bit % 8;
            indices.push((row[bit / 8] >> shift) & mask);
        }
    }

    indices
}
