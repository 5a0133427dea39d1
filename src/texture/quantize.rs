use std::collections::HashMap;

use image::{imageops, RgbImage};

use crate::error::Result;
use crate::lump::Image;
use crate::palette::Palette;
use crate::texture::SourceImage;

/// Where the indexed pixels of a texture come from, resolved once per run
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorSource {
    /// Map every pixel onto the target palette
    #[default]
    Quantize,
    /// Trust that an indexed source already uses the target palette and
    /// keep its indices.  Sources without indices are still quantized.
    AssumeSourcePalette,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Dithering {
    /// Nearest palette color per pixel
    #[default]
    None,
    FloydSteinberg,
}

/// Map an RGB image onto `palette`
pub fn quantize(
    image: &RgbImage,
    palette: &Palette,
    dithering: Dithering,
) -> Result<Image> {
    let mut cache = HashMap::<[u8; 3], u8>::new();
    let mut nearest = |color: [u8; 3]| {
        *cache.entry(color).or_insert_with(|| palette.nearest(color))
    };

    let pixels: Vec<u8> = match dithering {
        Dithering::None => image.pixels().map(|p| nearest(p.0)).collect(),
        Dithering::FloydSteinberg => {
            let mut dithered = image.clone();
            imageops::dither(&mut dithered, palette);
            dithered.pixels().map(|p| nearest(p.0)).collect()
        }
    };

    Image::new(image.width(), image.height(), pixels)
}

/// Indexed pixels for a decoded source, following `color_source`
pub fn index_source(
    source: &SourceImage,
    palette: &Palette,
    color_source: ColorSource,
    dithering: Dithering,
) -> Result<Image> {
    match (color_source, source.indices()) {
        (ColorSource::AssumeSourcePalette, Some(indices)) => Ok(indices.clone()),
        _ => quantize(source.rgb(), palette, dithering),
    }
}
