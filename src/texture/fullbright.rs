use crate::lump::Image;
use crate::palette::FULLBRIGHT_START;

/// Whether any pixel uses a fullbright palette index
pub fn has_fullbright(image: &Image) -> bool {
    image.pixels().iter().any(|&index| index >= FULLBRIGHT_START)
}
