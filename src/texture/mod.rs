mod fullbright;
mod mip;
mod quantize;
mod source;

pub use fullbright::has_fullbright;
pub use mip::{build_pyramid, level_size, MipPyramid, Resampling, ScalingPolicy};
pub use quantize::{index_source, quantize, ColorSource, Dithering};
pub use source::SourceImage;
