pub mod common;
pub mod lump;
pub mod palette;
pub mod pipeline;
pub mod texture;
pub mod wad;

mod error;

pub use error::{Error, Result};
pub use palette::{Palette, Palettes};
