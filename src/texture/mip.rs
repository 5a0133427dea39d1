use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use log::debug;

use crate::error::{Error, Result};
use crate::lump::{Image, MipTexture};
use crate::palette::{Palette, Palettes};
use crate::texture::quantize::{quantize, Dithering};

/// Which resampling produces mip levels 1 to 3
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScalingPolicy {
    SmoothAlways,
    /// Smooth unless the texture has fullbright pixels
    SmartAuto,
    #[default]
    NearestAlways,
}

impl ScalingPolicy {
    /// `smooth` takes precedence over `smart`
    pub fn from_flags(smooth: bool, smart: bool) -> Self {
        if smooth {
            ScalingPolicy::SmoothAlways
        } else if smart {
            ScalingPolicy::SmartAuto
        } else {
            ScalingPolicy::NearestAlways
        }
    }

    pub fn smooths(self, has_fullbright: bool) -> bool {
        match self {
            ScalingPolicy::SmoothAlways => true,
            ScalingPolicy::SmartAuto => !has_fullbright,
            ScalingPolicy::NearestAlways => false,
        }
    }
}

/// How a single texture's reduced levels are made
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Resampling<'a> {
    /// Filter the true-color source, then quantize against the palette
    Smooth(&'a Palette),
    /// Pick existing indices from level 0
    Nearest,
}

impl<'a> Resampling<'a> {
    /// Smoothing a texture without fullbrights quantizes against the palette
    /// with the fullbright band blacked out so none can appear
    pub fn resolve(
        policy: ScalingPolicy,
        has_fullbright: bool,
        palettes: &'a Palettes,
    ) -> Self {
        if !policy.smooths(has_fullbright) {
            Resampling::Nearest
        } else if has_fullbright {
            Resampling::Smooth(palettes.full())
        } else {
            Resampling::Smooth(palettes.no_fullbright())
        }
    }
}

/// Full-size indexed image plus three successively halved levels
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MipPyramid {
    levels: [Image; MipTexture::LEN],
}

impl MipPyramid {
    pub fn levels(&self) -> &[Image; MipTexture::LEN] {
        &self.levels
    }

    pub fn into_levels(self) -> [Image; MipTexture::LEN] {
        self.levels
    }
}

/// Size of mip level `level` for a `width` by `height` texture.  Odd sizes
/// round down and levels may reach zero.
pub fn level_size(width: u32, height: u32, level: usize) -> (u32, u32) {
    (width >> level, height >> level)
}

/// Build the mip levels of a texture.  Level 0 is `indexed` as is; the rest
/// are resampled as `policy` dictates for a texture with or without
/// fullbright pixels.
pub fn build_pyramid(
    indexed: &Image,
    rgb: &RgbImage,
    palettes: &Palettes,
    has_fullbright: bool,
    policy: ScalingPolicy,
    dithering: Dithering,
) -> Result<MipPyramid> {
    let (width, height) = (indexed.width(), indexed.height());

    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }

    let resampling = Resampling::resolve(policy, has_fullbright, palettes);

    debug!(
        "Building {width}x{height} mips, {}",
        match resampling {
            Resampling::Smooth(_) if has_fullbright => "smooth",
            Resampling::Smooth(_) => "smooth without fullbrights",
            Resampling::Nearest => "nearest",
        }
    );

    let level = |i: usize| -> Result<Image> {
        let (w, h) = level_size(width, height, i);

        if w == 0 || h == 0 {
            return Image::new(w, h, Vec::<u8>::new());
        }

        match resampling {
            Resampling::Smooth(palette) => {
                let resized = imageops::resize(rgb, w, h, FilterType::CatmullRom);
                quantize(&resized, palette, dithering)
            }
            Resampling::Nearest => resize_nearest(indexed, w, h),
        }
    };

    Ok(MipPyramid {
        levels: [indexed.clone(), level(1)?, level(2)?, level(3)?],
    })
}

fn resize_nearest(indexed: &Image, width: u32, height: u32) -> Result<Image> {
    let plane = GrayImage::from_raw(
        indexed.width(),
        indexed.height(),
        indexed.pixels().to_vec(),
    )
    .ok_or(Error::InvalidDimension {
        width: indexed.width(),
        height: indexed.height(),
    })?;

    let resized = imageops::resize(&plane, width, height, FilterType::Nearest);

    Image::new(width, height, resized.into_raw())
}
