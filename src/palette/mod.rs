mod quake;

use image::imageops::ColorMap;
use image::Rgb;

pub use quake::QUAKE_COLORS;

pub type Colors = [[u8; 3]; 256];

/// First palette index of the fullbright band.  Indices from here to 255 are
/// drawn at full brightness regardless of lighting.
pub const FULLBRIGHT_START: u8 = 224;

/// Fixed table of 256 RGB colors that indexed pixels refer to
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Palette {
    colors: Colors,
}

impl Palette {
    pub const fn new(colors: Colors) -> Self {
        Palette { colors }
    }

    pub const fn quake() -> Self {
        Palette::new(QUAKE_COLORS)
    }

    /// Copy of this palette with every fullbright entry replaced by the color
    /// at index 0, so that nearest-color searches never land in the band
    pub fn without_fullbrights(&self) -> Self {
        let mut colors = self.colors;
        let background = colors[0];

        for color in &mut colors[usize::from(FULLBRIGHT_START)..] {
            *color = background;
        }

        Palette { colors }
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn color(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index)]
    }

    /// Index of the closest color by squared RGB distance.  Ties go to the
    /// lowest index.
    pub fn nearest(&self, color: [u8; 3]) -> u8 {
        let mut best_index = 0u8;
        let mut best_distance = u32::MAX;

        for (index, candidate) in (0u8..=255).zip(self.colors.iter()) {
            let distance = distance_sq(color, *candidate);

            if distance < best_distance {
                best_index = index;
                best_distance = distance;

                if distance == 0 {
                    break;
                }
            }
        }

        best_index
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::quake()
    }
}

impl ColorMap for Palette {
    type Color = Rgb<u8>;

    fn index_of(&self, color: &Rgb<u8>) -> usize {
        usize::from(self.nearest(color.0))
    }

    fn lookup(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).map(|&color| Rgb(color))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgb<u8>) {
        *color = Rgb(self.color(self.nearest(color.0)));
    }
}

/// The two palette variants a run quantizes against, derived once up front
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Palettes {
    full: Palette,
    no_fullbright: Palette,
}

impl Palettes {
    pub fn new(full: Palette) -> Self {
        let no_fullbright = full.without_fullbrights();
        Palettes {
            full,
            no_fullbright,
        }
    }

    pub fn full(&self) -> &Palette {
        &self.full
    }

    pub fn no_fullbright(&self) -> &Palette {
        &self.no_fullbright
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Palettes::new(Palette::quake())
    }
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = u32::from(x.abs_diff(y));
            d * d
        })
        .sum()
}
