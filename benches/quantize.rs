use std::time::Duration;

use benchmarking::measure_function_with_times;
use image::{Rgb, RgbImage};

use wadpack::palette::Palettes;
use wadpack::texture::{build_pyramid, has_fullbright, quantize, Dithering, ScalingPolicy};

fn noise(size: u32) -> RgbImage {
    let mut state = 0x2545_f491u32;

    RgbImage::from_fn(size, size, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    })
}

fn measure(times: u64, mut work: impl FnMut() + Send + 'static) -> Duration {
    let results = measure_function_with_times(times, move |measurer| {
        measurer.measure(&mut work);
    })
    .unwrap();

    results.elapsed()
}

fn main() {
    let palettes = Palettes::default();

    for size in [64, 256] {
        let image = noise(size);

        for dithering in [Dithering::None, Dithering::FloydSteinberg] {
            let (image, palette) = (image.clone(), palettes.full().clone());
            let elapsed = measure(4, move || {
                quantize(&image, &palette, dithering).unwrap();
            });

            println!("Took {elapsed:?} to quantize {size}x{size} ({dithering:?})");
        }

        let indexed = quantize(&image, palettes.full(), Dithering::None).unwrap();
        let fullbright = has_fullbright(&indexed);

        for policy in [ScalingPolicy::NearestAlways, ScalingPolicy::SmoothAlways] {
            let (indexed, image, palettes) = (indexed.clone(), image.clone(), palettes.clone());
            let elapsed = measure(4, move || {
                build_pyramid(
                    &indexed,
                    &image,
                    &palettes,
                    fullbright,
                    policy,
                    Dithering::None,
                )
                .unwrap();
            });

            println!("Took {elapsed:?} to build {size}x{size} mips ({policy:?})");
        }
    }
}
