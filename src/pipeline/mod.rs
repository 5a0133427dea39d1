use std::fs;
use std::io::{Read, Seek, Write};
use std::path::Path;

use log::{debug, warn};

use crate::common::lump_name;
use crate::error::Result;
use crate::lump::{read_raw_file, Image, Lump, MipTexture};
use crate::palette::Palettes;
use crate::texture::{
    build_pyramid, has_fullbright, index_source, ColorSource, Dithering, ScalingPolicy,
    SourceImage,
};
use crate::wad::{Entry, WadWriter};

/// What each input becomes inside the archive
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LumpType {
    /// File bytes stored verbatim
    Lump,
    /// Quantized picture without mips
    Qpic,
    #[default]
    Miptex,
}

/// Settings for a whole run, resolved once from the command line
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PackOptions {
    pub lump_type: LumpType,
    pub color_source: ColorSource,
    pub scaling: ScalingPolicy,
    pub dithering: Dithering,
}

/// Receives the user-facing progress lines of a run
pub trait Progress {
    fn report(&mut self, line: &str);
}

/// Prints progress lines to standard output
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Progress for Stdout {
    fn report(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Discards progress lines
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Progress for Silent {
    fn report(&mut self, _line: &str) {}
}

fn index_input(
    path: &Path,
    source: &SourceImage,
    options: &PackOptions,
    palettes: &Palettes,
) -> Result<Image> {
    if options.color_source == ColorSource::AssumeSourcePalette && source.indices().is_none() {
        warn!(
            "{}: only palette PNGs and GIFs keep their indices; quantizing",
            path.display()
        );
    }

    index_source(
        source,
        palettes.full(),
        options.color_source,
        options.dithering,
    )
}

/// Decode `path` and build a mip texture named after the file
pub fn texture_lump(path: &Path, options: &PackOptions, palettes: &Palettes) -> Result<Lump> {
    let source = SourceImage::open(path)?;

    let indexed = index_input(path, &source, options, palettes)?;

    let fullbright = has_fullbright(&indexed);

    if fullbright {
        debug!("{}: has fullbright pixels", path.display());
    }

    let pyramid = build_pyramid(
        &indexed,
        source.rgb(),
        palettes,
        fullbright,
        options.scaling,
        options.dithering,
    )?;

    let texture = MipTexture::new(&lump_name(path), pyramid.into_levels())?;

    Ok(Lump::MipTexture(texture))
}

/// Decode `path` into a QPIC against the full palette
pub fn picture_lump(path: &Path, options: &PackOptions, palettes: &Palettes) -> Result<Lump> {
    let source = SourceImage::open(path)?;

    let indexed = index_input(path, &source, options, palettes)?;

    Ok(Lump::Picture(indexed))
}

/// Append every input to `writer`.  The first failing input stops the run;
/// its error names the input.
pub fn pack<F, P>(
    writer: &mut WadWriter<F>,
    inputs: &[P],
    options: &PackOptions,
    palettes: &Palettes,
    progress: &mut dyn Progress,
) -> Result<()>
where
    F: Read + Write + Seek,
    P: AsRef<Path>,
{
    for input in inputs {
        let path = input.as_ref();
        pack_one(writer, path, options, palettes, progress)
            .map_err(|e| e.for_input(path))?;
    }

    Ok(())
}

fn pack_one<F: Read + Write + Seek>(
    writer: &mut WadWriter<F>,
    path: &Path,
    options: &PackOptions,
    palettes: &Palettes,
    progress: &mut dyn Progress,
) -> Result<Entry> {
    let lump = match options.lump_type {
        LumpType::Lump => read_raw_file(path)?,
        LumpType::Qpic => picture_lump(path, options, palettes)?,
        LumpType::Miptex => texture_lump(path, options, palettes)?,
    };

    progress.report(&format!("  adding: {}", path.display()));
    writer.write_lump(&lump_name(path), &lump)
}

/// Pack `inputs` into the archive at `archive`, appending when it already
/// exists.  The archive is closed, and its directory written, even when an
/// input fails.  Returns the resulting directory.
pub fn pack_archive<P: AsRef<Path>>(
    archive: &Path,
    inputs: &[P],
    options: &PackOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<Entry>> {
    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WadWriter::open(archive)?;

    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| archive.display().to_string());

    progress.report(&format!("Archive: {name}"));

    let palettes = Palettes::default();
    let packed = pack(&mut writer, inputs, options, &palettes, progress);
    let entries = writer.entries().to_vec();
    let closed = writer.close();

    match (packed, closed) {
        (Err(e), Err(close_err)) => {
            warn!("Failed to close archive after error: {close_err}");
            Err(e)
        }
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Ok(_), Ok(_)) => Ok(entries),
    }
}

#[cfg(test)]
mod pipeline_test;
