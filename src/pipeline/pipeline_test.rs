use std::fs::{self, File};
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

use super::{pack, pack_archive, LumpType, PackOptions, Progress};
use crate::error::Error;
use crate::lump::kind;
use crate::palette::Palettes;
use crate::wad::{Mode, WadWriter};

#[derive(Default)]
struct Recorder(Vec<String>);

impl Progress for Recorder {
    fn report(&mut self, line: &str) {
        self.0.push(line.to_owned());
    }
}

fn write_png(path: &Path, width: u32, height: u32) {
    let file = BufWriter::new(File::create(path).unwrap());
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let data: Vec<u8> = (0..width * height)
        .flat_map(|i| [(i % 251) as u8, (i % 13) as u8 * 19, 64])
        .collect();
    encoder.write_header().unwrap().write_image_data(&data).unwrap();
}

fn memory_writer() -> WadWriter<Cursor<Vec<u8>>> {
    WadWriter::new(Cursor::new(Vec::new()), Mode::Create).unwrap()
}

#[test]
fn textures_are_named_after_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wall01.png");
    write_png(&path, 64, 64);

    let mut writer = memory_writer();
    let mut progress = Recorder::default();

    pack(
        &mut writer,
        &[&path],
        &PackOptions::default(),
        &Palettes::default(),
        &mut progress,
    )
    .unwrap();

    let entry = writer.entries()[0];
    assert_eq!(entry.name_to_string().unwrap(), "wall01");
    assert_eq!(entry.kind(), kind::MIPTEX);
    assert_eq!(entry.length(), 40 + 64 * 64 + 32 * 32 + 16 * 16 + 8 * 8);
    assert_eq!(progress.0, [format!("  adding: {}", path.display())]);
}

#[test]
fn pictures_have_no_mips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conback.png");
    write_png(&path, 10, 6);

    let mut writer = memory_writer();
    let options = PackOptions {
        lump_type: LumpType::Qpic,
        ..PackOptions::default()
    };

    pack(
        &mut writer,
        &[&path],
        &options,
        &Palettes::default(),
        &mut Recorder::default(),
    )
    .unwrap();

    let entry = writer.entries()[0];
    assert_eq!(entry.kind(), kind::QPIC);
    assert_eq!(entry.length(), 8 + 10 * 6);
}

#[test]
fn raw_lumps_copy_file_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.lmp");
    fs::write(&path, [1u8, 2, 3, 4, 5]).unwrap();

    let mut writer = memory_writer();
    let options = PackOptions {
        lump_type: LumpType::Lump,
        ..PackOptions::default()
    };

    pack(
        &mut writer,
        &[&path],
        &options,
        &Palettes::default(),
        &mut Recorder::default(),
    )
    .unwrap();

    let entry = writer.entries()[0];
    let bytes = writer.close().unwrap().into_inner();
    let start = entry.offset() as usize;

    assert_eq!(entry.kind(), kind::LUMP);
    assert_eq!(entry.name_to_string().unwrap(), "palette");
    assert_eq!(&bytes[start..start + 5], &[1, 2, 3, 4, 5]);
}

#[test]
fn failing_input_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    let missing = dir.path().join("missing.png");
    let after = dir.path().join("after.png");
    write_png(&good, 8, 8);
    write_png(&after, 8, 8);

    let mut writer = memory_writer();
    let mut progress = Recorder::default();

    let err = pack(
        &mut writer,
        &[&good, &missing, &after],
        &PackOptions::default(),
        &Palettes::default(),
        &mut progress,
    )
    .unwrap_err();

    match err {
        Error::Input { path, source } => {
            assert_eq!(path, missing);
            assert!(matches!(*source, Error::Io(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }

    assert_eq!(writer.entries().len(), 1);
    assert_eq!(progress.0.len(), 1);
}

#[test]
fn archive_line_comes_first() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sky.png");
    write_png(&input, 16, 16);
    let archive: PathBuf = dir.path().join("nested/out/textures.wad");

    let mut progress = Recorder::default();
    let entries =
        pack_archive(&archive, &[&input], &PackOptions::default(), &mut progress).unwrap();

    assert_eq!(entries.len(), 1);
    assert!(archive.is_file());
    assert_eq!(progress.0[0], "Archive: textures.wad");
    assert_eq!(progress.0[1], format!("  adding: {}", input.display()));
}

#[test]
fn missing_raw_input_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("colormap.lmp");

    let mut writer = memory_writer();
    let mut progress = Recorder::default();
    let options = PackOptions {
        lump_type: LumpType::Lump,
        ..PackOptions::default()
    };

    let err = pack(
        &mut writer,
        &[&missing],
        &options,
        &Palettes::default(),
        &mut progress,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Input { .. }));
    assert!(progress.0.is_empty());
    assert!(writer.entries().is_empty());
}
