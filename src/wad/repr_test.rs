use super::repr::{Entry, EntryConfig, Head};
use super::{Mode, WadWriter};
use crate::common::name_to_field;
use crate::error::Error;
use crate::lump::{kind, Image, Lump};
use std::io::Cursor;

fn written(names: &[&str]) -> (Vec<Entry>, Vec<u8>) {
    let mut writer = WadWriter::new(Cursor::new(Vec::new()), Mode::Create).unwrap();

    for (i, name) in names.iter().enumerate() {
        let side = 2 + i as u32;
        let image = Image::new(side, side, vec![i as u8; (side * side) as usize]).unwrap();
        writer.write_lump(name, &Lump::Picture(image)).unwrap();
    }

    let entries = writer.entries().to_vec();
    (entries, writer.close().unwrap().into_inner())
}

fn head_bytes(bytes: &[u8]) -> [u8; Head::SIZE] {
    let mut head = [0u8; Head::SIZE];
    head.copy_from_slice(&bytes[..Head::SIZE]);
    head
}

fn head_of(bytes: &[u8]) -> Head {
    Head::try_from(head_bytes(bytes)).unwrap()
}

fn directory_of(bytes: &[u8]) -> Vec<[u8; Entry::SIZE]> {
    let start = head_of(bytes).directory_offset() as usize;

    bytes[start..]
        .chunks_exact(Entry::SIZE)
        .map(|chunk| {
            let mut record = [0u8; Entry::SIZE];
            record.copy_from_slice(chunk);
            record
        })
        .collect()
}

#[test]
fn empty_archive_head() {
    let head = Head::new(0, Head::SIZE as u32);
    assert_eq!(&head.to_bytes(), b"WAD2\0\0\0\0\x0c\0\0\0");
    assert_eq!(Head::try_from(head.to_bytes()).unwrap(), head);
}

#[test]
fn head_points_at_trailing_directory() {
    let (_, bytes) = written(&["conchars", "conback", "pause"]);
    let head = head_of(&bytes);

    assert_eq!(head.entry_count(), 3);
    assert_eq!(
        head.directory_offset() as usize,
        bytes.len() - 3 * Entry::SIZE
    );
}

#[test]
fn other_wad_versions_are_rejected() {
    let (_, mut bytes) = written(&["disc"]);

    for magic in [b"WAD3", b"WAD1", b"wad2"] {
        bytes[0..4].copy_from_slice(magic);
        let err = Head::try_from(head_bytes(&bytes)).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}

#[test]
fn directory_records_decode_to_written_entries() {
    let (entries, bytes) = written(&["sbar", "ibar", "num_0"]);
    let decoded: Vec<Entry> = directory_of(&bytes)
        .into_iter()
        .map(|record| Entry::try_from(record).unwrap())
        .collect();

    assert_eq!(decoded, entries);
    assert_eq!(decoded[2].name_to_string().unwrap(), "num_0");
    assert_eq!(decoded[2].kind(), kind::QPIC);
    assert_eq!(decoded[2].length(), 8 + 4 * 4);
    assert_eq!(decoded[2].uncompressed_length(), decoded[2].length());
}

#[test]
fn entry_layout() {
    let entry = Entry::new(EntryConfig {
        offset: 0x0102_0304,
        length: 777,
        lump_kind: kind::MIPTEX,
        name: *b"wall01\0\0\0\0\0\0\0\0\0\0",
    });

    let bytes = entry.to_bytes();

    assert_eq!(&bytes[0..4], &[4, 3, 2, 1]);
    assert_eq!(&bytes[4..8], &777u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &777u32.to_le_bytes());
    assert_eq!(bytes[12], kind::MIPTEX);
    assert_eq!(bytes[13], 0);
    assert_eq!(&bytes[14..16], &[0, 0]);
    assert_eq!(&bytes[16..], b"wall01\0\0\0\0\0\0\0\0\0\0");
    assert_eq!(Entry::try_from(bytes).unwrap(), entry);
}

#[test]
fn full_width_name_has_no_terminator() {
    let entry = Entry::new(EntryConfig {
        offset: 12,
        length: 0,
        lump_kind: kind::LUMP,
        name: name_to_field("sixteen_chars_ok_and_more"),
    });

    assert_eq!(entry.name_to_string().unwrap(), "sixteen_chars_ok");
}

#[test]
fn padding_bytes_are_ignored() {
    let (entries, bytes) = written(&["gfx"]);
    let mut record = directory_of(&bytes)[0];
    record[14] = 0xAA;
    record[15] = 0x55;

    assert_eq!(Entry::try_from(record).unwrap(), entries[0]);
}

#[test]
fn compressed_entry_is_rejected() {
    let (_, bytes) = written(&["lzss"]);
    let mut record = directory_of(&bytes)[0];
    record[13] = 1;

    let err = Entry::try_from(record).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
