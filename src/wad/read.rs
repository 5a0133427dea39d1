use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};
use crate::wad::repr::{Entry, Head};

/// Read the header and directory of an archive that starts at the
/// beginning of `cursor`
pub fn directory(cursor: &mut (impl Seek + Read)) -> Result<(Head, Vec<Entry>)> {
    cursor.rewind()?;
    let mut header_bytes = [0u8; Head::SIZE];
    cursor.read_exact(&mut header_bytes[..])?;
    let header = Head::try_from(header_bytes)?;
    let entry_ct = header.entry_count();
    let dir_offset = header.directory_offset();

    if u64::from(dir_offset) < Head::SIZE as u64 {
        return Err(Error::Parse(format!(
            "Directory offset {dir_offset} overlaps the header"
        )));
    }

    cursor.seek(SeekFrom::Start(dir_offset.into()))?;

    let mut entries = Vec::<Entry>::new();

    for _ in 0..entry_ct {
        let mut entry_bytes = [0u8; Entry::SIZE];
        cursor.read_exact(&mut entry_bytes[..])?;
        let entry = Entry::try_from(entry_bytes)?;

        let lump_end = u64::from(entry.offset()) + u64::from(entry.length());

        if lump_end > u64::from(dir_offset) {
            return Err(Error::Parse(format!(
                "Lump `{}` extends past the directory",
                entry.name_to_cstring().to_string_lossy()
            )));
        }

        entries.push(entry);
    }

    Ok((header, entries))
}
