use std::ffi::CString;
use std::io;
use std::path::Path;

/// Width of the name field in directory entries and mip texture headers
pub const NAME_LEN: usize = 16;

pub type Name = [u8; NAME_LEN];

/// Types that serialize themselves into a binary lump
pub trait Writes<W: io::Write> {
    fn write_to(&self, writer: &mut W) -> io::Result<()>;
}

/// Pack a string into a fixed name field.  Names longer than the field are
/// truncated; shorter names are null-padded.
pub fn name_to_field(name: &str) -> Name {
    let mut field = [0u8; NAME_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(NAME_LEN);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Derive a lump name from an input path: the file name up to its first `.`
pub fn lump_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split_once('.') {
        Some((stem, _)) => String::from(stem),
        None => file_name,
    }
}

/// Read a name field up to its first null byte.  Fields without a terminator
/// use all 16 bytes.
pub fn slice_to_cstring(slice: &[u8]) -> CString {
    let len = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());

    // no interior nulls remain after cutting at the first one
    CString::new(&slice[..len]).unwrap_or_default()
}

pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(word)
}

#[cfg(test)]
mod common_test;
