use std::ffi::{CString, IntoStringError};

use crate::common::{read_u32, slice_to_cstring, Name, NAME_LEN};
use crate::error::{Error, Result};
use crate::lump::compression;

pub const MAGIC: [u8; 4] = *b"WAD2";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Head {
    entry_count: u32,
    directory_offset: u32,
}

impl Head {
    pub const SIZE: usize = 12;

    pub fn new(entry_count: u32, directory_offset: u32) -> Self {
        Head {
            entry_count,
            directory_offset,
        }
    }

    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    pub fn directory_offset(&self) -> u32 {
        self.directory_offset
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4..8].copy_from_slice(&self.entry_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.directory_offset.to_le_bytes());
        bytes
    }
}

impl TryFrom<[u8; Head::SIZE]> for Head {
    type Error = Error;

    fn try_from(bytes: [u8; Head::SIZE]) -> Result<Self> {
        if bytes[0..4] != MAGIC[..] {
            let magic_str: String =
                MAGIC.iter().copied().map(char::from).collect();

            return Err(Error::Parse(format!(
                "Magic number does not match `{magic_str}`"
            )));
        }

        let entry_count = read_u32(&bytes, 4);
        let directory_offset = read_u32(&bytes, 8);

        Ok(Head::new(entry_count, directory_offset))
    }
}

/// Provides the location of a lump within a WAD archive, length of the lump,
/// name (16 bytes, null-padded), lump kind and compression
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Entry {
    offset: u32,
    length: u32,
    uncompressed_length: u32,
    lump_kind: u8,
    compression: u8,
    name: Name,
}

impl Entry {
    pub const SIZE: usize = 16 + NAME_LEN;

    /// Uncompressed entry; on-disk and decompressed sizes are both `length`
    pub fn new(config: EntryConfig) -> Entry {
        Entry {
            offset: config.offset,
            length: config.length,
            uncompressed_length: config.length,
            lump_kind: config.lump_kind,
            compression: compression::NONE,
            name: config.name,
        }
    }

    /// Obtain the name as a C string.  If the name is not already
    /// null-terminated all 16 bytes are used.
    pub fn name_to_cstring(&self) -> CString {
        slice_to_cstring(&self.name)
    }

    /// Attempt to interpret the name as UTF-8 encoded string
    pub fn name_to_string(&self) -> std::result::Result<String, IntoStringError> {
        self.name_to_cstring().into_string()
    }

    /// Name in raw bytes
    pub fn name(&self) -> Name {
        self.name
    }

    /// WAD offset of lump
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of lump on disk in bytes
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Length of lump after decompression
    pub fn uncompressed_length(&self) -> u32 {
        self.uncompressed_length
    }

    /// Lump kind as a byte
    pub fn kind(&self) -> u8 {
        self.lump_kind
    }

    pub fn compression(&self) -> u8 {
        self.compression
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.offset.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.length.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.uncompressed_length.to_le_bytes());
        bytes[12] = self.lump_kind;
        bytes[13] = self.compression;
        bytes[16..].copy_from_slice(&self.name);
        bytes
    }
}

impl TryFrom<[u8; Entry::SIZE]> for Entry {
    type Error = Error;

    // Fails if the compression flag is on, since lumps are rewritten
    // byte-for-byte and compressed lumps are not understood
    fn try_from(bytes: [u8; Entry::SIZE]) -> Result<Self> {
        let offset = read_u32(&bytes, 0);
        let length = read_u32(&bytes, 4);
        let uncompressed_length = read_u32(&bytes, 8);
        let lump_kind = bytes[12];
        let compression_tag = bytes[13];

        if compression_tag != compression::NONE {
            return Err(Error::Parse(format!(
                "Compression type {compression_tag} is unsupported"
            )));
        }

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[16..]);

        Ok(Entry {
            offset,
            length,
            uncompressed_length,
            lump_kind,
            compression: compression_tag,
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryConfig {
    pub offset: u32,
    pub length: u32,
    pub lump_kind: u8,
    pub name: Name,
}
