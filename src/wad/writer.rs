use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::common::{lump_name, name_to_field};
use crate::error::{Error, Result};
use crate::lump::{kind, read_raw_file, Lump};
use crate::wad::read;
use crate::wad::repr::{Entry, EntryConfig, Head};

/// How an archive is opened
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Start an empty archive, discarding any previous contents
    Create,
    /// Keep existing lumps and add new ones after them
    Append,
}

/// Writes lumps into a WAD2 archive.
///
/// Lump data goes to the file as soon as it is written, but the directory and
/// header are only written by [`WadWriter::flush`] or [`WadWriter::close`],
/// so the file is consistent only once one of those has run.  Dropping a
/// writer that was not closed flushes it.
#[derive(Debug)]
pub struct WadWriter<F: Read + Write + Seek> {
    file: Option<F>,
    entries: Vec<Entry>,
    cursor: u32,
}

impl<F: Read + Write + Seek> WadWriter<F> {
    pub fn new(mut file: F, mode: Mode) -> Result<Self> {
        let (entries, cursor) = match mode {
            Mode::Create => {
                let head = Head::new(0, Head::SIZE as u32);
                file.rewind()?;
                file.write_all(&head.to_bytes())?;
                (Vec::new(), head.directory_offset())
            }
            Mode::Append => {
                let (head, entries) = read::directory(&mut file)?;
                // new lumps overwrite the old directory, which is rewritten
                // at the end of the body on flush
                (entries, head.directory_offset())
            }
        };

        Ok(WadWriter {
            file: Some(file),
            entries,
            cursor,
        })
    }

    /// Directory entries in append order, including any loaded from an
    /// existing archive
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Append `payload` to the body and record it in the directory
    pub fn write_bytes(
        &mut self,
        name: &str,
        lump_kind: u8,
        payload: &[u8],
    ) -> Result<Entry> {
        let length = u32::try_from(payload.len())
            .map_err(|_| Error::Parse(String::from("Lump too large")))?;

        let end = self
            .cursor
            .checked_add(length)
            .ok_or(Error::Parse(String::from("Archive too large")))?;

        let offset = self.cursor;
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(offset.into()))?;
        file.write_all(payload)?;

        let entry = Entry::new(EntryConfig {
            offset,
            length,
            lump_kind,
            name: name_to_field(name),
        });

        debug!(
            "Wrote {} lump `{name}` ({length} bytes at {offset})",
            kind::describe(lump_kind),
        );

        self.entries.push(entry);
        self.cursor = end;

        Ok(entry)
    }

    pub fn write_lump(&mut self, name: &str, lump: &Lump) -> Result<Entry> {
        self.write_bytes(name, lump.kind(), &lump.to_bytes())
    }

    /// Store a whole file verbatim, named after the file
    pub fn write_raw(&mut self, path: &Path) -> Result<Entry> {
        let lump = read_raw_file(path)?;
        self.write_lump(&lump_name(path), &lump)
    }

    /// Write the directory after the last lump and point the header at it
    pub fn flush(&mut self) -> Result<()> {
        let entry_count = u32::try_from(self.entries.len())
            .map_err(|_| Error::Parse(String::from("Too many entries")))?;

        let mut directory = Vec::with_capacity(self.entries.len() * Entry::SIZE);

        for entry in &self.entries {
            directory.extend(entry.to_bytes());
        }

        let head = Head::new(entry_count, self.cursor);
        let cursor = self.cursor;
        let file = self.file_mut()?;

        file.seek(SeekFrom::Start(cursor.into()))?;
        file.write_all(&directory)?;
        file.rewind()?;
        file.write_all(&head.to_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Flush the directory and hand back the underlying file
    pub fn close(mut self) -> Result<F> {
        self.flush()?;
        info!("Closed archive with {} entries", self.entries.len());
        self.file
            .take()
            .ok_or(Error::Parse(String::from("Archive already closed")))
    }

    fn file_mut(&mut self) -> Result<&mut F> {
        self.file
            .as_mut()
            .ok_or(Error::Parse(String::from("Archive already closed")))
    }
}

impl WadWriter<File> {
    /// Open `path` for appending if it is an existing file, otherwise create
    /// it
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::append(path)
        } else {
            Self::create(path)
        }
    }

    pub fn create(path: &Path) -> Result<Self> {
        info!("Creating archive {}", path.display());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Self::new(file, Mode::Create)
    }

    pub fn append(path: &Path) -> Result<Self> {
        info!("Appending to archive {}", path.display());
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::new(file, Mode::Append)
    }
}

impl<F: Read + Write + Seek> Drop for WadWriter<F> {
    fn drop(&mut self) {
        if self.file.is_none() {
            return;
        }

        warn!("Archive was not closed; flushing directory");

        if let Err(e) = self.flush() {
            warn!("Failed to flush archive directory: {e}");
        }
    }
}
