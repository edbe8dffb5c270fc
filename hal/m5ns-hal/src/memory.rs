//! In-memory configuration storage
//!
//! A [`SectionValueLookup`] over a fixed table of already-split entries.
//! Used by host tools and tests in place of the SD card; it does no text
//! parsing of its own.

use crate::storage::{ConfigStorage, SectionValueLookup, SourceError};

/// One `key=value` line under a `[section]` header
///
/// Values are raw bytes; an INI file saved by a non-UTF-8 editor is
/// returned as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a [u8],
}

impl<'a> Entry<'a> {
    pub const fn new(section: &'a str, key: &'a str, value: &'a str) -> Self {
        Self::with_bytes(section, key, value.as_bytes())
    }

    pub const fn with_bytes(section: &'a str, key: &'a str, value: &'a [u8]) -> Self {
        Self {
            section,
            key,
            value,
        }
    }

    /// Length of the `key=value` line as it would appear in the file
    fn line_len(&self) -> usize {
        self.key.len() + 1 + self.value.len()
    }
}

/// Lookup over a borrowed entry table
///
/// The first entry matching a section/key pair wins.
#[derive(Debug, Clone, Copy)]
pub struct MemorySource<'a> {
    entries: &'a [Entry<'a>],
}

impl<'a> MemorySource<'a> {
    pub const fn new(entries: &'a [Entry<'a>]) -> Self {
        Self { entries }
    }

    pub const fn empty() -> Self {
        Self { entries: &[] }
    }
}

impl SectionValueLookup for MemorySource<'_> {
    fn validate(&mut self, buffer: &mut [u8]) -> Result<(), SourceError> {
        // A line must leave room for the terminator in the reader's buffer
        for entry in self.entries {
            let header_len = entry.section.len() + 2;
            if header_len >= buffer.len() || entry.line_len() >= buffer.len() {
                return Err(SourceError::BufferTooSmall);
            }
        }
        Ok(())
    }

    fn get_value(
        &mut self,
        section: &str,
        key: &str,
        buffer: &mut [u8],
    ) -> Result<usize, SourceError> {
        let mut section_seen = false;

        for entry in self.entries.iter().filter(|e| e.section == section) {
            section_seen = true;
            if entry.key == key {
                let bytes = entry.value;
                if bytes.len() > buffer.len() {
                    return Err(SourceError::BufferTooSmall);
                }
                buffer[..bytes.len()].copy_from_slice(bytes);
                return Ok(bytes.len());
            }
        }

        if section_seen {
            Err(SourceError::KeyNotFound)
        } else {
            Err(SourceError::SectionNotFound)
        }
    }
}

/// Storage holding a fixed set of named in-memory files
#[derive(Debug, Clone, Copy)]
pub struct MemoryStorage<'a> {
    files: &'a [(&'a str, &'a [Entry<'a>])],
}

impl<'a> MemoryStorage<'a> {
    pub const fn new(files: &'a [(&'a str, &'a [Entry<'a>])]) -> Self {
        Self { files }
    }
}

impl<'a> ConfigStorage for MemoryStorage<'a> {
    type Source = MemorySource<'a>;

    fn open(&mut self, path: &str) -> Result<Self::Source, SourceError> {
        self.files
            .iter()
            .find(|(name, _)| *name == path)
            .map(|&(_, entries)| MemorySource::new(entries))
            .ok_or(SourceError::FileNotFound)
    }
}
