//! Configuration storage abstractions
//!
//! Provides traits for opening a sectioned key/value configuration source
//! (an INI file on the SD card) and looking values up in it. Tokenizing the
//! file is the implementation's business; callers only see resolved values.

use core::fmt;

/// Size of the line buffer handed to the lookup
///
/// Lines longer than this fail validation, and values that do not fit are
/// reported as [`SourceError::BufferTooSmall`].
pub const MAX_LINE_LEN: usize = 80;

/// Errors reported by a configuration source
///
/// These mirror the failure codes of the on-device INI library so a board
/// implementation can pass them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// No file at the requested path
    FileNotFound,
    /// File exists but could not be opened
    FileNotOpen,
    /// A line or value does not fit the supplied buffer
    BufferTooSmall,
    /// Seeking within the file failed
    SeekError,
    /// The requested section does not exist
    SectionNotFound,
    /// The section exists but has no such key
    KeyNotFound,
    /// Reached end of file while reading
    EndOfFile,
    /// Anything else
    Unknown,
}

impl SourceError {
    /// Short human-readable description
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceError::FileNotFound => "file not found",
            SourceError::FileNotOpen => "file not open",
            SourceError::BufferTooSmall => "buffer too small",
            SourceError::SeekError => "seek error",
            SourceError::SectionNotFound => "section not found",
            SourceError::KeyNotFound => "key not found",
            SourceError::EndOfFile => "end of file",
            SourceError::Unknown => "unknown error",
        }
    }

    /// Whether this error only means "the entry is not there"
    ///
    /// Lookups that fail this way are absent values, not broken sources.
    pub const fn is_absent(self) -> bool {
        matches!(self, SourceError::SectionNotFound | SourceError::KeyNotFound)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved section/key lookup over an opened configuration source
pub trait SectionValueLookup {
    /// Check the whole source for structural problems
    ///
    /// `buffer` is scratch space for reading lines; a line that does not fit
    /// must be reported as [`SourceError::BufferTooSmall`].
    fn validate(&mut self, buffer: &mut [u8]) -> Result<(), SourceError>;

    /// Look up the value of `key` in `section`
    ///
    /// # Arguments
    /// * `section` - Section name without brackets
    /// * `key` - Key name
    /// * `buffer` - Buffer the value bytes are copied into
    ///
    /// # Returns
    /// The number of value bytes written to `buffer`, or an error.
    fn get_value(
        &mut self,
        section: &str,
        key: &str,
        buffer: &mut [u8],
    ) -> Result<usize, SourceError>;
}

impl<T: SectionValueLookup + ?Sized> SectionValueLookup for &mut T {
    fn validate(&mut self, buffer: &mut [u8]) -> Result<(), SourceError> {
        (**self).validate(buffer)
    }

    fn get_value(
        &mut self,
        section: &str,
        key: &str,
        buffer: &mut [u8],
    ) -> Result<usize, SourceError> {
        (**self).get_value(section, key, buffer)
    }
}

/// Storage that can open configuration sources by path
pub trait ConfigStorage {
    /// The opened source type
    type Source: SectionValueLookup;

    /// Open the configuration file at `path`
    fn open(&mut self, path: &str) -> Result<Self::Source, SourceError>;
}
