//! Fatal configuration errors

use core::fmt;

use m5ns_hal::SourceError;

/// A condition that leaves no usable configuration
///
/// Returned before any part of a [`DeviceConfig`](super::DeviceConfig) is
/// exposed. The caller decides how to halt; nothing here retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalConfigError {
    /// The configuration file could not be opened
    Open(SourceError),
    /// The file failed structural validation
    Invalid(SourceError),
    /// A required key is missing or unreadable
    MissingRequired {
        section: &'static str,
        key: &'static str,
        cause: SourceError,
    },
}

impl FatalConfigError {
    /// Short message for the device screen
    pub fn lcd_message(&self) -> &'static str {
        match self {
            FatalConfigError::Open(_) => "No INI file",
            FatalConfigError::Invalid(_) => "Bad INI file",
            FatalConfigError::MissingRequired { .. } => "No Nightscout URL in INI file",
        }
    }

    /// Underlying source error
    pub fn source_error(&self) -> SourceError {
        match *self {
            FatalConfigError::Open(e) | FatalConfigError::Invalid(e) => e,
            FatalConfigError::MissingRequired { cause, .. } => cause,
        }
    }
}

impl fmt::Display for FatalConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalConfigError::Open(e) => write!(f, "ini file cannot be opened: {}", e),
            FatalConfigError::Invalid(e) => write!(f, "ini file not valid: {}", e),
            FatalConfigError::MissingRequired {
                section,
                key,
                cause,
            } => write!(
                f,
                "could not read '{}' from section '{}': {}",
                key, section, cause
            ),
        }
    }
}
