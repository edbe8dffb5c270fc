//! Configuration loading
//!
//! Opens the INI file on the SD card, validates it, and resolves it into a
//! [`DeviceConfig`]. Any failure before resolution is fatal: there is no
//! fallback configuration.

use m5ns_hal::{ConfigStorage, SectionValueLookup, MAX_LINE_LEN};

use super::diagnostics::Diagnostics;
use super::error::FatalConfigError;
use super::resolver::resolve_with;
use super::types::DeviceConfig;

/// Location of the configuration file on the SD card
pub const CONFIG_PATH: &str = "/M5NS.INI";

/// Configuration loader
///
/// Owns the storage for the duration of boot and hands it back afterwards.
pub struct ConfigLoader<S> {
    storage: S,
}

impl<S: ConfigStorage> ConfigLoader<S> {
    /// Create a new loader over `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Consume this loader and return the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load configuration from [`CONFIG_PATH`]
    pub fn load<D: Diagnostics>(
        &mut self,
        diagnostics: D,
    ) -> Result<DeviceConfig, FatalConfigError> {
        self.load_from(CONFIG_PATH, diagnostics)
    }

    /// Load configuration from `path`
    ///
    /// # Errors
    ///
    /// - [`FatalConfigError::Open`] if the file cannot be opened
    /// - [`FatalConfigError::Invalid`] if a line does not fit the line buffer
    /// - [`FatalConfigError::MissingRequired`] if the Nightscout URL is absent
    pub fn load_from<D: Diagnostics>(
        &mut self,
        path: &str,
        mut diagnostics: D,
    ) -> Result<DeviceConfig, FatalConfigError> {
        let mut source = match self.storage.open(path) {
            Ok(source) => source,
            Err(e) => return Err(fail(&mut diagnostics, FatalConfigError::Open(e))),
        };

        let mut buffer = [0u8; MAX_LINE_LEN];
        if let Err(e) = source.validate(&mut buffer) {
            return Err(fail(&mut diagnostics, FatalConfigError::Invalid(e)));
        }

        resolve_with(source, diagnostics)
    }
}

fn fail<D: Diagnostics>(diagnostics: &mut D, error: FatalConfigError) -> FatalConfigError {
    diagnostics.fatal(&error);
    error
}
