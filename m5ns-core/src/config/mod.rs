//! Device configuration
//!
//! Resolution of the SD card INI file into a [`DeviceConfig`], plus the
//! loader, diagnostics, and snapshot support around it.

pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod parse;
pub mod resolver;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod types;

pub use diagnostics::{
    DefaultReason, Diagnostics, FieldReport, LineDiagnostics, Outcome, Severity, Value,
};
#[cfg(feature = "defmt")]
pub use diagnostics::DefmtDiagnostics;
pub use error::FatalConfigError;
pub use loader::{ConfigLoader, CONFIG_PATH};
pub use resolver::{resolve, resolve_with, ConfigResolver, CONFIG_SECTION, WLAN_SECTION_PREFIX};
#[cfg(feature = "serde")]
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotError, SNAPSHOT_MAX_SIZE};
pub use types::*;
