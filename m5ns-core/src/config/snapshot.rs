//! Binary configuration snapshots
//!
//! A resolved [`DeviceConfig`] serialized with postcard. Used to hand the
//! configuration to other tasks and to compare two resolutions byte for
//! byte.

use super::types::{DeviceConfig, BRIGHTNESS_MAX, BRIGHTNESS_MIN};

/// Upper bound on an encoded snapshot
pub const SNAPSHOT_MAX_SIZE: usize = 1024;

/// Snapshot codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SnapshotError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Decoded data violates a config invariant
    Invalid,
}

/// Encode a configuration into `buffer`
///
/// Returns the used prefix of `buffer`.
pub fn encode_snapshot<'b>(
    config: &DeviceConfig,
    buffer: &'b mut [u8],
) -> Result<&'b mut [u8], SnapshotError> {
    postcard::to_slice(config, buffer).map_err(|_| SnapshotError::Serialize)
}

/// Decode a configuration previously written by [`encode_snapshot`]
pub fn decode_snapshot(bytes: &[u8]) -> Result<DeviceConfig, SnapshotError> {
    let config: DeviceConfig =
        postcard::from_bytes(bytes).map_err(|_| SnapshotError::Deserialize)?;

    let brightness_ok = config
        .brightness_levels()
        .iter()
        .all(|level| (BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(level));
    if !brightness_ok {
        return Err(SnapshotError::Invalid);
    }

    Ok(config)
}
