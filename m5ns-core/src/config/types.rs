//! Configuration type definitions
//!
//! These types represent the resolved device configuration. A
//! [`DeviceConfig`] is built once at boot from the INI file on the SD card
//! and read by the rest of the application afterwards.

use core::fmt::{self, Write};

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nightscout URL length
pub const URL_LEN: usize = 64;

/// API token length
pub const TOKEN_LEN: usize = 32;

/// Boot picture path length
pub const BOOT_PIC_LEN: usize = 64;

/// User name length
pub const USER_NAME_LEN: usize = 32;

/// Restart time text length ("HH:MM" or the no-restart sentinel)
pub const RESTART_TIME_LEN: usize = 10;

/// SSID and passphrase length
pub const WLAN_FIELD_LEN: usize = 32;

/// Number of WLAN credential slots
pub const WLAN_SLOTS: usize = 10;

/// Glucose conversion factor between mg/dL and mmol/L
pub const MGDL_PER_MMOL: f32 = 18.0;

/// Restart time value meaning "never restart on a schedule"
pub const NO_RESTART: &str = "NORES";

/// Default user name shown when none is configured
pub const DEFAULT_USER_NAME: &str = " ";

pub const DEFAULT_TIME_ZONE: i32 = 3600;
pub const DEFAULT_DST: i32 = 3600;
pub const DEFAULT_PAGE: i32 = 0;
pub const DEFAULT_RESTART_AT_LOGGED_ERRORS: i32 = 0;

pub const DEFAULT_YELLOW_LOW: f32 = 4.5;
pub const DEFAULT_YELLOW_HIGH: f32 = 9.0;
pub const DEFAULT_RED_LOW: f32 = 3.9;
pub const DEFAULT_RED_HIGH: f32 = 9.0;

/// Valid brightness range (percent)
pub const BRIGHTNESS_MIN: u8 = 1;
pub const BRIGHTNESS_MAX: u8 = 100;

pub const DEFAULT_BRIGHTNESS1: u8 = 50;
pub const DEFAULT_BRIGHTNESS2: u8 = 100;
pub const DEFAULT_BRIGHTNESS3: u8 = 10;

/// Text value copied verbatim from the configuration file
///
/// Holds at most `N` raw bytes. The file is not required to be UTF-8
/// (editors on Windows often save Latin-1), so the bytes are kept as read
/// and the only cut is at the byte bound, even inside a multi-byte
/// character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Text<const N: usize>(Vec<u8, N>);

impl<const N: usize> Text<N> {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Copy `bytes`, dropping everything past the first `N`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = Vec::new();
        // Cannot overflow: the slice is cut to N
        let _ = buf.extend_from_slice(&bytes[..bytes.len().min(N)]);
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The value as a string slice, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> PartialEq<str> for Text<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for Text<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// Renders lossily, invalid sequences become U+FFFD
impl<const N: usize> fmt::Display for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Lossy(self.as_bytes()), f)
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Text<N> {
    fn format(&self, f: defmt::Formatter) {
        match self.as_str() {
            Some(text) => defmt::write!(f, "{=str}", text),
            None => defmt::write!(f, "{=[u8]}", self.as_bytes()),
        }
    }
}

/// Display adapter for raw bytes that may not be UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lossy<'a>(pub &'a [u8]);

impl fmt::Display for Lossy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        loop {
            match core::str::from_utf8(rest) {
                Ok(valid) => return f.write_str(valid),
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // valid_up_to() always lands on a boundary
                    f.write_str(core::str::from_utf8(valid).unwrap_or_default())?;
                    f.write_char(char::REPLACEMENT_CHARACTER)?;
                    let skip = e.error_len().unwrap_or(after.len());
                    rest = &after[skip..];
                }
            }
        }
    }
}

/// Content of the bottom status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum InfoLine {
    /// Sensor information
    SensorInfo = 0,
    /// Button function icons
    #[default]
    ButtonIcons = 1,
    /// Loop information and basal
    LoopInfo = 2,
}

impl InfoLine {
    /// Convert the configured integer, rejecting unknown modes
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(InfoLine::SensorInfo),
            1 => Some(InfoLine::ButtonIcons),
            2 => Some(InfoLine::LoopInfo),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// One WLAN network the device may join
///
/// Both fields are empty when the slot is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WlanCredential {
    pub ssid: Text<WLAN_FIELD_LEN>,
    pub pass: Text<WLAN_FIELD_LEN>,
}

impl WlanCredential {
    /// Whether this slot names a network
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

/// Glucose thresholds in the internal (mmol/L comparable) unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlucoseThresholds {
    pub yellow_low: f32,
    pub yellow_high: f32,
    pub red_low: f32,
    pub red_high: f32,
}

/// Scheduled daily restart time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RestartTime {
    pub hour: u8,
    pub minute: u8,
}

impl RestartTime {
    /// Parse strict "HH:MM" (24h clock)
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }

        let two_digits = |hi: u8, lo: u8| -> Option<u8> {
            if hi.is_ascii_digit() && lo.is_ascii_digit() {
                Some((hi - b'0') * 10 + (lo - b'0'))
            } else {
                None
            }
        };

        let hour = two_digits(bytes[0], bytes[1])?;
        let minute = two_digits(bytes[3], bytes[4])?;
        if hour > 23 || minute > 59 {
            return None;
        }

        Some(Self { hour, minute })
    }
}

/// Resolved device configuration
///
/// Every field is populated, either from the INI file or from its
/// documented default. There is no `Default` impl: a configuration without
/// a Nightscout URL does not exist.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Nightscout base URL
    pub url: Text<URL_LEN>,
    /// API security token (empty if unset)
    pub token: Text<TOKEN_LEN>,
    /// Boot picture path (empty if unset)
    pub boot_pic: Text<BOOT_PIC_LEN>,
    /// Display name
    pub user_name: Text<USER_NAME_LEN>,
    /// Time zone offset (seconds)
    pub time_zone: i32,
    /// Daylight saving offset (seconds)
    pub dst: i32,
    /// Thresholds were given in mg/dL
    pub show_mgdl: bool,
    /// Page shown after startup
    pub default_page: i32,
    /// Daily restart time, "HH:MM" or [`NO_RESTART`]
    pub restart_at_time: Text<RESTART_TIME_LEN>,
    /// Restart after this many logged errors (0 = never)
    pub restart_at_logged_errors: i32,
    /// Show the current clock instead of the last reading time
    pub show_current_time: bool,
    pub yellow_low: f32,
    pub yellow_high: f32,
    pub red_low: f32,
    pub red_high: f32,
    /// Backlight levels (percent, 1..=100)
    pub brightness1: u8,
    pub brightness2: u8,
    pub brightness3: u8,
    pub info_line: InfoLine,
    /// Developer mode
    pub dev_mode: bool,
    /// WLAN credentials, slot `i` comes from section `wlan<i>`
    pub wlan: [WlanCredential; WLAN_SLOTS],
}

impl DeviceConfig {
    /// Glucose thresholds as a group
    pub fn thresholds(&self) -> GlucoseThresholds {
        GlucoseThresholds {
            yellow_low: self.yellow_low,
            yellow_high: self.yellow_high,
            red_low: self.red_low,
            red_high: self.red_high,
        }
    }

    /// Brightness steps cycled by the brightness button
    pub fn brightness_levels(&self) -> [u8; 3] {
        [self.brightness1, self.brightness2, self.brightness3]
    }

    /// Scheduled restart, if one is configured and well-formed
    pub fn restart_time(&self) -> Option<RestartTime> {
        if self.restart_at_time == NO_RESTART {
            return None;
        }
        self.restart_at_time.as_str().and_then(RestartTime::parse)
    }

    /// Configured networks in slot order, with their slot index
    pub fn configured_networks(&self) -> impl Iterator<Item = (usize, &WlanCredential)> {
        self.wlan
            .iter()
            .enumerate()
            .filter(|(_, credential)| credential.is_configured())
    }
}
