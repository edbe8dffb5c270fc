//! Configuration resolution
//!
//! Maps the `[config]` and `[wlan0]`..`[wlan9]` sections of the INI file
//! onto a [`DeviceConfig`]. Every field is looked up once, in a fixed order,
//! and either parsed or replaced by its default. Only a missing Nightscout
//! URL stops resolution.
//!
//! The glucose thresholds are resolved after `show_mgdl`: when it is set,
//! each threshold read from the file is divided by [`MGDL_PER_MMOL`].

use core::fmt::Write;

use heapless::String;
use m5ns_hal::{SectionValueLookup, SourceError, MAX_LINE_LEN};

use super::diagnostics::{DefaultReason, Diagnostics, FieldReport, Outcome, Value};
use super::error::FatalConfigError;
use super::parse::{parse_float, parse_int};
use super::types::*;

/// Section holding the scalar settings
pub const CONFIG_SECTION: &str = "config";

/// WLAN sections are this prefix followed by the slot index
pub const WLAN_SECTION_PREFIX: &str = "wlan";

/// Key names as they appear in the INI file
pub mod keys {
    pub const URL: &str = "nightscout";
    pub const TOKEN: &str = "token";
    pub const BOOT_PIC: &str = "bootpic";
    pub const USER_NAME: &str = "name";
    pub const TIME_ZONE: &str = "time_zone";
    pub const DST: &str = "dst";
    pub const SHOW_MGDL: &str = "show_mgdl";
    pub const DEFAULT_PAGE: &str = "default_page";
    pub const RESTART_AT_TIME: &str = "restart_at_time";
    pub const RESTART_AT_LOGGED_ERRORS: &str = "restart_at_logged_errors";
    pub const SHOW_CURRENT_TIME: &str = "show_current_time";
    pub const YELLOW_LOW: &str = "yellow_low";
    pub const YELLOW_HIGH: &str = "yellow_high";
    pub const RED_LOW: &str = "red_low";
    pub const RED_HIGH: &str = "red_high";
    pub const BRIGHTNESS1: &str = "brightness1";
    pub const BRIGHTNESS2: &str = "brightness2";
    pub const BRIGHTNESS3: &str = "brightness3";
    pub const INFO_LINE: &str = "info_line";
    pub const DEV_MODE: &str = "dev_mode";
    pub const WLAN_SSID: &str = "ssid";
    pub const WLAN_PASS: &str = "pass";
}

/// Section name of a WLAN slot ("wlan0".."wlan9")
pub type WlanSection = String<8>;

/// Build the section name for a WLAN slot
pub fn wlan_section(slot: usize) -> WlanSection {
    let mut name = WlanSection::new();
    // Slot indices are single digits, always fits
    let _ = write!(name, "{}{}", WLAN_SECTION_PREFIX, slot);
    name
}

/// Resolve a configuration without diagnostics
pub fn resolve<L: SectionValueLookup>(lookup: L) -> Result<DeviceConfig, FatalConfigError> {
    ConfigResolver::new(lookup, ()).resolve()
}

/// Resolve a configuration, reporting each field to `diagnostics`
pub fn resolve_with<L, D>(lookup: L, diagnostics: D) -> Result<DeviceConfig, FatalConfigError>
where
    L: SectionValueLookup,
    D: Diagnostics,
{
    ConfigResolver::new(lookup, diagnostics).resolve()
}

/// Field-by-field resolver over a section lookup
///
/// Fields are collected into locals and the record is only assembled once
/// every field has resolved, so a caller never sees a partial config.
pub struct ConfigResolver<L, D> {
    lookup: L,
    diagnostics: D,
    buffer: [u8; MAX_LINE_LEN],
}

impl<L: SectionValueLookup, D: Diagnostics> ConfigResolver<L, D> {
    pub fn new(lookup: L, diagnostics: D) -> Self {
        Self {
            lookup,
            diagnostics,
            buffer: [0u8; MAX_LINE_LEN],
        }
    }

    /// Resolve every field
    ///
    /// # Errors
    ///
    /// Returns [`FatalConfigError::MissingRequired`] if the Nightscout URL
    /// cannot be read. No other field can fail.
    pub fn resolve(mut self) -> Result<DeviceConfig, FatalConfigError> {
        let url = self.required_text::<URL_LEN>(CONFIG_SECTION, keys::URL)?;
        let token = self.text::<TOKEN_LEN>(CONFIG_SECTION, keys::TOKEN, "", true);
        let boot_pic = self.text::<BOOT_PIC_LEN>(CONFIG_SECTION, keys::BOOT_PIC, "", false);
        let user_name =
            self.text::<USER_NAME_LEN>(CONFIG_SECTION, keys::USER_NAME, DEFAULT_USER_NAME, false);
        let time_zone = self.int(keys::TIME_ZONE, DEFAULT_TIME_ZONE);
        let dst = self.int(keys::DST, DEFAULT_DST);
        let show_mgdl = self.flag(keys::SHOW_MGDL, false);
        let default_page = self.int(keys::DEFAULT_PAGE, DEFAULT_PAGE);
        let restart_at_time = self.text::<RESTART_TIME_LEN>(
            CONFIG_SECTION,
            keys::RESTART_AT_TIME,
            NO_RESTART,
            false,
        );
        let restart_at_logged_errors = self.int(
            keys::RESTART_AT_LOGGED_ERRORS,
            DEFAULT_RESTART_AT_LOGGED_ERRORS,
        );
        let show_current_time = self.flag(keys::SHOW_CURRENT_TIME, false);

        // Must follow show_mgdl
        let yellow_low = self.threshold(keys::YELLOW_LOW, DEFAULT_YELLOW_LOW, show_mgdl);
        let yellow_high = self.threshold(keys::YELLOW_HIGH, DEFAULT_YELLOW_HIGH, show_mgdl);
        let red_low = self.threshold(keys::RED_LOW, DEFAULT_RED_LOW, show_mgdl);
        let red_high = self.threshold(keys::RED_HIGH, DEFAULT_RED_HIGH, show_mgdl);

        let brightness1 = self.brightness(keys::BRIGHTNESS1, DEFAULT_BRIGHTNESS1);
        let brightness2 = self.brightness(keys::BRIGHTNESS2, DEFAULT_BRIGHTNESS2);
        let brightness3 = self.brightness(keys::BRIGHTNESS3, DEFAULT_BRIGHTNESS3);

        let info_line = self.info_line();
        let dev_mode = self.flag(keys::DEV_MODE, false);

        let wlan = core::array::from_fn(|slot| self.wlan_slot(slot));

        Ok(DeviceConfig {
            url,
            token,
            boot_pic,
            user_name,
            time_zone,
            dst,
            show_mgdl,
            default_page,
            restart_at_time,
            restart_at_logged_errors,
            show_current_time,
            yellow_low,
            yellow_high,
            red_low,
            red_high,
            brightness1,
            brightness2,
            brightness3,
            info_line,
            dev_mode,
            wlan,
        })
    }

    /// Fetch a raw value into the line buffer, returning its length
    fn fetch(&mut self, section: &str, key: &str) -> Result<usize, SourceError> {
        let len = self.lookup.get_value(section, key, &mut self.buffer)?;
        // Never trust the lookup to stay inside the buffer
        Ok(len.min(self.buffer.len()))
    }

    fn report(
        &mut self,
        section: &str,
        key: &'static str,
        value: Value<'_>,
        outcome: Outcome,
        secret: bool,
    ) {
        self.diagnostics.field(&FieldReport {
            section,
            key,
            value,
            outcome,
            secret,
        });
    }

    fn required_text<const N: usize>(
        &mut self,
        section: &'static str,
        key: &'static str,
    ) -> Result<Text<N>, FatalConfigError> {
        match self.fetch(section, key) {
            Ok(len) => {
                let text = Text::from_bytes(&self.buffer[..len]);
                self.report(section, key, Value::Text(text.as_bytes()), Outcome::Read, false);
                Ok(text)
            }
            Err(cause) => {
                let error = FatalConfigError::MissingRequired {
                    section,
                    key,
                    cause,
                };
                self.diagnostics.fatal(&error);
                Err(error)
            }
        }
    }

    fn text<const N: usize>(
        &mut self,
        section: &str,
        key: &'static str,
        default: &str,
        secret: bool,
    ) -> Text<N> {
        let (text, outcome) = match self.fetch(section, key) {
            Ok(len) => (Text::from_bytes(&self.buffer[..len]), Outcome::Read),
            Err(e) => (
                Text::from_bytes(default.as_bytes()),
                Outcome::Defaulted(DefaultReason::from_lookup(e)),
            ),
        };
        self.report(section, key, Value::Text(text.as_bytes()), outcome, secret);
        text
    }

    /// Look up and parse a numeric `[config]` value
    ///
    /// Falls back to `default` when the key is absent, has no numeric
    /// prefix, or fails `valid`.
    fn parsed<T: Copy>(
        &mut self,
        key: &'static str,
        default: T,
        parse: fn(&[u8]) -> Option<T>,
        valid: impl Fn(T) -> bool,
    ) -> (T, Outcome) {
        let len = match self.fetch(CONFIG_SECTION, key) {
            Ok(len) => len,
            Err(e) => return (default, Outcome::Defaulted(DefaultReason::from_lookup(e))),
        };

        match parse(&self.buffer[..len]) {
            Some(value) if valid(value) => (value, Outcome::Read),
            Some(_) => (default, Outcome::Defaulted(DefaultReason::OutOfRange)),
            None => (default, Outcome::Defaulted(DefaultReason::Unparsable)),
        }
    }

    fn int(&mut self, key: &'static str, default: i32) -> i32 {
        let (value, outcome) = self.parsed(key, default, parse_int, |_| true);
        self.report(CONFIG_SECTION, key, Value::Int(value), outcome, false);
        value
    }

    /// Integer flag, any non-zero value is set
    fn flag(&mut self, key: &'static str, default: bool) -> bool {
        let (value, outcome) =
            self.parsed(key, default, |s: &[u8]| parse_int(s).map(|n| n != 0), |_| true);
        self.report(CONFIG_SECTION, key, Value::Flag(value), outcome, false);
        value
    }

    fn threshold(&mut self, key: &'static str, default: f32, show_mgdl: bool) -> f32 {
        let (raw, outcome) = self.parsed(key, default, parse_float, |x: f32| x.is_finite());
        let value = if show_mgdl && outcome == Outcome::Read {
            raw / MGDL_PER_MMOL
        } else {
            raw
        };
        self.report(CONFIG_SECTION, key, Value::Float(value), outcome, false);
        value
    }

    fn brightness(&mut self, key: &'static str, default: u8) -> u8 {
        let range = i32::from(BRIGHTNESS_MIN)..=i32::from(BRIGHTNESS_MAX);
        let (value, outcome) =
            self.parsed(key, i32::from(default), parse_int, |n| range.contains(&n));
        let value = u8::try_from(value).unwrap_or(default);
        self.report(CONFIG_SECTION, key, Value::Int(i32::from(value)), outcome, false);
        value
    }

    fn info_line(&mut self) -> InfoLine {
        let default = InfoLine::default().as_i32();
        let (value, outcome) = self.parsed(keys::INFO_LINE, default, parse_int, |n| {
            InfoLine::from_i32(n).is_some()
        });
        self.report(CONFIG_SECTION, keys::INFO_LINE, Value::Int(value), outcome, false);
        InfoLine::from_i32(value).unwrap_or_default()
    }

    fn wlan_slot(&mut self, slot: usize) -> WlanCredential {
        let section = wlan_section(slot);
        let ssid = self.text::<WLAN_FIELD_LEN>(&section, keys::WLAN_SSID, "", false);
        let pass = self.text::<WLAN_FIELD_LEN>(&section, keys::WLAN_PASS, "", true);
        WlanCredential { ssid, pass }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m5ns_hal::memory::Entry;
    use m5ns_hal::MemorySource;
    use proptest::prelude::*;
    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    const URL: Entry<'static> = Entry::new("config", "nightscout", "https://ns.example.org");

    fn resolve_entries(entries: &[Entry<'_>]) -> Result<DeviceConfig, FatalConfigError> {
        resolve(MemorySource::new(entries))
    }

    /// Collects every report as (section, key, outcome)
    #[derive(Default)]
    struct Recorder {
        fields: Vec<(StdString, &'static str, Outcome)>,
        fatal: Option<FatalConfigError>,
    }

    impl Diagnostics for Recorder {
        fn field(&mut self, report: &FieldReport<'_>) {
            self.fields
                .push((report.section.into(), report.key, report.outcome));
        }

        fn fatal(&mut self, error: &FatalConfigError) {
            self.fatal = Some(*error);
        }
    }

    #[test]
    fn test_defaults_with_url_only() {
        let config = resolve_entries(&[URL]).unwrap();

        assert_eq!(config.url, "https://ns.example.org");
        assert_eq!(config.token, "");
        assert_eq!(config.boot_pic, "");
        assert_eq!(config.user_name, " ");
        assert_eq!(config.time_zone, 3600);
        assert_eq!(config.dst, 3600);
        assert!(!config.show_mgdl);
        assert_eq!(config.default_page, 0);
        assert_eq!(config.restart_at_time, "NORES");
        assert_eq!(config.restart_at_logged_errors, 0);
        assert!(!config.show_current_time);
        assert_eq!(config.yellow_low, 4.5);
        assert_eq!(config.yellow_high, 9.0);
        assert_eq!(config.red_low, 3.9);
        assert_eq!(config.red_high, 9.0);
        assert_eq!(config.brightness_levels(), [50, 100, 10]);
        assert_eq!(config.info_line, InfoLine::ButtonIcons);
        assert!(!config.dev_mode);
        assert!(config.wlan.iter().all(|w| w.ssid.is_empty() && w.pass.is_empty()));
        assert_eq!(config.restart_time(), None);
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let err = resolve(MemorySource::empty()).unwrap_err();
        assert_eq!(
            err,
            FatalConfigError::MissingRequired {
                section: "config",
                key: "nightscout",
                cause: SourceError::SectionNotFound,
            }
        );

        // Every other field present does not help
        let err = resolve_entries(&[
            Entry::new("config", "token", "abc"),
            Entry::new("config", "show_mgdl", "1"),
            Entry::new("wlan0", "ssid", "home"),
        ])
        .unwrap_err();
        assert_eq!(err.source_error(), SourceError::KeyNotFound);
    }

    #[test]
    fn test_missing_url_reports_fatal_and_nothing_else() {
        let mut recorder = Recorder::default();
        let result = resolve_with(MemorySource::empty(), &mut recorder);

        assert!(result.is_err());
        assert!(recorder.fields.is_empty());
        assert!(matches!(
            recorder.fatal,
            Some(FatalConfigError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_url_truncated_to_bound() {
        let long = "https://".to_string() + &"a".repeat(70);
        let entries = [Entry::new("config", "nightscout", &long)];
        let config = resolve_entries(&entries).unwrap();

        assert_eq!(config.url.len(), URL_LEN);
        assert!(long.as_bytes().starts_with(config.url.as_bytes()));
    }

    #[test]
    fn test_overlong_url_is_fatal() {
        // The lookup cannot hand back a value wider than its line buffer,
        // so the URL is missing rather than truncated
        let long = "https://".to_string() + &"a".repeat(90);
        let entries = [Entry::new("config", "nightscout", &long)];
        let err = resolve_entries(&entries).unwrap_err();

        assert_eq!(
            err,
            FatalConfigError::MissingRequired {
                section: "config",
                key: "nightscout",
                cause: SourceError::BufferTooSmall,
            }
        );
        assert_eq!(err.lcd_message(), "No Nightscout URL in INI file");
    }

    #[test]
    fn test_text_fields_truncated() {
        let long = "n".repeat(50);
        let entries = [
            URL,
            Entry::new("config", "name", &long),
            Entry::new("config", "restart_at_time", "04:15 daily"),
        ];
        let config = resolve_entries(&entries).unwrap();

        assert_eq!(config.user_name.len(), USER_NAME_LEN);
        assert_eq!(config.restart_at_time, "04:15 dail");
    }

    #[test]
    fn test_mgdl_thresholds_converted() {
        let config = resolve_entries(&[
            URL,
            Entry::new("config", "show_mgdl", "1"),
            Entry::new("config", "yellow_low", "81"),
            Entry::new("config", "yellow_high", "180"),
            Entry::new("config", "red_low", "72"),
            Entry::new("config", "red_high", "252"),
        ])
        .unwrap();

        assert!(config.show_mgdl);
        assert_eq!(config.yellow_low, 4.5);
        assert_eq!(config.yellow_high, 10.0);
        assert_eq!(config.red_low, 4.0);
        assert_eq!(config.red_high, 14.0);
    }

    #[test]
    fn test_mmol_thresholds_unchanged() {
        let config = resolve_entries(&[
            URL,
            Entry::new("config", "show_mgdl", "0"),
            Entry::new("config", "yellow_low", "4.5"),
        ])
        .unwrap();

        assert!(!config.show_mgdl);
        assert_eq!(config.yellow_low, 4.5);
    }

    #[test]
    fn test_mgdl_defaults_not_converted() {
        let config = resolve_entries(&[
            URL,
            Entry::new("config", "show_mgdl", "1"),
            Entry::new("config", "red_low", "n/a"),
        ])
        .unwrap();

        assert_eq!(config.yellow_low, DEFAULT_YELLOW_LOW);
        assert_eq!(config.red_low, DEFAULT_RED_LOW);
        assert_eq!(config.red_high, DEFAULT_RED_HIGH);
    }

    #[test]
    fn test_threshold_order_in_file_irrelevant() {
        // Thresholds listed before show_mgdl still get converted
        let config = resolve_entries(&[
            Entry::new("config", "yellow_low", "81"),
            URL,
            Entry::new("config", "show_mgdl", "1"),
        ])
        .unwrap();

        assert_eq!(config.yellow_low, 4.5);
    }

    #[test]
    fn test_brightness_range() {
        for raw in ["0", "150", "abc", "-5", ""] {
            let entries = [URL, Entry::new("config", "brightness1", raw)];
            let config = resolve_entries(&entries).unwrap();
            assert_eq!(config.brightness1, 50, "input {:?}", raw);
        }

        let config = resolve_entries(&[URL, Entry::new("config", "brightness1", "75")]).unwrap();
        assert_eq!(config.brightness1, 75);

        let config = resolve_entries(&[
            URL,
            Entry::new("config", "brightness2", "1"),
            Entry::new("config", "brightness3", "100"),
        ])
        .unwrap();
        assert_eq!(config.brightness2, 1);
        assert_eq!(config.brightness3, 100);
    }

    #[test]
    fn test_unparsable_numbers_use_default() {
        let config = resolve_entries(&[
            URL,
            Entry::new("config", "time_zone", "CET"),
            Entry::new("config", "dst", "7200s"),
            Entry::new("config", "default_page", "2"),
        ])
        .unwrap();

        assert_eq!(config.time_zone, DEFAULT_TIME_ZONE);
        assert_eq!(config.dst, 7200);
        assert_eq!(config.default_page, 2);
    }

    #[test]
    fn test_flags_nonzero_is_set() {
        let config = resolve_entries(&[
            URL,
            Entry::new("config", "show_current_time", "2"),
            Entry::new("config", "dev_mode", "0"),
        ])
        .unwrap();

        assert!(config.show_current_time);
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_info_line() {
        let config = resolve_entries(&[URL, Entry::new("config", "info_line", "2")]).unwrap();
        assert_eq!(config.info_line, InfoLine::LoopInfo);

        let config = resolve_entries(&[URL, Entry::new("config", "info_line", "7")]).unwrap();
        assert_eq!(config.info_line, InfoLine::ButtonIcons);
    }

    #[test]
    fn test_wlan_slots_positional() {
        let config = resolve_entries(&[URL, Entry::new("wlan3", "ssid", "Foo")]).unwrap();

        assert_eq!(config.wlan[3].ssid, "Foo");
        assert_eq!(config.wlan[3].pass, "");
        for (slot, credential) in config.wlan.iter().enumerate() {
            if slot != 3 {
                assert_eq!(credential, &WlanCredential::default(), "slot {}", slot);
            }
        }

        let networks: Vec<usize> = config.configured_networks().map(|(slot, _)| slot).collect();
        assert_eq!(networks, [3]);
    }

    #[test]
    fn test_wlan_all_slots() {
        let entries = [
            URL,
            Entry::new("wlan0", "ssid", "first"),
            Entry::new("wlan0", "pass", "one"),
            Entry::new("wlan9", "ssid", "last"),
            Entry::new("wlan9", "pass", "nine"),
            Entry::new("wlan10", "ssid", "ignored"),
        ];
        let config = resolve_entries(&entries).unwrap();

        assert_eq!(config.wlan[0].ssid, "first");
        assert_eq!(config.wlan[0].pass, "one");
        assert_eq!(config.wlan[9].ssid, "last");
        assert_eq!(config.wlan[9].pass, "nine");
        assert_eq!(config.configured_networks().count(), 2);
    }

    #[test]
    fn test_wlan_credentials_kept_byte_for_byte() {
        let entries = [
            URL,
            Entry::with_bytes("wlan0", "ssid", b"Caf\xE9Net"),
            Entry::with_bytes("wlan0", "pass", b"p\xE4ssw\xF6rd!"),
            Entry::with_bytes("config", "name", b"J\xF6rg"),
        ];
        let config = resolve_entries(&entries).unwrap();

        assert_eq!(config.wlan[0].ssid.as_bytes(), b"Caf\xE9Net");
        assert_eq!(config.wlan[0].ssid.len(), 7);
        assert_eq!(config.wlan[0].pass.as_bytes(), b"p\xE4ssw\xF6rd!");
        assert_eq!(config.wlan[0].pass.len(), 9);
        assert_eq!(config.user_name.as_bytes(), b"J\xF6rg");
    }

    #[test]
    fn test_wlan_section_names() {
        assert_eq!(wlan_section(0).as_str(), "wlan0");
        assert_eq!(wlan_section(9).as_str(), "wlan9");
    }

    #[test]
    fn test_report_order_and_outcomes() {
        let mut recorder = Recorder::default();
        resolve_with(
            MemorySource::new(&[
                URL,
                Entry::new("config", "brightness1", "500"),
                Entry::new("config", "time_zone", "x"),
            ]),
            &mut recorder,
        )
        .unwrap();

        // 20 scalar fields plus ssid/pass for ten slots
        assert_eq!(recorder.fields.len(), 20 + 2 * WLAN_SLOTS);
        assert_eq!(recorder.fields[0].1, "nightscout");
        assert_eq!(recorder.fields[0].2, Outcome::Read);

        let show_mgdl = recorder.fields.iter().position(|f| f.1 == "show_mgdl");
        let yellow_low = recorder.fields.iter().position(|f| f.1 == "yellow_low");
        assert!(show_mgdl < yellow_low);

        let outcome_of = |key: &str| {
            recorder
                .fields
                .iter()
                .find(|f| f.1 == key)
                .map(|f| f.2)
                .unwrap()
        };
        assert_eq!(
            outcome_of("brightness1"),
            Outcome::Defaulted(DefaultReason::OutOfRange)
        );
        assert_eq!(
            outcome_of("time_zone"),
            Outcome::Defaulted(DefaultReason::Unparsable)
        );
        assert_eq!(
            outcome_of("token"),
            Outcome::Defaulted(DefaultReason::Absent(SourceError::KeyNotFound))
        );

        let last = recorder.fields.last().unwrap();
        assert_eq!(last.0, "wlan9");
        assert_eq!(last.1, "pass");
        assert!(recorder.fatal.is_none());
    }

    #[test]
    fn test_unreadable_optional_value_defaults() {
        // A value longer than the line buffer reads as absent
        let long = "x".repeat(MAX_LINE_LEN + 1);
        let entries = [URL, Entry::new("config", "token", &long)];
        let mut recorder = Recorder::default();
        let config = resolve_with(MemorySource::new(&entries), &mut recorder).unwrap();
        assert_eq!(config.token, "");

        let token = recorder.fields.iter().find(|f| f.1 == "token").unwrap();
        assert_eq!(
            token.2,
            Outcome::Defaulted(DefaultReason::Unreadable(SourceError::BufferTooSmall))
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let entries = [
            URL,
            Entry::new("config", "show_mgdl", "1"),
            Entry::new("config", "red_high", "250"),
            Entry::new("wlan2", "ssid", "cafe"),
        ];
        let first = resolve_entries(&entries).unwrap();
        let second = resolve_entries(&entries).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.red_high.to_bits(), second.red_high.to_bits());
    }

    proptest! {
        #[test]
        fn prop_brightness_always_in_range(raw in "\\PC{0,12}") {
            let entries = [
                URL,
                Entry::new("config", "brightness1", &raw),
                Entry::new("config", "brightness2", &raw),
                Entry::new("config", "brightness3", &raw),
            ];
            let config = resolve_entries(&entries).unwrap();
            for level in config.brightness_levels() {
                prop_assert!((BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&level));
            }
        }

        #[test]
        fn prop_any_url_resolves_within_bound(url in "[a-z0-9:/.]{0,80}") {
            let entries = [Entry::new("config", "nightscout", &url)];
            let config = resolve_entries(&entries).unwrap();
            prop_assert!(config.url.len() <= URL_LEN);
            prop_assert!(url.as_bytes().starts_with(config.url.as_bytes()));
        }

        #[test]
        fn prop_mgdl_conversion(value in 20u16..600) {
            let text = value.to_string();
            let entries = [
                URL,
                Entry::new("config", "show_mgdl", "1"),
                Entry::new("config", "red_high", &text),
            ];
            let config = resolve_entries(&entries).unwrap();
            prop_assert_eq!(config.red_high, f32::from(value) / MGDL_PER_MMOL);
        }
    }
}
