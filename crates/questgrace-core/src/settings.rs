//! Plain `key=value` settings source.
//!
//! Five numeric overrides, read once at startup. Unrecognized keys and
//! values that do not parse as numbers are skipped without a user-visible
//! diagnostic; a missing file means built-in defaults apply.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::grace::{GraceProfile, GraceThresholds};

pub const KEY_POI_TIMEOUT: &str = "PoiTimeout";
pub const KEY_POI_TIMEOUT_HOT: &str = "PoiTimeoutHot";
pub const KEY_AREA_TIMEOUT: &str = "AreaTimeout";
pub const KEY_AREA_TIMEOUT_HOT: &str = "AreaTimeoutHot";
pub const KEY_POI_OUT_ZONE_MULTIPLIER: &str = "PoiOutZoneMultiplier";

/// The mod's configuration surface: two timeout pairs plus the POI
/// out-zone shrink multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub poi_timeout: f64,
    pub poi_timeout_hot: f64,
    pub area_timeout: f64,
    pub area_timeout_hot: f64,
    pub poi_out_zone_multiplier: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poi_timeout: 10.05,
            poi_timeout_hot: 5.0,
            area_timeout: 10.05,
            area_timeout_hot: 5.0,
            poi_out_zone_multiplier: 0.33,
        }
    }
}

impl Settings {
    /// Parse `key=value` lines over the built-in defaults.
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<f64>() else {
                tracing::trace!(line, "skipping malformed settings line");
                continue;
            };
            match key.trim() {
                KEY_POI_TIMEOUT => settings.poi_timeout = value,
                KEY_POI_TIMEOUT_HOT => settings.poi_timeout_hot = value,
                KEY_AREA_TIMEOUT => settings.area_timeout = value,
                KEY_AREA_TIMEOUT_HOT => settings.area_timeout_hot = value,
                KEY_POI_OUT_ZONE_MULTIPLIER => settings.poi_out_zone_multiplier = value,
                other => tracing::trace!(key = other, "skipping unrecognized settings key"),
            }
        }
        settings
    }

    /// Load from disk. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from disk, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// The per-kind threshold table these settings describe.
    pub fn profile(&self) -> GraceProfile {
        GraceProfile {
            poi: GraceThresholds::new(self.poi_timeout, self.poi_timeout_hot),
            area: GraceThresholds::new(self.area_timeout, self.area_timeout_hot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    #[test]
    fn parse_applies_overrides() {
        let settings = Settings::parse(indoc! {"
            PoiTimeout = 30.1
            PoiTimeoutHot=10
            AreaTimeout = 12
        "});
        assert_eq!(settings.poi_timeout, 30.1);
        assert_eq!(settings.poi_timeout_hot, 10.0);
        assert_eq!(settings.area_timeout, 12.0);
        // Untouched keys keep their defaults.
        assert_eq!(settings.area_timeout_hot, 5.0);
        assert_eq!(settings.poi_out_zone_multiplier, 0.33);
    }

    #[test]
    fn malformed_value_is_ignored() {
        let settings = Settings::parse("PoiTimeout=abc\n");
        assert_eq!(settings.poi_timeout, 10.05);
    }

    #[test]
    fn unrecognized_key_is_ignored() {
        let settings = Settings::parse("SomethingElse=3\nPoiTimeoutHot=7\n");
        assert_eq!(settings, Settings {
            poi_timeout_hot: 7.0,
            ..Settings::default()
        });
    }

    #[test]
    fn lines_without_equals_are_ignored() {
        let settings = Settings::parse("just a note\n\nPoiTimeout=4\n");
        assert_eq!(settings.poi_timeout, 4.0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(&dir.path().join("settings.txt")).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_reads_file_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.txt");
        std::fs::write(&path, "AreaTimeoutHot=2.5\n").expect("write");
        let settings = Settings::load(&path).expect("load");
        assert_eq!(settings.area_timeout_hot, 2.5);
    }

    #[test]
    fn profile_maps_pairs_by_kind() {
        let settings = Settings {
            poi_timeout: 30.1,
            poi_timeout_hot: 10.0,
            area_timeout: 12.0,
            area_timeout_hot: 4.0,
            poi_out_zone_multiplier: 0.33,
        };
        let profile = settings.profile();
        assert_eq!(profile.poi, GraceThresholds::new(30.1, 10.0));
        assert_eq!(profile.area, GraceThresholds::new(12.0, 4.0));
    }

    proptest! {
        #[test]
        fn parse_never_panics(text in ".{0,256}") {
            let _ = Settings::parse(&text);
        }

        #[test]
        fn junk_lines_leave_defaults_untouched(junk in "[a-z ]{0,32}") {
            prop_assert_eq!(Settings::parse(&junk), Settings::default());
        }
    }
}
