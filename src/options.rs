// src/options.rs

//! Binary-shape options and their normalization
//!
//! Two switches control the shape of the produced library:
//! - `shared`: produce a dynamically linked artifact
//! - `fPIC`: generate position-independent code
//!
//! `fPIC` has no meaning on Windows, and is implied for shared libraries, so
//! [`BinaryOptions`] drops it in both cases. The normalized type keeps its
//! fields private: once constructed, `fPIC` cannot be reintroduced.

use crate::error::{Error, Result};
use crate::settings::{Os, Settings};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default for `shared` when neither recipe nor profile sets it
pub const DEFAULT_SHARED: bool = false;
/// Default for `fPIC` when neither recipe nor profile sets it
pub const DEFAULT_FPIC: bool = true;

/// Requested option values, before normalization
///
/// Unset values fall through to the next layer (recipe defaults, then the
/// built-in defaults above).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,

    #[serde(default, rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
}

impl OptionValues {
    /// Set a single option from its textual form (`shared=True`, `fPIC=false`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed = parse_bool(value).ok_or_else(|| {
            Error::ConfigurationError(format!(
                "Invalid value '{}' for option '{}': expected true or false",
                value, key
            ))
        })?;

        match key.trim() {
            "shared" => self.shared = Some(parsed),
            "fPIC" | "fpic" => self.fpic = Some(parsed),
            other => {
                return Err(Error::ConfigurationError(format!(
                    "Unknown option '{}' (valid options: shared, fPIC)",
                    other
                )));
            }
        }
        Ok(())
    }

    /// Layer `overrides` on top of these values
    pub fn overlay(self, overrides: OptionValues) -> OptionValues {
        OptionValues {
            shared: overrides.shared.or(self.shared),
            fpic: overrides.fpic.or(self.fpic),
        }
    }
}

/// Check an `[options]` table before it is deserialized
///
/// Unknown keys and non-boolean values are configuration errors, the same
/// as for [`OptionValues::set`].
pub(crate) fn check_option_table(table: &toml::Table) -> Result<()> {
    for (key, value) in table {
        if !matches!(key.as_str(), "shared" | "fPIC") {
            return Err(Error::ConfigurationError(format!(
                "Unknown option '{}' (valid options: shared, fPIC)",
                key
            )));
        }
        if value.as_bool().is_none() {
            return Err(Error::ConfigurationError(format!(
                "Invalid value '{}' for option '{}': expected true or false",
                value, key
            )));
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Normalized options for one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinaryOptions {
    shared: bool,

    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    fpic: Option<bool>,
}

impl BinaryOptions {
    /// Normalize requested values against the target settings
    ///
    /// Applies [`prune_for_platform`](Self::prune_for_platform) and then
    /// [`prune_for_shared`](Self::prune_for_shared).
    pub fn new(settings: &Settings, requested: OptionValues) -> Self {
        let mut options = Self {
            shared: requested.shared.unwrap_or(DEFAULT_SHARED),
            fpic: Some(requested.fpic.unwrap_or(DEFAULT_FPIC)),
        };
        options.prune_for_platform(settings.os);
        options.prune_for_shared();
        options
    }

    /// Drop `fPIC` when targeting Windows
    ///
    /// Returns whether the option was removed by this call.
    pub fn prune_for_platform(&mut self, os: Os) -> bool {
        if os.is_windows() && self.fpic.take().is_some() {
            debug!("Removed fPIC: not applicable on {}", os);
            return true;
        }
        false
    }

    /// Drop `fPIC` when building a shared library
    ///
    /// Returns whether the option was removed by this call.
    pub fn prune_for_shared(&mut self) -> bool {
        if self.shared && self.fpic.take().is_some() {
            debug!("Removed fPIC: implied by shared=true");
            return true;
        }
        false
    }

    pub fn shared(&self) -> bool {
        self.shared
    }

    /// `None` when the option does not exist for this configuration
    pub fn fpic(&self) -> Option<bool> {
        self.fpic
    }

    /// Whether `fPIC` is part of the valid option set
    pub fn has_fpic(&self) -> bool {
        self.fpic.is_some()
    }

    /// Canonical `key=value` pairs, omitting removed options
    pub fn canonical_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(fpic) = self.fpic {
            pairs.push(("options.fPIC", fpic.to_string()));
        }
        pairs.push(("options.shared", self.shared.to_string()));
        pairs
    }
}

impl fmt::Display for BinaryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shared={}", self.shared)?;
        if let Some(fpic) = self.fpic {
            write!(f, " fPIC={}", fpic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BuildType, Compiler};

    fn settings(os: Os) -> Settings {
        let compiler = if os.is_windows() { Compiler::Msvc } else { Compiler::Gcc };
        Settings::new(os, compiler, BuildType::Release)
    }

    fn requested(shared: Option<bool>, fpic: Option<bool>) -> OptionValues {
        OptionValues { shared, fpic }
    }

    #[test]
    fn test_defaults_on_linux() {
        let options = BinaryOptions::new(&settings(Os::Linux), OptionValues::default());
        assert!(!options.shared());
        assert_eq!(options.fpic(), Some(true));
    }

    #[test]
    fn test_windows_never_has_fpic() {
        for shared in [None, Some(false), Some(true)] {
            for fpic in [None, Some(false), Some(true)] {
                let options = BinaryOptions::new(&settings(Os::Windows), requested(shared, fpic));
                assert!(!options.has_fpic(), "shared={:?} fpic={:?}", shared, fpic);
            }
        }
    }

    #[test]
    fn test_shared_never_has_fpic() {
        for os in [Os::Linux, Os::Macos, Os::FreeBsd, Os::Android, Os::Ios, Os::Windows] {
            for fpic in [None, Some(false), Some(true)] {
                let options = BinaryOptions::new(&settings(os), requested(Some(true), fpic));
                assert!(options.shared());
                assert!(!options.has_fpic(), "os={} fpic={:?}", os, fpic);
            }
        }
    }

    #[test]
    fn test_static_non_windows_keeps_input_value() {
        for os in [Os::Linux, Os::Macos, Os::FreeBsd, Os::Android, Os::Ios] {
            let on = BinaryOptions::new(&settings(os), requested(Some(false), Some(true)));
            let off = BinaryOptions::new(&settings(os), requested(Some(false), Some(false)));
            assert_eq!(on.fpic(), Some(true));
            assert_eq!(off.fpic(), Some(false));
        }
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let mut options = BinaryOptions::new(&settings(Os::Windows), requested(Some(true), Some(true)));
        let snapshot = options;

        assert!(!options.prune_for_platform(Os::Windows));
        assert!(!options.prune_for_shared());
        assert_eq!(options, snapshot);
    }

    #[test]
    fn test_prune_reports_removal_once() {
        let mut options = BinaryOptions {
            shared: true,
            fpic: Some(true),
        };
        assert!(options.prune_for_shared());
        assert!(!options.prune_for_shared());
        assert!(!options.prune_for_platform(Os::Linux));
        assert!(options.shared());
    }

    #[test]
    fn test_set_from_text() {
        let mut values = OptionValues::default();
        values.set("shared", "True").unwrap();
        values.set("fPIC", "0").unwrap();
        assert_eq!(values, requested(Some(true), Some(false)));

        assert!(matches!(
            values.set("lto", "true"),
            Err(Error::ConfigurationError(_))
        ));
        assert!(matches!(
            values.set("shared", "maybe"),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_overlay_prefers_overrides() {
        let defaults = requested(Some(false), Some(true));
        let merged = defaults.overlay(requested(Some(true), None));
        assert_eq!(merged, requested(Some(true), Some(true)));
    }

    #[test]
    fn test_serialize_omits_removed_fpic() {
        let options = BinaryOptions::new(&settings(Os::Linux), requested(Some(true), Some(true)));
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"shared":true}"#);

        let options = BinaryOptions::new(&settings(Os::Linux), OptionValues::default());
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"shared":false,"fPIC":true}"#);
    }

    #[test]
    fn test_display() {
        let options = BinaryOptions::new(&settings(Os::Linux), OptionValues::default());
        assert_eq!(options.to_string(), "shared=false fPIC=true");
    }
}
