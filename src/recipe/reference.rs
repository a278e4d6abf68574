// src/recipe/reference.rs

//! Pinned package references (`name/version`)

use crate::error::{Error, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// A requirement on an exact version of another package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageReference {
    pub name: String,
    pub version: Version,
}

impl FromStr for PackageReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, version) = s.trim().split_once('/').ok_or_else(|| {
            Error::ParseError(format!("Invalid reference '{}': expected name/version", s))
        })?;

        if !is_valid_name(name) {
            return Err(Error::ParseError(format!(
                "Invalid package name '{}' in reference '{}'",
                name, s
            )));
        }

        // Ranges and wildcards are resolved by the package manager, never here
        if version.starts_with('[') || version.contains('*') {
            return Err(Error::ParseError(format!(
                "Version ranges are not supported in '{}': pin an exact version",
                s
            )));
        }

        let version = Version::parse(version).map_err(|e| {
            Error::ParseError(format!("Invalid version in reference '{}': {}", s, e))
        })?;

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Package names: lowercase ASCII letters, digits, `_`, `-`, `.`, `+`
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 101
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '+')
        })
}
