// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML file declaring the identity of a native library, the
//! pinned packages it needs, the defaults of its binary-shape options and
//! what downstream consumers link against.

use crate::error::{Error, Result};
use crate::options::OptionValues;
use crate::recipe::reference::{PackageReference, is_valid_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete recipe for building a package
///
/// Parsed once and treated as an immutable value afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Package identity and metadata
    pub package: PackageSection,

    /// Pinned library and tool requirements
    #[serde(default)]
    pub requires: RequiresSection,

    /// Option defaults declared by the recipe
    #[serde(default)]
    pub options: OptionValues,

    /// Sources shipped next to the recipe
    #[serde(default)]
    pub sources: SourcesSection,

    /// Linkage metadata exported to consumers
    #[serde(default)]
    pub package_info: PackageInfoSection,
}

impl Recipe {
    /// Parsed library requirements
    pub fn requirements(&self) -> Result<Vec<PackageReference>> {
        self.requires.packages.iter().map(|r| r.parse()).collect()
    }

    /// Parsed build tool requirements
    pub fn tool_requirements(&self) -> Result<Vec<PackageReference>> {
        self.requires.tools.iter().map(|r| r.parse()).collect()
    }

    /// Libraries consumers link against (defaults to the package name)
    pub fn consumer_libs(&self) -> Vec<String> {
        if self.package_info.libs.is_empty() {
            vec![self.package.name.clone()]
        } else {
            self.package_info.libs.clone()
        }
    }

    /// `name/version` of this package
    pub fn reference(&self) -> String {
        format!("{}/{}", self.package.name, self.package.version)
    }

    /// Check that name and version can be used as path components
    pub fn check_identity(&self) -> Result<()> {
        let name = &self.package.name;
        if !is_valid_name(name) {
            return Err(Error::ConfigurationError(format!(
                "Invalid package name '{}'",
                name
            )));
        }

        let version = &self.package.version;
        if version.is_empty()
            || version == "."
            || version == ".."
            || version
                .chars()
                .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(Error::ConfigurationError(format!(
                "Invalid package version '{}'",
                version
            )));
        }
        Ok(())
    }
}

/// Package metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Full description
    #[serde(default)]
    pub description: Option<String>,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Recipe repository URL
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    /// What the package produces
    #[serde(default, rename = "type")]
    pub package_type: PackageType,
}

/// Classification of the package output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// A library; static or shared depending on the `shared` option
    #[default]
    Library,
    /// An executable
    Application,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Library => "library",
            PackageType::Application => "application",
        }
    }

    /// Concrete type once the `shared` option is known
    pub fn resolve(&self, shared: bool) -> ResolvedPackageType {
        match (self, shared) {
            (PackageType::Application, _) => ResolvedPackageType::Application,
            (PackageType::Library, true) => ResolvedPackageType::SharedLibrary,
            (PackageType::Library, false) => ResolvedPackageType::StaticLibrary,
        }
    }
}

/// Package type after option normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedPackageType {
    StaticLibrary,
    SharedLibrary,
    Application,
}

impl ResolvedPackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedPackageType::StaticLibrary => "static-library",
            ResolvedPackageType::SharedLibrary => "shared-library",
            ResolvedPackageType::Application => "application",
        }
    }
}

impl fmt::Display for ResolvedPackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requirements section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RequiresSection {
    /// Libraries linked by this package
    ///
    /// Format: `["ffmpeg/7.0.1"]`, exact versions only
    #[serde(default)]
    pub packages: Vec<String>,

    /// Tools needed to build (build generator, build executor)
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Sources exported with the recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    /// Glob patterns relative to the recipe directory
    #[serde(default)]
    pub exports: Vec<String>,
}

/// Consumer linkage section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PackageInfoSection {
    /// Library names consumers link against
    #[serde(default)]
    pub libs: Vec<String>,
}
