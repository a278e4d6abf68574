// src/profile.rs

//! Build profiles
//!
//! A profile supplies everything the recipe does not decide for itself:
//! target settings, option overrides, compiler executables and the prefixes
//! of dependencies already resolved by the package manager.
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! compiler = "gcc"
//! compiler_version = "13"
//! build_type = "Release"
//!
//! [options]
//! shared = false
//!
//! [dependencies.ffmpeg]
//! prefix = "/opt/ffmpeg-7.0.1"
//! components = ["libavcodec", "libavformat", "libavutil"]
//! ```

use crate::error::{Error, Result};
use crate::options::{OptionValues, check_option_table};
use crate::settings::{parse_setting, Settings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A complete build profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub settings: SettingsSection,

    #[serde(default)]
    pub options: OptionValues,

    #[serde(default)]
    pub tools: ToolsSection,

    /// Resolved dependencies keyed by package name
    #[serde(default)]
    pub dependencies: BTreeMap<String, ResolvedDependency>,
}

/// Raw settings as written in a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    pub build_type: Option<String>,
}

/// Compiler executable overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsSection {
    pub cc: Option<String>,
    pub cxx: Option<String>,
}

/// A dependency already installed by the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedDependency {
    /// Install prefix of the dependency
    pub prefix: PathBuf,

    /// Libraries provided by the dependency, one pkg-config module each
    #[serde(default)]
    pub components: Vec<String>,

    /// Header directory relative to the prefix
    #[serde(default = "default_include_dir")]
    pub include_dir: String,

    /// Library directory relative to the prefix
    #[serde(default = "default_lib_dir")]
    pub lib_dir: String,
}

fn default_include_dir() -> String {
    "include".to_string()
}

fn default_lib_dir() -> String {
    "lib".to_string()
}

impl ResolvedDependency {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            components: Vec::new(),
            include_dir: default_include_dir(),
            lib_dir: default_lib_dir(),
        }
    }

    pub fn with_components(mut self, components: &[&str]) -> Self {
        self.components = components.iter().map(|c| c.to_string()).collect();
        self
    }
}

impl Profile {
    /// Parse a profile from a TOML string
    ///
    /// Malformed TOML is a parse error; an unknown or non-boolean option is
    /// a configuration error.
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))?;
        if let Some(toml::Value::Table(options)) = table.get("options") {
            check_option_table(options)?;
        }
        toml::Value::Table(table)
            .try_into()
            .map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))
    }

    /// Load a profile from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read profile {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// A profile describing the host machine
    pub fn detect() -> Result<Self> {
        let host = Settings::detect_host()?;
        Ok(Self {
            settings: SettingsSection {
                os: Some(host.os.to_string()),
                arch: host.arch.map(|a| a.to_string()),
                compiler: Some(host.compiler.to_string()),
                compiler_version: None,
                build_type: Some(host.build_type.to_string()),
            },
            ..Self::default()
        })
    }

    /// Override one setting from `key=value` text
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let value = Some(value.trim().to_string());
        match key.trim() {
            "os" => self.settings.os = value,
            "arch" => self.settings.arch = value,
            "compiler" => self.settings.compiler = value,
            "compiler.version" | "compiler_version" => self.settings.compiler_version = value,
            "build_type" => self.settings.build_type = value,
            other => {
                return Err(Error::ConfigurationError(format!(
                    "Unknown setting '{}' (valid settings: os, arch, compiler, compiler.version, build_type)",
                    other
                )));
            }
        }
        Ok(())
    }

    /// Validated settings
    ///
    /// `os`, `compiler` and `build_type` are mandatory; `arch` is checked
    /// later, when the layout is resolved.
    pub fn settings(&self) -> Result<Settings> {
        let s = &self.settings;
        let os = parse_setting("os", require(&s.os, "os")?)?;
        let compiler = parse_setting("compiler", require(&s.compiler, "compiler")?)?;
        let build_type = parse_setting("build_type", require(&s.build_type, "build_type")?)?;

        let mut settings = Settings::new(os, compiler, build_type);
        if let Some(arch) = &s.arch {
            settings = settings.with_arch(parse_setting("arch", arch)?);
        }
        if let Some(version) = &s.compiler_version {
            settings = settings.with_compiler_version(version.trim());
        }
        Ok(settings)
    }
}

fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::ConfigurationError(format!("Missing required setting '{}'", key)))
}

/// Split `key=value` command line text
pub fn split_assignment(text: &str) -> Result<(&str, &str)> {
    text.split_once('=')
        .filter(|(k, _)| !k.trim().is_empty())
        .ok_or_else(|| {
            Error::ConfigurationError(format!("Expected key=value, got '{}'", text))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Arch, BuildType, Compiler, Os};

    const LINUX_PROFILE: &str = r#"
[settings]
os = "Linux"
arch = "x86_64"
compiler = "gcc"
compiler_version = "13"
build_type = "Release"

[options]
shared = true

[tools]
cc = "gcc-13"

[dependencies.ffmpeg]
prefix = "/opt/ffmpeg"
components = ["libavcodec", "libavutil"]
"#;

    #[test]
    fn test_parse_profile() {
        let profile = Profile::parse(LINUX_PROFILE).unwrap();
        let settings = profile.settings().unwrap();
        assert_eq!(settings.os, Os::Linux);
        assert_eq!(settings.arch, Some(Arch::X86_64));
        assert_eq!(settings.compiler, Compiler::Gcc);
        assert_eq!(settings.compiler_version.as_deref(), Some("13"));
        assert_eq!(settings.build_type, BuildType::Release);
        assert_eq!(profile.options.shared, Some(true));
        assert_eq!(profile.tools.cc.as_deref(), Some("gcc-13"));

        let ffmpeg = &profile.dependencies["ffmpeg"];
        assert_eq!(ffmpeg.prefix, PathBuf::from("/opt/ffmpeg"));
        assert_eq!(ffmpeg.include_dir, "include");
        assert_eq!(ffmpeg.components.len(), 2);
    }

    #[test]
    fn test_missing_setting_is_configuration_error() {
        let profile = Profile::parse("[settings]\nos = \"Linux\"\n").unwrap();
        let err = profile.settings().unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(ref m) if m.contains("compiler")));
    }

    #[test]
    fn test_invalid_setting_value() {
        let mut profile = Profile::parse(LINUX_PROFILE).unwrap();
        profile.set_setting("arch", "sparc").unwrap();
        assert!(matches!(
            profile.settings(),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_set_setting_overrides() {
        let mut profile = Profile::parse(LINUX_PROFILE).unwrap();
        profile.set_setting("os", "Windows").unwrap();
        profile.set_setting("compiler", "msvc").unwrap();
        profile.set_setting("compiler.version", "194").unwrap();

        let settings = profile.settings().unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.compiler, Compiler::Msvc);
        assert_eq!(settings.compiler_version.as_deref(), Some("194"));

        assert!(profile.set_setting("libc", "musl").is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let content = "[options]\nlto = true\n";
        assert!(matches!(
            Profile::parse(content),
            Err(Error::ConfigurationError(ref m)) if m.contains("lto")
        ));

        // Same classification as a command line override
        let mut profile = Profile::default();
        assert!(matches!(
            profile.options.set("lto", "true"),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_non_boolean_option_rejected() {
        let content = "[options]\nshared = \"maybe\"\n";
        assert!(matches!(
            Profile::parse(content),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_malformed_profile_is_parse_error() {
        assert!(matches!(
            Profile::parse("[settings\nos = \"Linux\"\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("os=Linux").unwrap(), ("os", "Linux"));
        assert_eq!(split_assignment("k=a=b").unwrap(), ("k", "a=b"));
        assert!(split_assignment("os").is_err());
        assert!(split_assignment("=Linux").is_err());
    }
}
