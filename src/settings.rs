// src/settings.rs

//! Environment-derived build settings
//!
//! Settings describe the target of a build: operating system, compiler,
//! build mode and architecture. They are supplied by the invoking
//! environment (a profile or the command line) and never modified by the
//! orchestrator.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Os {
    #[strum(serialize = "Linux")]
    Linux,
    #[strum(serialize = "Windows")]
    Windows,
    #[strum(serialize = "Macos")]
    Macos,
    #[strum(serialize = "FreeBSD")]
    FreeBsd,
    #[strum(serialize = "Android")]
    Android,
    #[strum(serialize = "iOS")]
    Ios,
}

impl Os {
    pub fn is_windows(&self) -> bool {
        matches!(self, Os::Windows)
    }

    /// Whether a layout can only be resolved with an explicit architecture
    ///
    /// These platforms routinely ship several ABIs side by side, so an
    /// arch-less build would be ambiguous.
    pub fn requires_arch(&self) -> bool {
        matches!(self, Os::Windows | Os::Macos | Os::Ios | Os::Android)
    }

    /// Meson `system` value for machine files
    pub fn meson_system(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Windows => "windows",
            Os::Macos | Os::Ios => "darwin",
            Os::FreeBsd => "freebsd",
            Os::Android => "android",
        }
    }

    /// Operating system this binary was compiled for, if it is a known target
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Os::Linux),
            "windows" => Some(Os::Windows),
            "macos" => Some(Os::Macos),
            "freebsd" => Some(Os::FreeBsd),
            "android" => Some(Os::Android),
            "ios" => Some(Os::Ios),
            _ => None,
        }
    }
}

/// Target CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Arch {
    #[strum(serialize = "x86_64")]
    X86_64,
    #[strum(serialize = "x86")]
    X86,
    #[strum(serialize = "armv8")]
    Armv8,
    #[strum(serialize = "armv7")]
    Armv7,
}

impl Arch {
    /// Meson `cpu_family` value
    pub fn meson_cpu_family(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::Armv8 => "aarch64",
            Arch::Armv7 => "arm",
        }
    }

    /// Meson `cpu` value
    pub fn meson_cpu(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "i686",
            Arch::Armv8 => "armv8",
            Arch::Armv7 => "armv7",
        }
    }

    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Arch::X86_64),
            "x86" => Some(Arch::X86),
            "aarch64" => Some(Arch::Armv8),
            "arm" => Some(Arch::Armv7),
            _ => None,
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Compiler {
    #[strum(serialize = "gcc")]
    Gcc,
    #[strum(serialize = "clang")]
    Clang,
    #[strum(serialize = "apple-clang")]
    AppleClang,
    #[strum(serialize = "msvc")]
    Msvc,
}

impl Compiler {
    /// Default C compiler executable
    pub fn c_binary(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang | Compiler::AppleClang => "clang",
            Compiler::Msvc => "cl",
        }
    }

    /// Default C++ compiler executable
    pub fn cpp_binary(&self) -> &'static str {
        match self {
            Compiler::Gcc => "g++",
            Compiler::Clang | Compiler::AppleClang => "clang++",
            Compiler::Msvc => "cl",
        }
    }
}

/// Build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum BuildType {
    #[strum(serialize = "Debug")]
    Debug,
    #[strum(serialize = "Release")]
    Release,
    #[strum(serialize = "RelWithDebInfo")]
    RelWithDebInfo,
    #[strum(serialize = "MinSizeRel")]
    MinSizeRel,
}

impl BuildType {
    /// Meson `buildtype` value
    pub fn meson_buildtype(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "debugoptimized",
            BuildType::MinSizeRel => "minsize",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildType::Debug)
    }

    /// Name of the build folder for this mode (`build-release`, ...)
    pub fn folder_name(&self) -> String {
        format!("build-{}", self.as_ref().to_lowercase())
    }
}

/// Parse a settings value, mapping failures to a configuration error
pub(crate) fn parse_setting<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::ConfigurationError(format!("Invalid value '{}' for setting '{}'", value, key))
    })
}

/// The full set of settings for one build
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    /// Compiler version, recorded in the package id when known
    pub compiler_version: Option<String>,
    pub build_type: BuildType,
    /// Optional at construction; mandatory for layout on some platforms
    pub arch: Option<Arch>,
}

impl Settings {
    /// Create settings without architecture or compiler version
    pub fn new(os: Os, compiler: Compiler, build_type: BuildType) -> Self {
        Self {
            os,
            compiler,
            compiler_version: None,
            build_type,
            arch: None,
        }
    }

    /// Set the architecture
    pub fn with_arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Set the compiler version
    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    /// Settings describing the machine running this process
    ///
    /// Uses the platform's conventional compiler and a Release build.
    pub fn detect_host() -> Result<Self> {
        let os = Os::host().ok_or_else(|| {
            Error::ConfigurationError(format!(
                "Unsupported host operating system: {}",
                std::env::consts::OS
            ))
        })?;

        let compiler = match os {
            Os::Windows => Compiler::Msvc,
            Os::Macos | Os::Ios => Compiler::AppleClang,
            Os::FreeBsd | Os::Android => Compiler::Clang,
            Os::Linux => Compiler::Gcc,
        };

        Ok(Self {
            os,
            compiler,
            compiler_version: None,
            build_type: BuildType::Release,
            arch: Arch::host(),
        })
    }

    /// Canonical `key=value` pairs in a fixed order
    pub fn canonical_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("settings.arch", self.arch.map_or_else(|| "any".to_string(), |a| a.to_string())),
            ("settings.build_type", self.build_type.to_string()),
            ("settings.compiler", self.compiler.to_string()),
        ];
        if let Some(version) = &self.compiler_version {
            pairs.push(("settings.compiler.version", version.clone()));
        }
        pairs.push(("settings.os", self.os.to_string()));
        pairs
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .canonical_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k.trim_start_matches("settings."), v))
            .collect();
        write!(f, "{}", pairs.join(" "))
    }
}

/// A machine described by operating system and architecture
///
/// Used to decide whether a build is a cross build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Machine {
    pub os: Os,
    pub arch: Arch,
}

impl Machine {
    /// The machine running this process
    pub fn host() -> Option<Self> {
        Some(Self {
            os: Os::host()?,
            arch: Arch::host()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conventional_names() {
        assert_eq!("Linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("FreeBSD".parse::<Os>().unwrap(), Os::FreeBsd);
        assert_eq!("armv8".parse::<Arch>().unwrap(), Arch::Armv8);
        assert_eq!("apple-clang".parse::<Compiler>().unwrap(), Compiler::AppleClang);
        assert_eq!("RelWithDebInfo".parse::<BuildType>().unwrap(), BuildType::RelWithDebInfo);
        assert!("Plan9".parse::<Os>().is_err());
    }

    #[test]
    fn test_display_round_trips_names() {
        assert_eq!(Os::Ios.to_string(), "iOS");
        assert_eq!(Arch::X86_64.to_string(), "x86_64");
        assert_eq!(BuildType::MinSizeRel.to_string(), "MinSizeRel");
    }

    #[test]
    fn test_parse_setting_error() {
        let err = parse_setting::<Os>("os", "Amiga").unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(ref m) if m.contains("Amiga")));
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(BuildType::Release.folder_name(), "build-release");
        assert_eq!(BuildType::RelWithDebInfo.folder_name(), "build-relwithdebinfo");
    }

    #[test]
    fn test_requires_arch() {
        assert!(Os::Windows.requires_arch());
        assert!(Os::Android.requires_arch());
        assert!(!Os::Linux.requires_arch());
        assert!(!Os::FreeBsd.requires_arch());
    }

    #[test]
    fn test_canonical_pairs_sorted() {
        let settings = Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release)
            .with_arch(Arch::X86_64)
            .with_compiler_version("13");
        let keys: Vec<&str> = settings.canonical_pairs().iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_display() {
        let settings = Settings::new(Os::Windows, Compiler::Msvc, BuildType::Debug);
        assert_eq!(
            settings.to_string(),
            "arch=any build_type=Debug compiler=msvc os=Windows"
        );
    }
}
