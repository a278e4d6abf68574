// src/layout.rs

//! Directory layout for one build
//!
//! Every build gets four directories:
//! - source: where the recipe's exported sources live
//! - build: the external build system's working directory
//! - generators: generated toolchain and pkg-config files
//! - package: the install destination
//!
//! Build and package directories are keyed by a package id, a SHA-256 over
//! the canonical identity, settings and normalized options, so differing
//! configurations never share directories.

use crate::error::{Error, Result};
use crate::options::BinaryOptions;
use crate::recipe::Recipe;
use crate::settings::Settings;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of id characters used in directory names
const SHORT_ID_LEN: usize = 16;

/// Resolved directories for one build invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Full package id
    pub package_id: String,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub generators_dir: PathBuf,
    pub package_dir: PathBuf,
}

impl Layout {
    /// Derive the layout for a build
    ///
    /// Pure: performs no filesystem access. Fails when the settings are
    /// incomplete for the target platform, or when the package name or
    /// version would escape `root`.
    pub fn resolve(
        recipe: &Recipe,
        settings: &Settings,
        options: &BinaryOptions,
        source_dir: &Path,
        root: &Path,
    ) -> Result<Self> {
        // Name and version become path components below the root
        recipe.check_identity()?;

        if settings.arch.is_none() && settings.os.requires_arch() {
            return Err(Error::ConfigurationError(format!(
                "Setting 'arch' is required when building for {}",
                settings.os
            )));
        }

        let package_id = package_id(recipe, settings, options);
        let folder = format!(
            "{}-{}-{}",
            recipe.package.name,
            recipe.package.version,
            &package_id[..SHORT_ID_LEN]
        );

        let build_dir = root
            .join("build")
            .join(&folder)
            .join(settings.build_type.folder_name());
        let generators_dir = build_dir.join("generators");
        let package_dir = root.join("package").join(&folder);

        debug!("Resolved layout for {} (id {})", recipe.reference(), package_id);

        Ok(Self {
            package_id,
            source_dir: source_dir.to_path_buf(),
            build_dir,
            generators_dir,
            package_dir,
        })
    }
}

/// Compute the package id for a configuration
///
/// Lines are `key=value`, sorted by key, newline terminated.
pub fn package_id(recipe: &Recipe, settings: &Settings, options: &BinaryOptions) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("name={}", recipe.package.name));
    lines.push(format!("version={}", recipe.package.version));
    for (key, value) in settings.canonical_pairs() {
        lines.push(format!("{}={}", key, value));
    }
    for (key, value) in options.canonical_pairs() {
        lines.push(format!("{}={}", key, value));
    }
    for requirement in &recipe.requires.packages {
        lines.push(format!("requires={}", requirement));
    }
    lines.sort();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValues;
    use crate::recipe::parse_recipe;
    use crate::settings::{Arch, BuildType, Compiler, Os};

    fn recipe() -> Recipe {
        parse_recipe(
            r#"
[package]
name = "pixles_media"
version = "0.1.0"

[requires]
packages = ["ffmpeg/7.0.1"]
"#,
        )
        .unwrap()
    }

    fn linux() -> Settings {
        Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release).with_arch(Arch::X86_64)
    }

    fn resolve(settings: &Settings, requested: OptionValues) -> Result<Layout> {
        let options = BinaryOptions::new(settings, requested);
        Layout::resolve(
            &recipe(),
            settings,
            &options,
            Path::new("/src/pixles_media"),
            Path::new("/work"),
        )
    }

    #[test]
    fn test_layout_is_deterministic() {
        let a = resolve(&linux(), OptionValues::default()).unwrap();
        let b = resolve(&linux(), OptionValues::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_paths() {
        let layout = resolve(&linux(), OptionValues::default()).unwrap();
        let short = &layout.package_id[..SHORT_ID_LEN];

        assert_eq!(layout.source_dir, PathBuf::from("/src/pixles_media"));
        assert_eq!(
            layout.build_dir,
            PathBuf::from(format!("/work/build/pixles_media-0.1.0-{}/build-release", short))
        );
        assert_eq!(layout.generators_dir, layout.build_dir.join("generators"));
        assert_eq!(
            layout.package_dir,
            PathBuf::from(format!("/work/package/pixles_media-0.1.0-{}", short))
        );
        assert_eq!(layout.package_id.len(), 64);
    }

    #[test]
    fn test_configurations_do_not_collide() {
        let static_lib = resolve(&linux(), OptionValues::default()).unwrap();
        let shared_lib = resolve(
            &linux(),
            OptionValues {
                shared: Some(true),
                fpic: None,
            },
        )
        .unwrap();
        let debug = resolve(
            &Settings::new(Os::Linux, Compiler::Gcc, BuildType::Debug).with_arch(Arch::X86_64),
            OptionValues::default(),
        )
        .unwrap();

        assert_ne!(static_lib.package_id, shared_lib.package_id);
        assert_ne!(static_lib.package_id, debug.package_id);
        assert_ne!(static_lib.package_dir, shared_lib.package_dir);
    }

    #[test]
    fn test_missing_arch_on_windows_fails() {
        let settings = Settings::new(Os::Windows, Compiler::Msvc, BuildType::Release);
        let err = resolve(&settings, OptionValues::default()).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(ref m) if m.contains("arch")));
    }

    #[test]
    fn test_missing_arch_on_linux_allowed() {
        let settings = Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release);
        assert!(resolve(&settings, OptionValues::default()).is_ok());
    }

    #[test]
    fn test_path_like_name_rejected() {
        let settings = linux();
        let options = BinaryOptions::new(&settings, OptionValues::default());
        let mut recipe = recipe();
        recipe.package.name = "../../escaped".to_string();

        let err = Layout::resolve(
            &recipe,
            &settings,
            &options,
            Path::new("/src"),
            Path::new("/work"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(ref m) if m.contains("escaped")));
    }
}
