// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use pixles_recipe::recipe::parse_recipe;
use pixles_recipe::{
    BuildStep, BuildSystem, Error, GeneratedToolchain, KitchenConfig, Layout, Profile, Recipe,
    ResolvedDependency, Result,
};
use std::fs;
use tempfile::TempDir;

/// The recipe shipped in `recipes/pixles_media`
pub const PIXLES_MEDIA_RECIPE: &str = include_str!("../../recipes/pixles_media/recipe.toml");

pub fn pixles_media() -> Recipe {
    parse_recipe(PIXLES_MEDIA_RECIPE).unwrap()
}

/// Profile for the given target with ffmpeg already resolved
pub fn profile(os: &str, arch: Option<&str>, compiler: &str, build_type: &str) -> Profile {
    let mut profile = Profile::default();
    profile.set_setting("os", os).unwrap();
    profile.set_setting("compiler", compiler).unwrap();
    profile.set_setting("build_type", build_type).unwrap();
    if let Some(arch) = arch {
        profile.set_setting("arch", arch).unwrap();
    }
    profile.dependencies.insert(
        "ffmpeg".to_string(),
        ResolvedDependency::new("/opt/ffmpeg").with_components(&[
            "libavcodec",
            "libavformat",
            "libavutil",
        ]),
    );
    profile
}

/// Kitchen configuration rooted in a fresh temporary directory
///
/// No build machine is set, so every target gets a native file.
/// Returns (TempDir, config) - keep the TempDir alive to prevent cleanup.
pub fn kitchen_config() -> (TempDir, KitchenConfig) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = KitchenConfig::with_root(temp_dir.path().join("work"));
    config.build_machine = None;
    config.jobs = 2;
    (temp_dir, config)
}

/// Build system double that records calls instead of running Meson
#[derive(Debug, Default)]
pub struct RecordingBuildSystem {
    pub calls: Vec<&'static str>,
    /// Step that reports failure: "configure", "build" or "install"
    pub fail_at: Option<&'static str>,
    /// Machine file content seen by configure
    pub machine_file: Option<String>,
}

impl RecordingBuildSystem {
    pub fn failing_at(step: &'static str) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    fn record(&mut self, step: &'static str) -> bool {
        self.calls.push(step);
        self.fail_at == Some(step)
    }
}

impl BuildSystem for RecordingBuildSystem {
    fn configure(&mut self, layout: &Layout, toolchain: &GeneratedToolchain) -> Result<()> {
        self.machine_file = fs::read_to_string(&toolchain.machine_file).ok();
        if self.record("configure") {
            return Err(Error::BuildError {
                step: BuildStep::Configure,
                message: "simulated configure failure".to_string(),
            });
        }
        fs::create_dir_all(layout.build_dir.join("meson-private"))?;
        Ok(())
    }

    fn build(&mut self, layout: &Layout) -> Result<()> {
        if self.record("build") {
            return Err(Error::BuildError {
                step: BuildStep::Compile,
                message: "simulated compile failure".to_string(),
            });
        }
        fs::write(layout.build_dir.join("libpixles_media.a"), b"archive")?;
        Ok(())
    }

    fn install(&mut self, layout: &Layout) -> Result<()> {
        if self.record("install") {
            return Err(Error::InstallError("simulated install failure".to_string()));
        }
        let lib_dir = layout.package_dir.join("lib");
        fs::create_dir_all(&lib_dir)?;
        fs::copy(
            layout.build_dir.join("libpixles_media.a"),
            lib_dir.join("libpixles_media.a"),
        )?;
        Ok(())
    }

    fn take_log(&mut self) -> String {
        match self.calls.last() {
            Some(step) => format!("=== {} ===\n", step),
            None => String::new(),
        }
    }
}
