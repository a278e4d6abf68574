// src/recipe/kitchen/mod.rs

//! Kitchen: where recipes are cooked
//!
//! The Kitchen drives one recipe through the build pipeline:
//! 1. **Normalize**: validate settings and drop options that do not apply
//! 2. **Layout**: derive source, build and package directories
//! 3. **Toolchain**: write the Meson machine file and pkg-config modules
//! 4. **Build**: `meson setup` then `meson compile`
//! 5. **Install**: `meson install` into the package directory
//! 6. **Export**: describe the package for consumers
//!
//! Every step is fail-fast. Nothing is retried and partial output is left
//! in place; a new cook starts again from the first step.

mod config;
mod cook;

pub use config::{CookResult, KitchenConfig};
pub use cook::{Cook, CookState};

use crate::build_system::{BuildSystem, Meson};
use crate::error::Result;
use crate::profile::Profile;
use crate::recipe::format::Recipe;
use std::path::Path;
use tracing::info;

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    config: KitchenConfig,
}

impl Kitchen {
    /// Create a new Kitchen with the given configuration
    pub fn new(config: KitchenConfig) -> Self {
        Self { config }
    }

    /// Create a Kitchen with default configuration
    pub fn with_defaults() -> Self {
        Self::new(KitchenConfig::default())
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Start a cook without running any step
    pub fn prepare<'a>(
        &'a self,
        recipe: &'a Recipe,
        profile: &'a Profile,
        source_dir: &Path,
    ) -> Cook<'a> {
        Cook::new(&self.config, recipe, profile, source_dir)
    }

    /// Meson executable from the configuration
    pub fn meson(&self) -> Result<Meson> {
        Meson::locate(&self.config.meson, self.config.jobs)
    }

    /// Cook a recipe with the given build system
    ///
    /// This is the main entry point for building. `source_dir` is where the
    /// recipe's exported sources live, usually the recipe's own directory.
    pub fn cook<B: BuildSystem + ?Sized>(
        &self,
        recipe: &Recipe,
        profile: &Profile,
        source_dir: &Path,
        build_system: &mut B,
    ) -> Result<CookResult> {
        info!(
            "Cooking {} version {}",
            recipe.package.name, recipe.package.version
        );

        let mut cook = self.prepare(recipe, profile, source_dir);
        let result = cook.run(build_system)?;

        info!(
            "Cooked {} into {}",
            recipe.reference(),
            result.layout.package_dir.display()
        );
        Ok(result)
    }
}
