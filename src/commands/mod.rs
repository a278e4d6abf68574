// src/commands/mod.rs
//! Command handlers for the pixles-recipe CLI

mod cook;
mod inspect;
mod validate;

pub use cook::cmd_cook;
pub use inspect::{cmd_info, cmd_layout, cmd_options, cmd_toolchain};
pub use validate::cmd_validate;

use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use pixles_recipe::profile::split_assignment;
use pixles_recipe::recipe::parse_recipe_file;
use pixles_recipe::{KitchenConfig, Profile, Recipe};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the recipe file when a directory is given
const RECIPE_FILE_NAME: &str = "recipe.toml";

/// Resolve a recipe argument to (recipe file, source directory)
pub(crate) fn recipe_paths(recipe: &Path) -> (PathBuf, PathBuf) {
    let file = if recipe.is_dir() {
        recipe.join(RECIPE_FILE_NAME)
    } else {
        recipe.to_path_buf()
    };
    let source_dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    (file, source_dir)
}

/// Everything a command needs to start a cook
pub(crate) struct Inputs {
    pub recipe: Recipe,
    pub profile: Profile,
    pub source_dir: PathBuf,
    pub config: KitchenConfig,
}

/// Load the recipe and profile, applying command line overrides
pub(crate) fn load_inputs(args: &RecipeArgs) -> Result<Inputs> {
    let (recipe_file, source_dir) = recipe_paths(&args.recipe);
    let recipe = parse_recipe_file(&recipe_file)
        .with_context(|| format!("Failed to parse recipe: {}", recipe_file.display()))?;

    let mut profile = match &args.profile {
        Some(path) => Profile::load(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None => Profile::detect().context("Failed to detect host profile")?,
    };

    for assignment in &args.settings {
        let (key, value) = split_assignment(assignment)?;
        profile.set_setting(key, value)?;
    }
    for assignment in &args.options {
        let (key, value) = split_assignment(assignment)?;
        profile.options.set(key, value)?;
    }

    let mut config = KitchenConfig::default();
    if let Some(root) = &args.root {
        config.root = root.clone();
    }

    debug!("Recipe {} with sources in {}", recipe.reference(), source_dir.display());
    Ok(Inputs {
        recipe,
        profile,
        source_dir,
        config,
    })
}
