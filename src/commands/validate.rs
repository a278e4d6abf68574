// src/commands/validate.rs

//! Validate command - check a recipe without cooking it

use super::recipe_paths;
use anyhow::{Context, Result};
use pixles_recipe::recipe::{parse_recipe_file, validate_recipe};
use std::path::Path;

/// Parse and validate a recipe, printing any warnings
pub fn cmd_validate(recipe: &Path) -> Result<()> {
    let (recipe_file, source_dir) = recipe_paths(recipe);
    println!("Reading recipe: {}", recipe_file.display());

    let parsed = parse_recipe_file(&recipe_file)
        .with_context(|| format!("Failed to parse recipe: {}", recipe_file.display()))?;
    let warnings = validate_recipe(&parsed, Some(&source_dir)).context("Recipe validation failed")?;

    if warnings.is_empty() {
        println!("[COMPLETE] {} is valid", parsed.reference());
    } else {
        println!("[COMPLETE] {} is valid with warnings:", parsed.reference());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}
