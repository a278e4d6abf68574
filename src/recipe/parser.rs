// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::{PackageType, Recipe};
use crate::recipe::reference::is_valid_name;
use std::path::Path;
use tracing::debug;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
///
/// When `recipe_dir` is given, export patterns are checked against it.
pub fn validate_recipe(recipe: &Recipe, recipe_dir: Option<&Path>) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if !is_valid_name(&recipe.package.name) {
        return Err(Error::ParseError(format!(
            "Invalid package name '{}'",
            recipe.package.name
        )));
    }
    if recipe.package.version.is_empty() {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }
    if recipe
        .package
        .version
        .chars()
        .any(|c| c.is_whitespace() || c == '/')
    {
        return Err(Error::ParseError(format!(
            "Invalid package version '{}'",
            recipe.package.version
        )));
    }

    // Every requirement must be pinned
    recipe.requirements()?;
    recipe.tool_requirements()?;

    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if recipe.package.package_type == PackageType::Application
        && !recipe.package_info.libs.is_empty()
    {
        warnings.push("Application package declares consumer libs".to_string());
    }
    if recipe.requires.tools.is_empty() {
        warnings.push("No tool requirements: meson and ninja must come from PATH".to_string());
    }

    if let Some(dir) = recipe_dir {
        for pattern in &recipe.sources.exports {
            if !pattern_matches_any(dir, pattern)? {
                warnings.push(format!("Export pattern '{}' matches no files", pattern));
            }
        }
    }

    Ok(warnings)
}

fn pattern_matches_any(dir: &Path, pattern: &str) -> Result<bool> {
    let full = dir.join(pattern);
    let full = full.to_string_lossy();
    let mut paths = glob::glob(&full)
        .map_err(|e| Error::ParseError(format!("Invalid export pattern '{}': {}", pattern, e)))?;
    let found = paths.any(|p| p.is_ok());
    debug!("Export pattern {} matched: {}", pattern, found);
    Ok(found)
}
