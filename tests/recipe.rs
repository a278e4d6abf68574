// tests/recipe.rs

//! Checks on the recipe and profiles shipped with the repository.

mod common;

use common::{PIXLES_MEDIA_RECIPE, pixles_media};
use pixles_recipe::recipe::{parse_recipe, validate_recipe};
use pixles_recipe::{BinaryOptions, Compiler, Os, Profile};
use std::path::Path;

#[test]
fn test_shipped_recipe_identity() {
    let recipe = pixles_media();
    assert_eq!(recipe.reference(), "pixles_media/0.1.0");
    assert_eq!(recipe.package.license.as_deref(), Some("AGPL-3.0-only"));
    assert_eq!(recipe.options.shared, Some(false));
    assert_eq!(recipe.options.fpic, Some(true));

    let requirements = recipe.requirements().unwrap();
    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements[0].to_string(), "ffmpeg/7.0.1");

    let tools: Vec<String> = recipe
        .tool_requirements()
        .unwrap()
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(tools, vec!["meson/1.6.0", "ninja/1.12.1"]);
}

#[test]
fn test_shipped_recipe_validates_cleanly() {
    let recipe = pixles_media();
    let warnings = validate_recipe(&recipe, Some(Path::new("recipes/pixles_media"))).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn test_recipe_with_range_requirement_rejected() {
    let content = PIXLES_MEDIA_RECIPE.replace("ffmpeg/7.0.1", "ffmpeg/[>=7.0]");
    let recipe = parse_recipe(&content).unwrap();
    assert!(validate_recipe(&recipe, None).is_err());
}

#[test]
fn test_shipped_profiles_load() {
    let recipe = pixles_media();

    let linux = Profile::load(Path::new("profiles/linux-gcc-release.toml")).unwrap();
    let settings = linux.settings().unwrap();
    assert_eq!(settings.os, Os::Linux);
    assert!(linux.dependencies.contains_key("ffmpeg"));
    let options = BinaryOptions::new(&settings, recipe.options.overlay(linux.options));
    assert_eq!(options.fpic(), Some(true));

    let windows = Profile::load(Path::new("profiles/windows-msvc-release.toml")).unwrap();
    let settings = windows.settings().unwrap();
    assert_eq!(settings.compiler, Compiler::Msvc);
    let options = BinaryOptions::new(&settings, recipe.options.overlay(windows.options));
    assert!(!options.has_fpic());

    let macos = Profile::load(Path::new("profiles/macos-armv8-debug.toml")).unwrap();
    let settings = macos.settings().unwrap();
    let options = BinaryOptions::new(&settings, recipe.options.overlay(macos.options));
    assert!(options.shared());
    assert!(!options.has_fpic());
}
