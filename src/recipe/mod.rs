// src/recipe/mod.rs

//! Recipe system for building native libraries
//!
//! A recipe declares:
//! - Package identity and licensing metadata
//! - Pinned library and tool requirements
//! - Defaults for the binary-shape options
//! - The sources exported next to the recipe
//! - What consumers link against once the package is installed
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "pixles_media"
//! version = "0.1.0"
//! license = "AGPL-3.0-only"
//! type = "library"
//!
//! [requires]
//! packages = ["ffmpeg/7.0.1"]
//! tools = ["meson/1.6.0", "ninja/1.12.1"]
//!
//! [options]
//! shared = false
//! fPIC = true
//!
//! [sources]
//! exports = ["meson.build", "src/*"]
//!
//! [package_info]
//! libs = ["pixles_media"]
//! ```

mod format;
mod kitchen;
pub mod parser;
mod reference;

pub use format::{
    PackageInfoSection, PackageSection, PackageType, Recipe, RequiresSection,
    ResolvedPackageType, SourcesSection,
};
pub use kitchen::{Cook, CookResult, CookState, Kitchen, KitchenConfig};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
pub use reference::{is_valid_name, PackageReference};
