// src/lib.rs

//! Pixles build recipe orchestrator
//!
//! Builds the `pixles_media` native library from a declarative recipe,
//! parameterized by platform, compiler, build mode and binary shape.
//!
//! # Architecture
//!
//! - Recipes: immutable TOML descriptors (identity, pinned requirements, option defaults)
//! - Profiles: settings and overrides supplied by the invoking environment
//! - Options: `shared`/`fPIC` normalized so invalid combinations cannot be represented
//! - Kitchen: the linear cook pipeline driving Meson as an external process

pub mod build_system;
mod error;
pub mod layout;
pub mod metadata;
pub mod options;
pub mod profile;
pub mod recipe;
pub mod settings;
pub mod toolchain;

pub use build_system::{BuildSystem, Meson};
pub use error::{BuildStep, Error, Result};
pub use layout::Layout;
pub use metadata::CppInfo;
pub use options::{BinaryOptions, OptionValues};
pub use profile::{Profile, ResolvedDependency};
pub use recipe::{Cook, CookResult, CookState, Kitchen, KitchenConfig, Recipe};
pub use settings::{Arch, BuildType, Compiler, Machine, Os, Settings};
pub use toolchain::{GeneratedToolchain, MachineFileKind, MesonToolchain};
