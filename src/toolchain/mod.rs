// src/toolchain/mod.rs

//! Toolchain generation for the external build system
//!
//! Produces the files `meson setup` consumes:
//! - a machine file encoding compiler, build mode and binary shape
//! - pkg-config modules for the recipe's resolved requirements

mod meson;
mod pkgconfig;

pub use meson::{MachineFileKind, MesonToolchain, CROSS_FILE_NAME, NATIVE_FILE_NAME};
pub use pkgconfig::PkgConfigDeps;

use std::path::PathBuf;

/// Files written by toolchain generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedToolchain {
    /// Whether `machine_file` is a native or cross file
    pub kind: MachineFileKind,
    pub machine_file: PathBuf,
    pub pkg_config_files: Vec<PathBuf>,
}
