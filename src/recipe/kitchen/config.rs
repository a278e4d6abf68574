// src/recipe/kitchen/config.rs

//! Configuration and result types for the Kitchen

use super::cook::CookState;
use crate::layout::Layout;
use crate::metadata::CppInfo;
use crate::options::BinaryOptions;
use crate::settings::Machine;
use crate::toolchain::GeneratedToolchain;
use std::path::PathBuf;

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Root under which build and package directories are created
    pub root: PathBuf,
    /// Number of parallel compile jobs
    pub jobs: u32,
    /// Meson executable name or path
    pub meson: String,
    /// Machine running the build; `None` disables cross detection
    pub build_machine: Option<Machine>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        let root = dirs::cache_dir()
            .map(|d| d.join("pixles-recipe"))
            .unwrap_or_else(|| PathBuf::from(".pixles-recipe"));

        Self {
            root,
            jobs,
            meson: "meson".to_string(),
            build_machine: Machine::host(),
        }
    }
}

impl KitchenConfig {
    /// Default configuration rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Result of cooking a recipe
#[derive(Debug, Clone)]
pub struct CookResult {
    /// Last state reached
    pub state: CookState,
    /// Normalized options the build used
    pub options: BinaryOptions,
    pub layout: Layout,
    pub toolchain: GeneratedToolchain,
    /// Linkage metadata for consumers
    pub metadata: CppInfo,
    /// Captured output of the external steps
    pub log: String,
    /// Warnings generated during the cook
    pub warnings: Vec<String>,
}
