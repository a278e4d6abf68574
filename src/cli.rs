// src/cli.rs
//! CLI definitions for pixles-recipe
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixles-recipe")]
#[command(author = "Pixles Contributors")]
#[command(version)]
#[command(about = "Build recipe orchestrator for the pixles_media native library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Inputs shared by every command that evaluates a recipe
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Recipe file, or a directory containing recipe.toml
    pub recipe: PathBuf,

    /// Profile with settings, options and resolved dependencies
    /// (default: detected from the host)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Override a setting (e.g. -s os=Windows -s arch=armv8)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Override an option (e.g. -o shared=true)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Root directory for build and package directories
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: options, layout, toolchain, build, install, metadata
    Cook {
        #[command(flatten)]
        args: RecipeArgs,

        /// Number of parallel compile jobs (default: available CPUs)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Meson executable
        #[arg(long, default_value = "meson")]
        meson: String,
    },

    /// Print the normalized options
    Options {
        #[command(flatten)]
        args: RecipeArgs,
    },

    /// Print the resolved directory layout
    Layout {
        #[command(flatten)]
        args: RecipeArgs,
    },

    /// Generate the Meson machine file and pkg-config modules only
    Toolchain {
        #[command(flatten)]
        args: RecipeArgs,
    },

    /// Preview the consumer metadata as JSON (nothing is built or exported)
    Info {
        #[command(flatten)]
        args: RecipeArgs,
    },

    /// Parse and validate a recipe
    Validate {
        /// Recipe file, or a directory containing recipe.toml
        recipe: PathBuf,
    },
}
