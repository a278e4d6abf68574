// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Cook { args, jobs, meson }) => commands::cmd_cook(&args, jobs, &meson),
        Some(Commands::Options { args }) => commands::cmd_options(&args),
        Some(Commands::Layout { args }) => commands::cmd_layout(&args),
        Some(Commands::Toolchain { args }) => commands::cmd_toolchain(&args),
        Some(Commands::Info { args }) => commands::cmd_info(&args),
        Some(Commands::Validate { recipe }) => commands::cmd_validate(&recipe),
        None => {
            // No command provided, show help
            println!("pixles-recipe v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'pixles-recipe --help' for usage information");
            Ok(())
        }
    }
}
