// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Arguments shared by every command that evaluates a recipe
fn recipe_args() -> Vec<Arg> {
    vec![
        Arg::new("recipe")
            .required(true)
            .help("Recipe file, or a directory containing recipe.toml"),
        Arg::new("profile")
            .short('p')
            .long("profile")
            .value_name("PATH")
            .help("Profile with settings, options and resolved dependencies"),
        Arg::new("setting")
            .short('s')
            .long("setting")
            .value_name("KEY=VALUE")
            .action(ArgAction::Append)
            .help("Override a setting (e.g. -s os=Windows)"),
        Arg::new("option")
            .short('o')
            .long("option")
            .value_name("KEY=VALUE")
            .action(ArgAction::Append)
            .help("Override an option (e.g. -o shared=true)"),
        Arg::new("root")
            .long("root")
            .value_name("PATH")
            .help("Root directory for build and package directories"),
    ]
}

fn build_cli() -> Command {
    Command::new("pixles-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pixles Contributors")
        .about("Build recipe orchestrator for the pixles_media native library")
        .subcommand_required(false)
        .subcommand(
            Command::new("cook")
                .about("Run the full pipeline: options, layout, toolchain, build, install, metadata")
                .args(recipe_args())
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of parallel compile jobs (default: available CPUs)"),
                )
                .arg(
                    Arg::new("meson")
                        .long("meson")
                        .default_value("meson")
                        .help("Meson executable"),
                ),
        )
        .subcommand(
            Command::new("options")
                .about("Print the normalized options")
                .args(recipe_args()),
        )
        .subcommand(
            Command::new("layout")
                .about("Print the resolved directory layout")
                .args(recipe_args()),
        )
        .subcommand(
            Command::new("toolchain")
                .about("Generate the Meson machine file and pkg-config modules only")
                .args(recipe_args()),
        )
        .subcommand(
            Command::new("info")
                .about("Preview the consumer metadata as JSON (nothing is built or exported)")
                .args(recipe_args()),
        )
        .subcommand(
            Command::new("validate")
                .about("Parse and validate a recipe")
                .arg(
                    Arg::new("recipe")
                        .required(true)
                        .help("Recipe file, or a directory containing recipe.toml"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pixles-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
