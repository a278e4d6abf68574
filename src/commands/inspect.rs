// src/commands/inspect.rs

//! Commands that run the first pipeline steps and print what they produced

use super::load_inputs;
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use pixles_recipe::{CppInfo, Kitchen};

/// Print the options after platform and `shared` normalization
pub fn cmd_options(args: &RecipeArgs) -> Result<()> {
    let inputs = load_inputs(args)?;
    let kitchen = Kitchen::new(inputs.config);
    let mut cook = kitchen.prepare(&inputs.recipe, &inputs.profile, &inputs.source_dir);

    let options = *cook.normalize_options().context("Failed to normalize options")?;
    println!("Settings: {}", cook.settings()?);
    println!("Options:");
    println!("  shared = {}", options.shared());
    match options.fpic() {
        Some(fpic) => println!("  fPIC = {}", fpic),
        None => println!("  fPIC = (not applicable)"),
    }
    Ok(())
}

/// Print the resolved directory layout
pub fn cmd_layout(args: &RecipeArgs) -> Result<()> {
    let inputs = load_inputs(args)?;
    let kitchen = Kitchen::new(inputs.config);
    let mut cook = kitchen.prepare(&inputs.recipe, &inputs.profile, &inputs.source_dir);

    cook.normalize_options().context("Failed to normalize options")?;
    let layout = cook.resolve_layout().context("Failed to resolve layout")?;

    println!("Package id: {}", layout.package_id);
    println!("  source:     {}", layout.source_dir.display());
    println!("  build:      {}", layout.build_dir.display());
    println!("  generators: {}", layout.generators_dir.display());
    println!("  package:    {}", layout.package_dir.display());
    Ok(())
}

/// Generate the toolchain files without building
pub fn cmd_toolchain(args: &RecipeArgs) -> Result<()> {
    let inputs = load_inputs(args)?;
    let kitchen = Kitchen::new(inputs.config);
    let mut cook = kitchen.prepare(&inputs.recipe, &inputs.profile, &inputs.source_dir);

    cook.normalize_options().context("Failed to normalize options")?;
    cook.resolve_layout().context("Failed to resolve layout")?;
    let toolchain = cook
        .generate_toolchain()
        .context("Failed to generate toolchain")?
        .clone();

    println!(
        "[COMPLETE] Generated {} ({})",
        toolchain.machine_file.display(),
        toolchain.kind.setup_flag()
    );
    for file in &toolchain.pkg_config_files {
        println!("  {}", file.display());
    }
    for warning in cook.warnings() {
        println!("  Warning: {}", warning);
    }
    Ok(())
}

/// Preview the consumer metadata a full cook would export
///
/// Only options are normalized. Nothing is built or installed, so this is a
/// preview; the cook itself exports metadata only after `INSTALLED`.
pub fn cmd_info(args: &RecipeArgs) -> Result<()> {
    let inputs = load_inputs(args)?;
    let kitchen = Kitchen::new(inputs.config);
    let mut cook = kitchen.prepare(&inputs.recipe, &inputs.profile, &inputs.source_dir);

    let options = *cook.normalize_options().context("Failed to normalize options")?;
    let info = CppInfo::for_recipe(&inputs.recipe, &options);
    eprintln!("Preview only: the package has not been built");
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
