// src/commands/cook.rs

//! Cook command - build the library from its recipe

use super::load_inputs;
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use pixles_recipe::Kitchen;
use tracing::info;

/// Cook a package from a recipe
///
/// # Arguments
/// * `args` - Recipe, profile and overrides
/// * `jobs` - Number of parallel compile jobs (None = auto)
/// * `meson` - Meson executable name or path
pub fn cmd_cook(args: &RecipeArgs, jobs: Option<u32>, meson: &str) -> Result<()> {
    let mut inputs = load_inputs(args)?;
    let recipe = &inputs.recipe;

    println!("Recipe: {} version {}", recipe.package.name, recipe.package.version);

    inputs.config.meson = meson.to_string();
    if let Some(j) = jobs {
        inputs.config.jobs = j;
    }

    let kitchen = Kitchen::new(inputs.config.clone());
    let mut build_system = kitchen
        .meson()
        .context("Cannot cook without a Meson executable")?;

    println!("Cooking with {} parallel jobs...", kitchen.config().jobs);

    let mut cook = kitchen.prepare(recipe, &inputs.profile, &inputs.source_dir);
    let outcome = cook.run(&mut build_system);

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            if !cook.log().is_empty() {
                eprintln!("{}", cook.log());
            }
            return Err(e).with_context(|| {
                format!(
                    "Failed to cook {} (stopped after {})",
                    recipe.reference(),
                    cook.state()
                )
            });
        }
    };

    println!("\n[COMPLETE] {} reached {}", recipe.reference(), result.state);
    println!("  Options: {}", result.options);
    println!("  Package: {}", result.layout.package_dir.display());

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&result.metadata)?);

    info!(
        "Successfully cooked {} to {}",
        recipe.package.name,
        result.layout.package_dir.display()
    );

    Ok(())
}
