// src/recipe/kitchen/cook.rs

//! Cook: one pipeline run for a single recipe and profile
//!
//! A cook moves through a fixed sequence of states. Each step may only be
//! called from the state directly before it, and a failed step leaves the
//! cook where it was. There is no way back: retrying means starting a new
//! `Cook` from `UNCONFIGURED`.

use crate::build_system::BuildSystem;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::metadata::CppInfo;
use crate::options::BinaryOptions;
use crate::profile::Profile;
use crate::recipe::format::Recipe;
use crate::settings::Settings;
use crate::toolchain::{GeneratedToolchain, MesonToolchain, PkgConfigDeps};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::config::{CookResult, KitchenConfig};

/// Pipeline state of a cook
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CookState {
    Unconfigured,
    OptionsNormalized,
    LayoutResolved,
    ToolchainGenerated,
    Built,
    Installed,
    MetadataExported,
}

impl CookState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookState::Unconfigured => "UNCONFIGURED",
            CookState::OptionsNormalized => "OPTIONS_NORMALIZED",
            CookState::LayoutResolved => "LAYOUT_RESOLVED",
            CookState::ToolchainGenerated => "TOOLCHAIN_GENERATED",
            CookState::Built => "BUILT",
            CookState::Installed => "INSTALLED",
            CookState::MetadataExported => "METADATA_EXPORTED",
        }
    }
}

impl fmt::Display for CookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cook operation
pub struct Cook<'a> {
    config: &'a KitchenConfig,
    recipe: &'a Recipe,
    profile: &'a Profile,
    source_dir: PathBuf,
    state: CookState,
    settings: Option<Settings>,
    options: Option<BinaryOptions>,
    layout: Option<Layout>,
    toolchain: Option<GeneratedToolchain>,
    metadata: Option<CppInfo>,
    /// Build log accumulator
    log: String,
    warnings: Vec<String>,
}

impl<'a> Cook<'a> {
    pub fn new(
        config: &'a KitchenConfig,
        recipe: &'a Recipe,
        profile: &'a Profile,
        source_dir: &Path,
    ) -> Self {
        Self {
            config,
            recipe,
            profile,
            source_dir: source_dir.to_path_buf(),
            state: CookState::Unconfigured,
            settings: None,
            options: None,
            layout: None,
            toolchain: None,
            metadata: None,
            log: String::new(),
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> CookState {
        self.state
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Step 1: validate inputs and normalize the options
    ///
    /// The recipe identity and its pinned requirements are checked here, so
    /// bad input never reaches a step that writes files. Recipe defaults are
    /// overlaid with the profile's options before the Windows and `shared`
    /// rules drop `fPIC`.
    pub fn normalize_options(&mut self) -> Result<&BinaryOptions> {
        self.expect_state(CookState::Unconfigured, "normalize options")?;

        self.recipe.check_identity()?;
        self.recipe
            .requirements()
            .and_then(|_| self.recipe.tool_requirements())
            .map_err(|e| Error::ConfigurationError(format!("Unusable requirement: {}", e)))?;

        let settings = self.profile.settings()?;
        let requested = self.recipe.options.overlay(self.profile.options);
        let options = BinaryOptions::new(&settings, requested);
        info!("Settings: {}", settings);
        info!("Options: {}", options);

        self.settings = Some(settings);
        self.options = Some(options);
        self.state = CookState::OptionsNormalized;
        self.options()
    }

    /// Step 2: resolve source, build, generators and package directories
    pub fn resolve_layout(&mut self) -> Result<&Layout> {
        self.expect_state(CookState::OptionsNormalized, "resolve layout")?;

        let layout = Layout::resolve(
            self.recipe,
            self.settings()?,
            self.options()?,
            &self.source_dir,
            &self.config.root,
        )?;
        debug!("Build directory: {}", layout.build_dir.display());
        debug!("Package directory: {}", layout.package_dir.display());

        self.layout = Some(layout);
        self.state = CookState::LayoutResolved;
        self.layout()
    }

    /// Step 3: write the Meson machine file and pkg-config modules
    pub fn generate_toolchain(&mut self) -> Result<&GeneratedToolchain> {
        self.expect_state(CookState::LayoutResolved, "generate toolchain")?;

        let recipe = self.recipe;
        let profile = self.profile;
        let settings = self.settings()?;
        let options = self.options()?;
        let layout = self.layout()?;
        let requirements = recipe.requirements()?;

        let (kind, machine_file) = MesonToolchain::new(settings, options, layout)
            .with_tools(profile.tools.clone())
            .with_build_machine(self.config.build_machine)
            .generate()?;

        let deps = PkgConfigDeps::new(requirements, &profile.dependencies);
        let unresolved: Vec<String> = deps
            .unresolved()
            .iter()
            .map(|r| format!("No resolved prefix for requirement {}", r))
            .collect();
        let pkg_config_files = deps.generate(&layout.generators_dir)?;

        self.warnings.extend(unresolved);
        self.toolchain = Some(GeneratedToolchain {
            kind,
            machine_file,
            pkg_config_files,
        });
        self.state = CookState::ToolchainGenerated;
        self.toolchain()
    }

    /// Step 4: configure, then compile
    pub fn build<B: BuildSystem + ?Sized>(&mut self, build_system: &mut B) -> Result<()> {
        self.expect_state(CookState::ToolchainGenerated, "build")?;

        let layout = self.layout()?.clone();
        let toolchain = self.toolchain()?.clone();

        let configured = build_system.configure(&layout, &toolchain);
        self.append_log(build_system.take_log());
        configured?;

        let compiled = build_system.build(&layout);
        self.append_log(build_system.take_log());
        compiled?;

        self.state = CookState::Built;
        Ok(())
    }

    /// Step 5: install into the package directory
    pub fn install<B: BuildSystem + ?Sized>(&mut self, build_system: &mut B) -> Result<()> {
        self.expect_state(CookState::Built, "install")?;

        let layout = self.layout()?.clone();
        let installed = build_system.install(&layout);
        self.append_log(build_system.take_log());
        installed?;

        info!("Installed to {}", layout.package_dir.display());
        self.state = CookState::Installed;
        Ok(())
    }

    /// Step 6: describe the installed package for consumers
    pub fn export_metadata(&mut self) -> Result<&CppInfo> {
        self.expect_state(CookState::Installed, "export metadata")?;

        let metadata = CppInfo::for_recipe(self.recipe, self.options()?);
        self.metadata = Some(metadata);
        self.state = CookState::MetadataExported;
        self.metadata()
    }

    /// Run the whole pipeline from `UNCONFIGURED`
    ///
    /// Stops at the first failure; [`state`](Self::state) then reports the
    /// last state reached.
    pub fn run<B: BuildSystem + ?Sized>(&mut self, build_system: &mut B) -> Result<CookResult> {
        info!("Cooking {}", self.recipe.reference());

        let result = self.run_steps(build_system);
        if let Err(e) = &result {
            error!(
                "Cooking {} failed after {}: {}",
                self.recipe.reference(),
                self.state,
                e
            );
        }
        result
    }

    fn run_steps<B: BuildSystem + ?Sized>(&mut self, build_system: &mut B) -> Result<CookResult> {
        info!("Normalizing options...");
        self.normalize_options()?;

        info!("Resolving layout...");
        self.resolve_layout()?;

        info!("Generating toolchain...");
        self.generate_toolchain()?;

        info!("Building...");
        self.build(build_system)?;

        info!("Installing...");
        self.install(build_system)?;

        self.export_metadata()?;

        Ok(CookResult {
            state: self.state,
            options: *self.options()?,
            layout: self.layout()?.clone(),
            toolchain: self.toolchain()?.clone(),
            metadata: self.metadata()?.clone(),
            log: self.log.clone(),
            warnings: self.warnings.clone(),
        })
    }

    fn expect_state(&self, expected: CookState, action: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(Error::InvalidState {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    fn missing(&self, action: &'static str) -> Error {
        Error::InvalidState {
            state: self.state,
            action,
        }
    }

    pub fn settings(&self) -> Result<&Settings> {
        self.settings.as_ref().ok_or_else(|| self.missing("read settings"))
    }

    pub fn options(&self) -> Result<&BinaryOptions> {
        self.options.as_ref().ok_or_else(|| self.missing("read options"))
    }

    pub fn layout(&self) -> Result<&Layout> {
        self.layout.as_ref().ok_or_else(|| self.missing("read layout"))
    }

    pub fn toolchain(&self) -> Result<&GeneratedToolchain> {
        self.toolchain.as_ref().ok_or_else(|| self.missing("read toolchain"))
    }

    pub fn metadata(&self) -> Result<&CppInfo> {
        self.metadata.as_ref().ok_or_else(|| self.missing("read metadata"))
    }

    fn append_log(&mut self, output: String) {
        if !output.is_empty() {
            self.log.push_str(&output);
        }
    }
}
