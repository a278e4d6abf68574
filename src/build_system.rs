// src/build_system.rs

//! External build system invocation
//!
//! The orchestrator only knows three operations: configure, build and
//! install. [`Meson`] implements them by running the `meson` executable as a
//! blocking child process. There is no timeout and no retry: a non-zero exit
//! is reported to the caller and the pipeline stops.

use crate::error::{BuildStep, Error, Result};
use crate::layout::Layout;
use crate::toolchain::GeneratedToolchain;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Operations the orchestrator needs from an external build system
pub trait BuildSystem {
    /// Prepare the build directory from the generated toolchain
    fn configure(&mut self, layout: &Layout, toolchain: &GeneratedToolchain) -> Result<()>;

    /// Compile everything configured in the build directory
    fn build(&mut self, layout: &Layout) -> Result<()>;

    /// Copy compiled artifacts into the package directory
    fn install(&mut self, layout: &Layout) -> Result<()>;

    /// Drain captured output of the steps run so far
    fn take_log(&mut self) -> String {
        String::new()
    }
}

/// Meson driven through its command line
#[derive(Debug)]
pub struct Meson {
    program: PathBuf,
    jobs: u32,
    log: String,
}

impl Meson {
    pub fn new(program: impl Into<PathBuf>, jobs: u32) -> Self {
        Self {
            program: program.into(),
            jobs,
            log: String::new(),
        }
    }

    /// Find `program` on `PATH` (or accept it as a path)
    pub fn locate(program: &str, jobs: u32) -> Result<Self> {
        let path = which::which(program).map_err(|e| {
            Error::ConfigurationError(format!("Meson executable '{}' not found: {}", program, e))
        })?;
        debug!("Using meson at {}", path.display());
        Ok(Self::new(path, jobs))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub(crate) fn setup_args(layout: &Layout, toolchain: &GeneratedToolchain) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "setup".into(),
            toolchain.kind.setup_flag().into(),
            toolchain.machine_file.clone().into(),
        ];
        // An earlier configure of the same layout leaves meson-private behind
        if layout.build_dir.join("meson-private").is_dir() {
            args.push("--reconfigure".into());
        }
        args.push(layout.build_dir.clone().into());
        args.push(layout.source_dir.clone().into());
        args
    }

    pub(crate) fn compile_args(&self, layout: &Layout) -> Vec<OsString> {
        vec![
            "compile".into(),
            "-C".into(),
            layout.build_dir.clone().into(),
            "-j".into(),
            self.jobs.to_string().into(),
        ]
    }

    pub(crate) fn install_args(layout: &Layout) -> Vec<OsString> {
        vec![
            "install".into(),
            "-C".into(),
            layout.build_dir.clone().into(),
            "--destdir".into(),
            layout.package_dir.clone().into(),
        ]
    }

    /// Run meson, capturing output into the log
    fn run(&mut self, phase: &str, args: &[OsString]) -> std::result::Result<(), String> {
        info!("Running {} phase", phase);
        debug!("Command: {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| format!("Failed to run {}: {}", self.program.display(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.log_build_output(phase, &stdout, &stderr);

        if !output.status.success() {
            return Err(format!(
                "exit code {:?}\nstderr: {}",
                output.status.code(),
                stderr.trim_end()
            ));
        }

        Ok(())
    }

    fn log_build_output(&mut self, phase: &str, stdout: &str, stderr: &str) {
        self.log.push_str(&format!("=== {} ===\n", phase));
        if !stdout.is_empty() {
            self.log.push_str(stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(stderr);
            self.log.push('\n');
        }
    }
}

impl BuildSystem for Meson {
    fn configure(&mut self, layout: &Layout, toolchain: &GeneratedToolchain) -> Result<()> {
        let args = Self::setup_args(layout, toolchain);
        self.run("configure", &args).map_err(|message| Error::BuildError {
            step: BuildStep::Configure,
            message,
        })
    }

    fn build(&mut self, layout: &Layout) -> Result<()> {
        let args = self.compile_args(layout);
        self.run("compile", &args).map_err(|message| Error::BuildError {
            step: BuildStep::Compile,
            message,
        })
    }

    fn install(&mut self, layout: &Layout) -> Result<()> {
        let args = Self::install_args(layout);
        self.run("install", &args).map_err(Error::InstallError)
    }

    fn take_log(&mut self) -> String {
        std::mem::take(&mut self.log)
    }
}
