// src/toolchain/meson.rs

//! Meson machine file generation
//!
//! Native builds get a native file; builds for another os/arch than the
//! build machine get a cross file carrying a `[host_machine]` section.

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::options::BinaryOptions;
use crate::profile::ToolsSection;
use crate::settings::{Compiler, Machine, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the generated native file
pub const NATIVE_FILE_NAME: &str = "pixles_meson_native.ini";
/// File name of the generated cross file
pub const CROSS_FILE_NAME: &str = "pixles_meson_cross.ini";

/// Kind of machine file handed to `meson setup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineFileKind {
    Native,
    Cross,
}

impl MachineFileKind {
    /// The `meson setup` flag that takes this file
    pub fn setup_flag(&self) -> &'static str {
        match self {
            MachineFileKind::Native => "--native-file",
            MachineFileKind::Cross => "--cross-file",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            MachineFileKind::Native => NATIVE_FILE_NAME,
            MachineFileKind::Cross => CROSS_FILE_NAME,
        }
    }
}

/// Meson toolchain description derived from settings and options
#[derive(Debug, Clone)]
pub struct MesonToolchain<'a> {
    settings: &'a Settings,
    options: &'a BinaryOptions,
    layout: &'a Layout,
    tools: ToolsSection,
    build_machine: Option<Machine>,
}

impl<'a> MesonToolchain<'a> {
    pub fn new(settings: &'a Settings, options: &'a BinaryOptions, layout: &'a Layout) -> Self {
        Self {
            settings,
            options,
            layout,
            tools: ToolsSection::default(),
            build_machine: None,
        }
    }

    /// Use explicit compiler executables
    pub fn with_tools(mut self, tools: ToolsSection) -> Self {
        self.tools = tools;
        self
    }

    /// Declare the machine running the build, enabling cross detection
    pub fn with_build_machine(mut self, machine: Option<Machine>) -> Self {
        self.build_machine = machine;
        self
    }

    /// Whether the target differs from the build machine
    pub fn is_cross(&self) -> bool {
        let Some(build) = self.build_machine else {
            return false;
        };
        if build.os != self.settings.os {
            return true;
        }
        self.settings.arch.is_some_and(|arch| arch != build.arch)
    }

    pub fn kind(&self) -> MachineFileKind {
        if self.is_cross() {
            MachineFileKind::Cross
        } else {
            MachineFileKind::Native
        }
    }

    /// Render the machine file
    pub fn content(&self) -> String {
        let mut out = String::new();
        let compiler = self.settings.compiler;

        let cc = self.tools.cc.as_deref().unwrap_or(compiler.c_binary());
        let cxx = self.tools.cxx.as_deref().unwrap_or(compiler.cpp_binary());

        out.push_str("[binaries]\n");
        out.push_str(&format!("c = {}\n", quote(cc)));
        out.push_str(&format!("cpp = {}\n", quote(cxx)));
        out.push('\n');

        out.push_str("[built-in options]\n");
        out.push_str(&format!(
            "buildtype = {}\n",
            quote(self.settings.build_type.meson_buildtype())
        ));
        let library = if self.options.shared() { "shared" } else { "static" };
        out.push_str(&format!("default_library = {}\n", quote(library)));
        if let Some(fpic) = self.options.fpic() {
            out.push_str(&format!("b_staticpic = {}\n", fpic));
        }
        out.push_str("b_ndebug = 'if-release'\n");
        if compiler == Compiler::Msvc {
            let runtime = if self.settings.build_type.is_debug() { "mdd" } else { "md" };
            out.push_str(&format!("b_vscrt = {}\n", quote(runtime)));
        }
        out.push_str("backend = 'ninja'\n");
        out.push_str(&format!(
            "pkg_config_path = {}\n",
            quote(&self.layout.generators_dir.to_string_lossy())
        ));
        out.push_str("prefix = '/'\n");
        out.push_str("bindir = 'bin'\n");
        out.push_str("libdir = 'lib'\n");
        out.push_str("includedir = 'include'\n");

        if self.is_cross() {
            out.push('\n');
            out.push_str("[host_machine]\n");
            out.push_str(&format!("system = {}\n", quote(self.settings.os.meson_system())));
            if let Some(arch) = self.settings.arch {
                out.push_str(&format!("cpu_family = {}\n", quote(arch.meson_cpu_family())));
                out.push_str(&format!("cpu = {}\n", quote(arch.meson_cpu())));
            }
            out.push_str("endian = 'little'\n");
        }

        out
    }

    /// Write the machine file into the generators directory
    pub fn generate(&self) -> Result<(MachineFileKind, PathBuf)> {
        let kind = self.kind();
        let path = self.layout.generators_dir.join(kind.file_name());
        write_generated(&path, &self.content())?;
        info!("Generated Meson {:?} file: {}", kind, path.display());
        Ok((kind, path))
    }
}

/// Write a generated file, creating parent directories
pub(crate) fn write_generated(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::IoError(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    fs::write(path, content)
        .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Quote a value as a Meson string literal
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
