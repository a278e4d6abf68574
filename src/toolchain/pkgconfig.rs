// src/toolchain/pkgconfig.rs

//! pkg-config files for resolved dependencies
//!
//! Meson finds dependencies through pkg-config. For each pinned requirement
//! with a resolved prefix in the profile, a `<name>.pc` module is written,
//! plus one module per declared component (`libavcodec.pc`, ...).

use crate::error::Result;
use crate::profile::ResolvedDependency;
use crate::recipe::PackageReference;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::meson::write_generated;

/// pkg-config generator for a recipe's requirements
#[derive(Debug)]
pub struct PkgConfigDeps<'a> {
    requirements: Vec<PackageReference>,
    resolved: &'a BTreeMap<String, ResolvedDependency>,
}

impl<'a> PkgConfigDeps<'a> {
    pub fn new(
        requirements: Vec<PackageReference>,
        resolved: &'a BTreeMap<String, ResolvedDependency>,
    ) -> Self {
        Self {
            requirements,
            resolved,
        }
    }

    /// Requirements with no resolved prefix
    pub fn unresolved(&self) -> Vec<&PackageReference> {
        self.requirements
            .iter()
            .filter(|r| !self.resolved.contains_key(&r.name))
            .collect()
    }

    /// Render all modules as `(file name, content)` pairs
    pub fn files(&self) -> Vec<(String, String)> {
        let mut files = Vec::new();

        for requirement in &self.requirements {
            let Some(dep) = self.resolved.get(&requirement.name) else {
                continue;
            };
            let version = requirement.version.to_string();

            files.push((
                format!("{}.pc", requirement.name),
                root_module(&requirement.name, &version, dep),
            ));
            for component in &dep.components {
                files.push((
                    format!("{}.pc", component),
                    component_module(&requirement.name, component, &version, dep),
                ));
            }
        }

        files
    }

    /// Write all modules into `dir`
    pub fn generate(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        for name in self.resolved.keys() {
            if !self.requirements.iter().any(|r| &r.name == name) {
                warn!("Ignoring resolved dependency '{}': not required by the recipe", name);
            }
        }
        for requirement in self.unresolved() {
            warn!(
                "No resolved prefix for {}: leaving lookup to the build system",
                requirement
            );
        }

        let mut written = Vec::new();
        for (name, content) in self.files() {
            let path = dir.join(&name);
            write_generated(&path, &content)?;
            written.push(path);
        }

        if !written.is_empty() {
            info!("Generated {} pkg-config file(s) in {}", written.len(), dir.display());
        }
        Ok(written)
    }
}

fn header(dep: &ResolvedDependency) -> String {
    let prefix = dep.prefix.to_string_lossy().replace('\\', "/");
    format!(
        "prefix={}\nlibdir=${{prefix}}/{}\nincludedir=${{prefix}}/{}\n\n",
        prefix, dep.lib_dir, dep.include_dir
    )
}

fn root_module(name: &str, version: &str, dep: &ResolvedDependency) -> String {
    let mut out = header(dep);
    out.push_str(&format!("Name: {}\n", name));
    out.push_str(&format!("Description: Resolved dependency {}\n", name));
    out.push_str(&format!("Version: {}\n", version));
    if dep.components.is_empty() {
        out.push_str(&format!("Libs: -L\"${{libdir}}\" -l{}\n", name));
    } else {
        out.push_str(&format!("Requires: {}\n", dep.components.join(" ")));
        out.push_str("Libs: -L\"${libdir}\"\n");
    }
    out.push_str("Cflags: -I\"${includedir}\"\n");
    out
}

fn component_module(package: &str, component: &str, version: &str, dep: &ResolvedDependency) -> String {
    let link_name = component.strip_prefix("lib").unwrap_or(component);
    let mut out = header(dep);
    out.push_str(&format!("Name: {}\n", component));
    out.push_str(&format!("Description: {} component of {}\n", component, package));
    out.push_str(&format!("Version: {}\n", version));
    out.push_str(&format!("Libs: -L\"${{libdir}}\" -l{}\n", link_name));
    out.push_str("Cflags: -I\"${includedir}\"\n");
    out
}
