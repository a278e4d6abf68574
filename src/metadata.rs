// src/metadata.rs

//! Consumer metadata
//!
//! What a downstream package needs to link against this one once it is
//! installed. Purely descriptive: producing it cannot fail.

use crate::options::BinaryOptions;
use crate::recipe::{Recipe, ResolvedPackageType};
use serde::{Deserialize, Serialize};

/// Linkage descriptor exported to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CppInfo {
    /// Libraries to link, by logical name
    pub libs: Vec<String>,
    /// Header directories relative to the package directory
    pub includedirs: Vec<String>,
    /// Library directories relative to the package directory
    pub libdirs: Vec<String>,
    /// Executable/DLL directories relative to the package directory
    pub bindirs: Vec<String>,
    pub package_type: ResolvedPackageType,
}

impl CppInfo {
    /// Describe the installed package for a normalized configuration
    pub fn for_recipe(recipe: &Recipe, options: &BinaryOptions) -> Self {
        Self {
            libs: recipe.consumer_libs(),
            includedirs: vec!["include".to_string()],
            libdirs: vec!["lib".to_string()],
            bindirs: vec!["bin".to_string()],
            package_type: recipe.package.package_type.resolve(options.shared()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValues;
    use crate::recipe::parse_recipe;
    use crate::settings::{BuildType, Compiler, Os, Settings};

    #[test]
    fn test_cpp_info_for_static_build() {
        let recipe = parse_recipe(
            "[package]\nname = \"pixles_media\"\nversion = \"0.1.0\"\n\n[package_info]\nlibs = [\"pixles_media\"]\n",
        )
        .unwrap();
        let settings = Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release);
        let options = BinaryOptions::new(&settings, OptionValues::default());

        let info = CppInfo::for_recipe(&recipe, &options);
        assert_eq!(info.libs, vec!["pixles_media"]);
        assert_eq!(info.package_type, ResolvedPackageType::StaticLibrary);
    }

    #[test]
    fn test_cpp_info_json() {
        let recipe = parse_recipe("[package]\nname = \"demo\"\nversion = \"1.0\"\n").unwrap();
        let settings = Settings::new(Os::Linux, Compiler::Gcc, BuildType::Release);
        let options = BinaryOptions::new(
            &settings,
            OptionValues {
                shared: Some(true),
                fpic: None,
            },
        );

        let json = serde_json::to_value(CppInfo::for_recipe(&recipe, &options)).unwrap();
        assert_eq!(json["libs"], serde_json::json!(["demo"]));
        assert_eq!(json["package_type"], "shared-library");
    }
}
