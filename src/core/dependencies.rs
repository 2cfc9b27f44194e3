//! Extracted models and the final dependency delta.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::target::{OrderedSet, Target};

/// Targets of one CMake configuration (e.g. `Debug`, or `""` for
/// single-config generators without a build type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedConfiguration {
    pub name: String,
    pub targets: BTreeMap<String, Target>,
}

impl ExtractedConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        ExtractedConfiguration {
            name: name.into(),
            targets: BTreeMap::new(),
        }
    }
}

/// Settings keyed by configuration name.
///
/// Used both for a raw extracted model and for the difference between two
/// models, which is what callers of the library receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependenciesInfo {
    pub configurations: BTreeMap<String, ExtractedConfiguration>,
}

impl DependenciesInfo {
    /// True iff no configuration is present.
    pub fn empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Look up a target of a configuration.
    pub fn target(&self, configuration: &str, target: &str) -> Option<&Target> {
        self.configurations
            .get(configuration)
            .and_then(|c| c.targets.get(target))
    }
}

fn write_set(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    field: &str,
    set: &OrderedSet,
) -> fmt::Result {
    let items: Vec<&str> = set.iter().map(String::as_str).collect();
    writeln!(f, "{:indent$}{}: [{}]", "", field, items.join(", "), indent = indent)
}

impl fmt::Display for DependenciesInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for configuration in self.configurations.values() {
            writeln!(f, "configuration: {}", configuration.name)?;

            for target in configuration.targets.values() {
                writeln!(f, "  target: {}", target.name)?;

                for (language, compilation) in &target.compilations {
                    writeln!(f, "    language: {}", language)?;
                    write_set(f, 6, "include_directories", &compilation.include_directories)?;
                    write_set(f, 6, "defines", &compilation.defines)?;
                    write_set(f, 6, "compilation_flags", &compilation.compilation_flags)?;
                    write_set(f, 6, "source_files", &compilation.source_files)?;
                }

                write_set(f, 4, "library_directories", &target.library_directories)?;
                write_set(f, 4, "link_libraries", &target.link_libraries)?;
                write_set(f, 4, "link_flags", &target.link_flags)?;
            }
        }
        Ok(())
    }
}
