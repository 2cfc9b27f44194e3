//! The caller's description of what to probe.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::package::Package;

/// A `-D<key>=<value>` option passed to CMake at configure time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CMakeOption {
    pub key: String,
    pub value: String,
}

impl CMakeOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        CMakeOption {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The `-D` token for this option.
    pub fn to_define(&self) -> String {
        format!("-D{}={}", self.key, self.value)
    }
}

impl std::str::FromStr for CMakeOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(CMakeOption::new(key, value)),
            _ => Err(format!("invalid option '{}'; expected KEY=VALUE", s)),
        }
    }
}

/// Which packages and targets to probe, and how to invoke CMake.
///
/// Loadable from TOML:
///
/// ```toml
/// generator = "Ninja"
/// targets = ["Boost::filesystem"]
/// args = ["--log-level=WARNING"]
///
/// [[packages]]
/// name = "Boost"
/// version = "1.73.0"
/// constraints = ["COMPONENTS filesystem"]
///
/// [[options]]
/// key = "CMAKE_PREFIX_PATH"
/// value = "/opt/boost"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// CMake generator, passed as `-G`.
    pub generator: Option<String>,

    /// Packages to look up in the dependent project.
    pub packages: Vec<Package>,

    /// Qualified names of the exported targets to probe, e.g. `fmt::fmt`.
    pub targets: Vec<String>,

    /// Options passed as `-D<key>=<value>`.
    pub options: Vec<CMakeOption>,

    /// Raw arguments passed to the configure step before everything else.
    pub args: Vec<String>,
}

impl Request {
    /// Parse a request from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse request")
    }

    /// Load a request from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid request file: {}", path.display()))
    }

    /// Add a package to look up.
    pub fn package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Add a target to probe.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Add a `-D` option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(CMakeOption::new(key, value));
        self
    }
}
