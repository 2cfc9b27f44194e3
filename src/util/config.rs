//! Configuration file support for Wyvern.
//!
//! Wyvern reads two optional configuration files:
//! - Global: `~/.wyvern/config.toml` - User-wide defaults
//! - Project: `.wyvern/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Wyvern configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CMake invocation settings
    pub cmake: CMakeConfig,

    /// Extraction settings
    pub extract: ExtractConfig,
}

/// CMake invocation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CMakeConfig {
    /// Path to the cmake executable (default: found on PATH)
    pub program: Option<PathBuf>,

    /// Generator passed as `-G`
    pub generator: Option<String>,

    /// Configuration passed as `--config` to build and install
    pub build_config: Option<String>,

    /// Kill any single CMake invocation running longer than this
    pub timeout_secs: Option<u64>,
}

/// Extraction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Keep the generated projects for inspection (CLI default: keep)
    pub keep_generated: Option<bool>,

    /// Run the control and dependent cycles concurrently (CLI default: off)
    pub parallel: Option<bool>,

    /// Path to a verification code template
    pub verification_code: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.cmake.program.is_some() {
            self.cmake.program = other.cmake.program;
        }
        if other.cmake.generator.is_some() {
            self.cmake.generator = other.cmake.generator;
        }
        if other.cmake.build_config.is_some() {
            self.cmake.build_config = other.cmake.build_config;
        }
        if other.cmake.timeout_secs.is_some() {
            self.cmake.timeout_secs = other.cmake.timeout_secs;
        }

        if other.extract.keep_generated.is_some() {
            self.extract.keep_generated = other.extract.keep_generated;
        }
        if other.extract.parallel.is_some() {
            self.extract.parallel = other.extract.parallel;
        }
        if other.extract.verification_code.is_some() {
            self.extract.verification_code = other.extract.verification_code;
        }
    }

    /// Per-invocation timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.cmake.timeout_secs.map(Duration::from_secs)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.wyvern/config.toml)
/// 2. Global config (~/.wyvern/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global wyvern config directory (~/.wyvern).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".wyvern"))
}

/// Get the global config path (~/.wyvern/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.wyvern/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".wyvern").join("config.toml")
}
