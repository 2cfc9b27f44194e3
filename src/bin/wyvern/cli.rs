//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use wyvern::core::CMakeOption;

/// Wyvern - deduce the compile and link settings a CMake package requires
#[derive(Parser)]
#[command(name = "wyvern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Prefix the package is installed under
    pub install_prefix: PathBuf,

    /// Package name, as passed to find_package
    pub package: String,

    /// Imported targets to probe (defaults to <package>::<package>)
    pub targets: Vec<String>,

    /// Version requested from find_package
    #[arg(long, value_name = "VERSION")]
    pub package_version: Option<String>,

    /// Extra find_package argument, e.g. CONFIG or "COMPONENTS json"
    #[arg(long, value_name = "ARG")]
    pub find_arg: Vec<String>,

    /// CMake generator
    #[arg(short = 'G', long)]
    pub generator: Option<String>,

    /// Define a CMake cache entry
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub define: Vec<CMakeOption>,

    /// Raw argument passed to the configure step
    #[arg(long, value_name = "ARG", allow_hyphen_values = true)]
    pub cmake_arg: Vec<String>,

    /// Configuration to build and install (multi-config generators)
    #[arg(long, value_name = "CONFIG")]
    pub build_config: Option<String>,

    /// Request file with further packages, targets and options
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Verification code template; `{target}` expands to each target's name
    #[arg(long, value_name = "FILE")]
    pub verify_code: Option<PathBuf>,

    /// CMake executable to use
    #[arg(long, value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Kill any CMake invocation running longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Delete the generated projects after extraction
    #[arg(long)]
    pub clean: bool,

    /// Do not dump intermediate models to the log
    #[arg(long)]
    pub no_dump: bool,

    /// Run the control and dependent builds concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Configure, build and install this CMake project into the prefix first
    #[arg(long, value_name = "DIR")]
    pub install_from: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
