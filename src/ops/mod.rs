//! High-level operations.
//!
//! This module contains the implementation of Wyvern's entry points.

pub mod diff;
pub mod extract;
pub mod install;

pub use diff::diff;
pub use extract::{extract_dependencies, DependencyExtractor};
pub use install::install_package;
