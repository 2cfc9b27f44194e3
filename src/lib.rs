//! Wyvern - deduce how to consume CMake packages
//!
//! Given packages and the imported targets they provide, Wyvern builds two
//! synthetic CMake projects, one linking the targets and one not, reads the
//! build model CMake reports for each through its file API and subtracts
//! them. What remains per configuration and target is exactly what a
//! consumer must add to compile and link against the package: include
//! directories, defines, compile flags, link flags and libraries.

pub mod cmake;
pub mod core;
pub mod errors;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Wyvern unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted CMake stand-in and file API reply
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{DependenciesInfo, Options, Package, Request, Target, VerificationTemplate};
pub use errors::{ExtractError, Result};
pub use ops::{extract_dependencies, install_package, DependencyExtractor};
