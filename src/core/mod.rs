//! Core data structures for Wyvern.
//!
//! This module contains the foundational types used throughout Wyvern:
//! - The caller's request (packages, targets, CMake options)
//! - Typed target models and the dependency delta
//! - Synthetic target naming
//! - Scoped workspaces

pub mod dependencies;
pub mod naming;
pub mod options;
pub mod package;
pub mod request;
pub mod target;
pub mod template;
pub mod workspace;

pub use dependencies::{DependenciesInfo, ExtractedConfiguration};
pub use options::Options;
pub use package::Package;
pub use request::{CMakeOption, Request};
pub use target::{Compilation, OrderedSet, Target};
pub use template::VerificationTemplate;
pub use workspace::Workspace;
