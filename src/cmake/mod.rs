//! CMake integration.
//!
//! This module synthesizes probe projects, drives CMake through configure
//! and build, and reads the build model CMake reports through its file API.

pub mod driver;
pub mod extract;
pub mod file_api;
pub mod fragment;
pub mod project;

pub use driver::CMakeDriver;
pub use extract::{extract_model, extract_target, LinkRole};
pub use file_api::{read_reply, write_query, RawDocument, RawModel};
pub use fragment::split_fragment;
pub use project::{ProbeProject, ProbeTarget, ProjectSynthesizer, SynthesisMode};
