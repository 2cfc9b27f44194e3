//! Shared utilities

pub mod config;
pub mod fs;
pub mod log;
pub mod process;

pub use config::Config;
pub use log::ExtractionLog;
pub use process::{CommandRunner, ProcessBuilder, SystemRunner};
