//! Extraction error types and diagnostics.
//!
//! Every failure is fatal: the first error aborts the run and the caller
//! never sees a partial `DependenciesInfo`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::util::process::ProcessError;

/// Result alias used across the library.
pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

/// The CMake invocation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Configure,
    Build,
    Install,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::Configure => write!(f, "configuration"),
            BuildStep::Build => write!(f, "build"),
            BuildStep::Install => write!(f, "install"),
        }
    }
}

/// Error during dependency extraction.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    #[error("CMake {step} failed with exit code {status:?}: `{command}`\n{stderr}")]
    #[diagnostic(
        code(wyvern::cmake::failed),
        help("Run with --verbose and keep the generated projects to inspect the failing build")
    )]
    ConfigurationFailure {
        step: BuildStep,
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("expected exactly one reply index in {}, found {found}", directory.display())]
    #[diagnostic(
        code(wyvern::reply::missing),
        help("The CMake file API needs CMake 3.14 or newer")
    )]
    MissingReplyDocument { directory: PathBuf, found: usize },

    #[error("unexpected content in {}: {detail}", document.display())]
    #[diagnostic(code(wyvern::reply::schema))]
    SchemaViolation { document: PathBuf, detail: String },

    #[error("malformed reply document {}", document.display())]
    #[diagnostic(code(wyvern::reply::malformed))]
    MalformedReply {
        document: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {action} `{}`", path.display())]
    #[diagnostic(code(wyvern::fs))]
    FilesystemFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("control and dependent models diverged: {detail}")]
    #[diagnostic(code(wyvern::diff::inconsistent))]
    InternalConsistency { detail: String },

    #[error("targets `{first}` and `{second}` both normalize to `{normalized}`")]
    #[diagnostic(
        code(wyvern::request::collision),
        help("Request each target only once, under names that differ after normalization")
    )]
    NameCollision {
        first: String,
        second: String,
        normalized: String,
    },

    #[error("`{tool}` not found")]
    #[diagnostic(
        code(wyvern::cmake::not_found),
        help("Install CMake 3.14 or newer and ensure it is in your PATH")
    )]
    ToolNotFound { tool: String },

    #[error(transparent)]
    #[diagnostic(code(wyvern::process))]
    Process(#[from] ProcessError),
}

impl ExtractError {
    /// Wrap an I/O error raised while touching `path`.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExtractError::FilesystemFailure {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error raised while reading `document`.
    pub fn malformed(document: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ExtractError::MalformedReply {
            document: document.into(),
            source,
        }
    }

    /// Report content that does not match the consumed reply schema.
    pub fn schema(document: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        ExtractError::SchemaViolation {
            document: document.into(),
            detail: detail.into(),
        }
    }
}
