//! Run-scoped extraction options.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::template::VerificationTemplate;

/// How to run an extraction.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Keep the generated projects on disk instead of deleting them.
    pub keep_generated_projects: bool,

    /// Code spliced into each dependent probe source.
    pub verification_code: Option<VerificationTemplate>,

    /// Dump raw and extracted models to the log.
    pub enable_logging: bool,

    /// Run the control and dependent cycles concurrently.
    pub parallel: bool,

    /// Kill any single CMake invocation running longer than this.
    pub process_timeout: Option<Duration>,

    /// CMake executable (default: `cmake` found on PATH).
    pub cmake_program: Option<PathBuf>,

    /// Configuration passed as `--config` to build and install steps.
    pub build_config: Option<String>,
}

impl Options {
    pub fn keep_generated_projects(mut self, keep: bool) -> Self {
        self.keep_generated_projects = keep;
        self
    }

    pub fn verification_code(mut self, template: VerificationTemplate) -> Self {
        self.verification_code = Some(template);
        self
    }

    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn process_timeout(mut self, timeout: Duration) -> Self {
        self.process_timeout = Some(timeout);
        self
    }

    pub fn cmake_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.cmake_program = Some(program.into());
        self
    }

    pub fn build_config(mut self, config: impl Into<String>) -> Self {
        self.build_config = Some(config.into());
        self
    }
}
