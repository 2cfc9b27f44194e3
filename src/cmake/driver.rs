//! CMake invocation: configure, build and install.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{Options, Request};
use crate::errors::{BuildStep, ExtractError, Result};
use crate::util::process::{find_cmake, CommandRunner, ProcessBuilder};

/// Drives one CMake executable through a runner.
pub struct CMakeDriver<'a> {
    runner: &'a dyn CommandRunner,
    program: PathBuf,
    timeout: Option<Duration>,
    build_config: Option<String>,
}

impl<'a> CMakeDriver<'a> {
    /// Create a driver for `program`.
    pub fn new(runner: &'a dyn CommandRunner, program: impl Into<PathBuf>) -> Self {
        CMakeDriver {
            runner,
            program: program.into(),
            timeout: None,
            build_config: None,
        }
    }

    /// Create a driver from run options, locating `cmake` on PATH unless the
    /// options name a program.
    pub fn from_options(runner: &'a dyn CommandRunner, options: &Options) -> Result<Self> {
        let program = match options.cmake_program {
            Some(ref program) => program.clone(),
            None => find_cmake().ok_or_else(|| ExtractError::ToolNotFound {
                tool: "cmake".to_string(),
            })?,
        };

        let mut driver = CMakeDriver::new(runner, program);
        driver.timeout = options.process_timeout;
        driver.build_config = options.build_config.clone();
        Ok(driver)
    }

    /// Kill any invocation running longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pass `--config <config>` to build and install.
    pub fn build_config(mut self, config: Option<String>) -> Self {
        self.build_config = config;
        self
    }

    /// Arguments of the configure step, in order: raw arguments, `-D`
    /// options, generator, source and build directories.
    pub fn configure_args(request: &Request, source_dir: &Path, build_dir: &Path) -> Vec<String> {
        let mut args: Vec<String> = request.args.clone();

        args.extend(request.options.iter().map(|o| o.to_define()));

        if let Some(ref generator) = request.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }

        args.push("-S".to_string());
        args.push(source_dir.display().to_string());
        args.push("-B".to_string());
        args.push(build_dir.display().to_string());

        args
    }

    /// Run CMake configuration.
    pub fn configure(&self, request: &Request, source_dir: &Path, build_dir: &Path) -> Result<()> {
        tracing::info!("Configuring {}", source_dir.display());
        let args = Self::configure_args(request, source_dir, build_dir);
        self.run(BuildStep::Configure, args)
    }

    /// Run CMake build.
    pub fn build(&self, build_dir: &Path) -> Result<()> {
        tracing::info!("Building {}", build_dir.display());

        let mut args = vec!["--build".to_string(), build_dir.display().to_string()];
        if let Some(ref config) = self.build_config {
            args.push("--config".to_string());
            args.push(config.clone());
        }

        self.run(BuildStep::Build, args)
    }

    /// Run CMake install, optionally overriding the install prefix.
    pub fn install(&self, build_dir: &Path, prefix: Option<&Path>) -> Result<()> {
        tracing::info!("Installing {}", build_dir.display());

        let mut args = vec!["--install".to_string(), build_dir.display().to_string()];
        if let Some(ref config) = self.build_config {
            args.push("--config".to_string());
            args.push(config.clone());
        }
        if let Some(prefix) = prefix {
            args.push("--prefix".to_string());
            args.push(prefix.display().to_string());
        }

        self.run(BuildStep::Install, args)
    }

    fn run(&self, step: BuildStep, args: Vec<String>) -> Result<()> {
        let cmd = ProcessBuilder::new(&self.program).args(args);
        let output = self.runner.run(&cmd, self.timeout)?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            if stderr.trim().is_empty() {
                // Generators such as MSBuild report errors on stdout.
                stderr = String::from_utf8_lossy(&output.stdout).into_owned();
            }
            return Err(ExtractError::ConfigurationFailure {
                step,
                command: cmd.display_command(),
                status: output.status.code(),
                stderr,
            });
        }

        Ok(())
    }
}
