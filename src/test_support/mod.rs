//! Test utilities and mocks for Wyvern unit tests.
//!
//! [`FakeCMake`] stands in for the CMake executable behind the
//! [`CommandRunner`] seam. It records every invocation, can be scripted to
//! fail, and on configure answers the file API query the way CMake would:
//! it reads the synthesized `CMakeLists.txt`, finds the probe executables
//! and writes a reply describing them.
//!
//! # Example
//!
//! ```rust,ignore
//! let fake = FakeCMake::new()
//!     .dependent(TargetSettings::default().include("/pkg/include"));
//! let info = DependencyExtractor::new(&fake).extract(&request, &options)?;
//! ```

pub mod fixtures;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use crate::util::process::{CommandRunner, ProcessBuilder, ProcessError};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create an output with both stdout and stderr.
    pub fn with_output(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    fn into_output(self) -> Output {
        Output {
            status: exit_status(self.status),
            stdout: self.stdout.into_bytes(),
            stderr: self.stderr.into_bytes(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// A project the fake was asked to configure, captured before the
/// workspace holding it goes away.
#[derive(Debug, Clone)]
pub struct ConfiguredProject {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub dependent: bool,
    pub cmakelists: String,
    /// Probe sources by file name.
    pub sources: BTreeMap<String, String>,
}

/// Scripted stand-in for the `cmake` executable.
#[derive(Debug)]
pub struct FakeCMake {
    configurations: Vec<String>,
    baseline: TargetSettings,
    dependent: TargetSettings,
    reply: bool,
    failures: Vec<(String, MockProcessOutput)>,
    calls: Mutex<Vec<String>>,
    configured: Mutex<Vec<ConfiguredProject>>,
}

impl Default for FakeCMake {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCMake {
    /// A fake reporting `Debug` and `Release` with no settings at all.
    pub fn new() -> Self {
        FakeCMake {
            configurations: vec!["Debug".to_string(), "Release".to_string()],
            baseline: TargetSettings::default(),
            dependent: TargetSettings::default(),
            reply: true,
            failures: Vec::new(),
            calls: Mutex::new(Vec::new()),
            configured: Mutex::new(Vec::new()),
        }
    }

    /// Configurations listed in the codemodel.
    pub fn configurations<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.configurations = names.into_iter().map(Into::into).collect();
        self
    }

    /// Settings every probe target gets, in both projects.
    pub fn baseline(mut self, settings: TargetSettings) -> Self {
        self.baseline = settings;
        self
    }

    /// Settings added to every probe target of a project that calls
    /// `find_package`.
    pub fn dependent(mut self, settings: TargetSettings) -> Self {
        self.dependent = settings;
        self
    }

    /// Configure successfully without writing any reply.
    pub fn without_reply(mut self) -> Self {
        self.reply = false;
        self
    }

    /// Answer any command containing `pattern` with `output`.
    pub fn fail_on(mut self, pattern: &str, output: MockProcessOutput) -> Self {
        self.failures.push((pattern.to_string(), output));
        self
    }

    /// Every command run so far, as displayed.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Every project configured so far.
    pub fn configured(&self) -> Vec<ConfiguredProject> {
        self.configured.lock().unwrap().clone()
    }

    fn configure(&self, source_dir: &Path, build_dir: &Path) -> MockProcessOutput {
        let cmakelists = match std::fs::read_to_string(source_dir.join("CMakeLists.txt")) {
            Ok(text) => text,
            Err(_) => {
                return MockProcessOutput::failure(
                    1,
                    format!(
                        "CMake Error: The source directory \"{}\" does not appear to \
                         contain CMakeLists.txt.",
                        source_dir.display()
                    ),
                )
            }
        };

        let dependent = cmakelists.contains("find_package(");
        let executables = executables(&cmakelists);

        let mut sources = BTreeMap::new();
        for name in &executables {
            let file = format!("{}.cpp", name);
            if let Ok(text) = std::fs::read_to_string(source_dir.join(&file)) {
                sources.insert(file, text);
            }
        }

        if self.reply {
            let settings = if dependent {
                self.baseline.merged(&self.dependent)
            } else {
                self.baseline.clone()
            };
            let fixture = executables
                .iter()
                .fold(ReplyFixture::new(self.configurations.clone()), |f, name| {
                    f.target(name, settings.clone())
                })
                .target("ALL_BUILD", TargetSettings::default())
                .target("ZERO_CHECK", TargetSettings::default());
            write_reply(build_dir, &fixture);
        }

        self.configured.lock().unwrap().push(ConfiguredProject {
            source_dir: source_dir.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
            dependent,
            cmakelists,
            sources,
        });

        MockProcessOutput::success("-- Configuring done\n-- Generating done\n")
    }
}

impl CommandRunner for FakeCMake {
    fn run(
        &self,
        cmd: &ProcessBuilder,
        _timeout: Option<Duration>,
    ) -> Result<Output, ProcessError> {
        let command = cmd.display_command();
        self.calls.lock().unwrap().push(command.clone());

        let failure = self.failures.iter().find(|(p, _)| command.contains(p.as_str()));
        if let Some((_, output)) = failure {
            return Ok(output.clone().into_output());
        }

        let output = match (cmd.arg_after("-S"), cmd.arg_after("-B")) {
            (Some(source), Some(build)) => self.configure(Path::new(source), Path::new(build)),
            _ => MockProcessOutput::default(),
        };
        Ok(output.into_output())
    }
}

/// Names of the executables declared in a `CMakeLists.txt`.
fn executables(cmakelists: &str) -> Vec<String> {
    cmakelists
        .lines()
        .filter_map(|line| line.trim().strip_prefix("add_executable("))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(|name| name.trim_end_matches(')').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mock_output_status() {
        let ok = MockProcessOutput::success("done").into_output();
        assert!(ok.status.success());

        let failed = MockProcessOutput::failure(3, "nope").into_output();
        assert_eq!(failed.status.code(), Some(3));
        assert_eq!(failed.stderr, b"nope");
    }

    #[test]
    fn test_executables_parsed() {
        let text = "project(p)\n\
                    add_executable(wyvern_a wyvern_a.cpp wyvern_a.hpp)\n\
                    target_link_libraries(wyvern_a PRIVATE a)\n\
                    add_executable(wyvern_b wyvern_b.cpp)\n";
        assert_eq!(executables(text), vec!["wyvern_a", "wyvern_b"]);
    }

    #[test]
    fn test_configure_writes_reply() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        let build = tmp.path().join("build");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(
            source.join("CMakeLists.txt"),
            "add_executable(wyvern_t1 wyvern_t1.cpp wyvern_t1.hpp)\n",
        )
        .unwrap();

        let fake = FakeCMake::new().configurations(["Release"]);
        let cmd = ProcessBuilder::new("cmake")
            .arg("-S")
            .arg(&source)
            .arg("-B")
            .arg(&build);
        let output = fake.run(&cmd, None).unwrap();

        assert!(output.status.success());
        let model = crate::cmake::file_api::read_reply(&build).unwrap();
        assert_eq!(model.configurations["Release"].keys().collect::<Vec<_>>(), vec!["wyvern_t1"]);
        assert!(!fake.configured()[0].dependent);
    }

    #[test]
    fn test_missing_source_fails_configure() {
        let tmp = TempDir::new().unwrap();
        let fake = FakeCMake::new();
        let cmd = ProcessBuilder::new("cmake")
            .arg("-S")
            .arg(tmp.path().join("nowhere"))
            .arg("-B")
            .arg(tmp.path().join("build"));

        let output = fake.run(&cmd, None).unwrap();
        assert!(!output.status.success());
        assert!(fake.configured().is_empty());
    }
}
