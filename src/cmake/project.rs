//! Synthesized probe projects.
//!
//! A probe project has one executable per requested target, each built from
//! a stub source/header pair. The baseline project stops there. The
//! dependent project additionally looks up every requested package and links
//! each executable against its external target, optionally compiling a
//! verification snippet that only builds if that target is genuinely usable.

use std::path::{Path, PathBuf};

use crate::core::naming::{check_collisions, normalize, synthetic_target_name};
use crate::core::{Request, VerificationTemplate};
use crate::errors::Result;
use crate::util::fs::{ensure_dir, write_string};

/// Oldest CMake with the file API.
const CMAKE_MINIMUM_VERSION: &str = "3.14";

/// Which of the two congruent projects to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// No package lookups, no links: the subtraction reference.
    Baseline,
    /// Package lookups plus one link per synthetic target.
    Dependent,
}

/// One requested target and the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Identifier as requested, e.g. `fmt::fmt`.
    pub identifier: String,
    /// Normalized name, e.g. `fmt_fmt`.
    pub normalized: String,
    /// Synthetic CMake target, e.g. `wyvern_fmt_fmt`.
    pub synthetic_name: String,
}

impl ProbeTarget {
    pub fn new(identifier: &str) -> Self {
        ProbeTarget {
            identifier: identifier.to_string(),
            normalized: normalize(identifier),
            synthetic_name: synthetic_target_name(identifier),
        }
    }

    fn source_file(&self) -> String {
        format!("{}.cpp", self.synthetic_name)
    }

    fn header_file(&self) -> String {
        format!("{}.hpp", self.synthetic_name)
    }

    fn probe_function(&self) -> String {
        format!("{}_probe", self.synthetic_name)
    }
}

/// A probe project written to disk.
#[derive(Debug, Clone)]
pub struct ProbeProject {
    pub source_dir: PathBuf,
    pub project_name: String,
    pub mode: SynthesisMode,
    pub targets: Vec<ProbeTarget>,
}

/// Writes probe projects for a request.
pub struct ProjectSynthesizer<'a> {
    request: &'a Request,
    verification_code: Option<&'a VerificationTemplate>,
}

impl<'a> ProjectSynthesizer<'a> {
    /// Create a synthesizer for `request`.
    pub fn new(request: &'a Request) -> Self {
        ProjectSynthesizer {
            request,
            verification_code: None,
        }
    }

    /// Splice `template` into every dependent probe source.
    pub fn verification_code(mut self, template: Option<&'a VerificationTemplate>) -> Self {
        self.verification_code = template;
        self
    }

    /// The probe targets, failing if two identifiers normalize alike.
    pub fn probe_targets(&self) -> Result<Vec<ProbeTarget>> {
        check_collisions(self.request.targets.iter().map(String::as_str))?;
        Ok(self
            .request
            .targets
            .iter()
            .map(|t| ProbeTarget::new(t))
            .collect())
    }

    /// Mode actually synthesized. Without packages nothing can provide the
    /// external targets, so a dependent project degenerates to the baseline.
    pub fn effective_mode(&self, mode: SynthesisMode) -> SynthesisMode {
        if mode == SynthesisMode::Dependent && self.request.packages.is_empty() {
            SynthesisMode::Baseline
        } else {
            mode
        }
    }

    /// Write the project into `dir`.
    pub fn write(&self, dir: &Path, mode: SynthesisMode) -> Result<ProbeProject> {
        let targets = self.probe_targets()?;
        let mode = self.effective_mode(mode);
        let project_name = format!("wyvern_probe_{}", rand::random::<u32>());

        ensure_dir(dir)?;
        write_string(
            &dir.join("CMakeLists.txt"),
            &self.cmakelists(&project_name, &targets, mode),
        )?;

        for target in &targets {
            write_string(&dir.join(target.header_file()), &header(target))?;
            write_string(&dir.join(target.source_file()), &self.source(target, mode))?;
        }

        tracing::debug!(
            "synthesized {:?} project {} with {} target(s) in {}",
            mode,
            project_name,
            targets.len(),
            dir.display()
        );

        Ok(ProbeProject {
            source_dir: dir.to_path_buf(),
            project_name,
            mode,
            targets,
        })
    }

    /// Content of the project's `CMakeLists.txt`.
    pub fn cmakelists(
        &self,
        project_name: &str,
        targets: &[ProbeTarget],
        mode: SynthesisMode,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "cmake_minimum_required(VERSION {})\n",
            CMAKE_MINIMUM_VERSION
        ));
        out.push_str(&format!("project({} LANGUAGES C CXX)\n\n", project_name));

        if mode == SynthesisMode::Dependent {
            for package in &self.request.packages {
                out.push_str(&package.find_package_call());
                out.push('\n');
            }
            out.push('\n');
        }

        for target in targets {
            out.push_str(&format!(
                "add_executable({} {} {})\n",
                target.synthetic_name,
                target.source_file(),
                target.header_file()
            ));
            if mode == SynthesisMode::Dependent {
                out.push_str(&format!(
                    "target_link_libraries({} PRIVATE {})\n",
                    target.synthetic_name, target.identifier
                ));
            }
        }

        out
    }

    /// Content of a target's stub source.
    pub fn source(&self, target: &ProbeTarget, mode: SynthesisMode) -> String {
        let mut out = format!("#include \"{}\"\n\n", target.header_file());

        if mode == SynthesisMode::Dependent {
            if let Some(template) = self.verification_code {
                out.push_str(&template.render(&target.normalized));
                out.push_str("\n\n");
            }
        }

        let probe = target.probe_function();
        out.push_str(&format!("int {}()\n{{\n  return 0;\n}}\n\n", probe));
        out.push_str(&format!("int main()\n{{\n  return {}();\n}}\n", probe));
        out
    }
}

/// Content of a target's stub header.
fn header(target: &ProbeTarget) -> String {
    format!("#pragma once\n\nint {}();\n", target.probe_function())
}
