//! Dependency extraction.
//!
//! Two congruent probe projects are synthesized, configured and built: the
//! control project links nothing, the dependent project links every
//! requested target. Their file API models are extracted and the control
//! model is subtracted from the dependent one.

use std::path::PathBuf;

use crate::cmake::{
    extract_model, read_reply, write_query, CMakeDriver, ProjectSynthesizer, SynthesisMode,
};
use crate::core::naming::check_collisions;
use crate::core::{DependenciesInfo, Options, Request, Workspace};
use crate::errors::Result;
use crate::ops::diff::diff;
use crate::util::log::ExtractionLog;
use crate::util::process::{CommandRunner, SystemRunner};

/// Extract the consumption settings of `request`'s targets using the
/// system `cmake`.
///
/// The result holds one entry per configuration CMake reported and, within
/// it, one target per requested identifier, keyed by its normalized name.
pub fn extract_dependencies(request: &Request, options: &Options) -> Result<DependenciesInfo> {
    DependencyExtractor::new(&SystemRunner).extract(request, options)
}

/// Runs extraction cycles through a [`CommandRunner`].
pub struct DependencyExtractor<'a> {
    runner: &'a dyn CommandRunner,
    workspace_root: Option<PathBuf>,
}

/// Everything a cycle needs besides its mode.
struct Cycle<'a> {
    driver: &'a CMakeDriver<'a>,
    synthesizer: &'a ProjectSynthesizer<'a>,
    request: &'a Request,
    keep: bool,
    log: ExtractionLog,
}

impl<'a> DependencyExtractor<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        DependencyExtractor {
            runner,
            workspace_root: None,
        }
    }

    /// Create workspaces under `root` instead of the system temporary
    /// directory.
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Run both cycles and diff their models.
    pub fn extract(&self, request: &Request, options: &Options) -> Result<DependenciesInfo> {
        check_collisions(request.targets.iter().map(String::as_str))?;

        let driver = CMakeDriver::from_options(self.runner, options)?;
        let synthesizer =
            ProjectSynthesizer::new(request).verification_code(options.verification_code.as_ref());
        let cycle = Cycle {
            driver: &driver,
            synthesizer: &synthesizer,
            request,
            keep: options.keep_generated_projects,
            log: ExtractionLog::new(options.enable_logging),
        };

        tracing::info!(
            "extracting {} target(s) from {} package(s)",
            request.targets.len(),
            request.packages.len()
        );

        let (control, dependent) = if options.parallel {
            let (control, dependent) = rayon::join(
                || self.run_cycle(&cycle, SynthesisMode::Baseline),
                || self.run_cycle(&cycle, SynthesisMode::Dependent),
            );
            // Both ran to completion; the control failure wins.
            (control?, dependent?)
        } else {
            let control = self.run_cycle(&cycle, SynthesisMode::Baseline)?;
            let dependent = self.run_cycle(&cycle, SynthesisMode::Dependent)?;
            (control, dependent)
        };

        let info = diff(&dependent, &control)?;
        cycle.log.dump("dependency delta", &info);
        Ok(info)
    }

    fn workspace(&self, keep: bool) -> Result<Workspace> {
        match self.workspace_root {
            Some(ref root) => Workspace::new_in(root, keep),
            None => Workspace::new(keep),
        }
    }

    /// Synthesize, configure and build one project, then extract its model.
    ///
    /// The workspace is removed on every exit path unless retention is on.
    fn run_cycle(&self, cycle: &Cycle<'_>, mode: SynthesisMode) -> Result<DependenciesInfo> {
        let label = match mode {
            SynthesisMode::Baseline => "control",
            SynthesisMode::Dependent => "dependent",
        };

        let workspace = self.workspace(cycle.keep)?;
        let project = cycle
            .synthesizer
            .write(&workspace.path().join("source"), mode)?;
        let build_dir = workspace.path().join("build");

        write_query(&build_dir)?;
        cycle.driver.configure(cycle.request, &project.source_dir, &build_dir)?;
        cycle.driver.build(&build_dir)?;

        let raw = read_reply(&build_dir)?;
        cycle.log.dump(&format!("{} raw model", label), &raw);

        let model = extract_model(&raw)?;
        cycle.log.dump(&format!("{} model", label), &model);

        tracing::debug!(
            "{} cycle done: {} configuration(s)",
            label,
            model.configurations.len()
        );

        workspace.release()?;
        Ok(model)
    }
}
