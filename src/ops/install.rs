//! Installing a package under test before extraction.

use std::path::Path;

use crate::cmake::CMakeDriver;
use crate::core::{Options, Request, Workspace};
use crate::errors::{ExtractError, Result};
use crate::util::process::CommandRunner;

/// Configure, build and install the CMake project in `source_dir` into
/// `prefix`.
///
/// The request's generator, options and raw arguments apply to the
/// configure step. The build tree lives in a scoped workspace.
pub fn install_package(
    runner: &dyn CommandRunner,
    options: &Options,
    source_dir: &Path,
    prefix: &Path,
    request: &Request,
) -> Result<()> {
    if !source_dir.join("CMakeLists.txt").is_file() {
        return Err(ExtractError::fs(
            "read",
            source_dir.join("CMakeLists.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no CMakeLists.txt"),
        ));
    }

    let driver = CMakeDriver::from_options(runner, options)?;
    let workspace = Workspace::new(options.keep_generated_projects)?;
    let build_dir = workspace.path().join("build");

    tracing::info!(
        "Installing {} into {}",
        source_dir.display(),
        prefix.display()
    );

    driver.configure(request, source_dir, &build_dir)?;
    driver.build(&build_dir)?;
    driver.install(&build_dir, Some(prefix))?;

    workspace.release()
}
