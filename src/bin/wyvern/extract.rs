//! The extraction command

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use wyvern::core::{CMakeOption, Options, Package, Request, VerificationTemplate};
use wyvern::util::config::{global_config_path, load_config, project_config_path, Config};
use wyvern::util::process::SystemRunner;
use wyvern::{extract_dependencies, install_package};

const PREFIX_PATH: &str = "CMAKE_PREFIX_PATH";

pub fn execute(args: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));

    let options = options(&args, &config)?;
    let mut request = request(&args, &config)?;

    if let Some(ref project) = args.install_from {
        let install_request = Request {
            generator: request.generator.clone(),
            options: request.options.clone(),
            args: request.args.clone(),
            ..Default::default()
        };
        install_package(
            &SystemRunner,
            &options,
            project,
            &args.install_prefix,
            &install_request,
        )?;
    }

    let prefix = std::fs::canonicalize(&args.install_prefix).with_context(|| {
        format!(
            "install prefix `{}` does not exist",
            args.install_prefix.display()
        )
    })?;
    add_prefix_path(&mut request, &prefix);

    let info = extract_dependencies(&request, &options)?;

    match args.format {
        OutputFormat::Human => print!("{}", info),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }

    Ok(())
}

/// Run options: flags first, then the configuration files.
fn options(args: &Cli, config: &Config) -> Result<Options> {
    let mut options = Options::default()
        .keep_generated_projects(!args.clean && config.extract.keep_generated.unwrap_or(true))
        .enable_logging(!args.no_dump)
        .parallel(args.parallel || config.extract.parallel.unwrap_or(false));

    if let Some(program) = args.cmake.clone().or_else(|| config.cmake.program.clone()) {
        options = options.cmake_program(program);
    }
    if let Some(build_config) = args
        .build_config
        .clone()
        .or_else(|| config.cmake.build_config.clone())
    {
        options = options.build_config(build_config);
    }
    if let Some(timeout) = args.timeout.map(Duration::from_secs).or_else(|| config.timeout()) {
        options = options.process_timeout(timeout);
    }

    let template = args
        .verify_code
        .as_deref()
        .or(config.extract.verification_code.as_deref());
    if let Some(path) = template {
        let template = VerificationTemplate::load(path)
            .with_context(|| format!("failed to load verification code `{}`", path.display()))?;
        options = options.verification_code(template);
    }

    Ok(options)
}

/// The request file, if any, extended by the command line.
fn request(args: &Cli, config: &Config) -> Result<Request> {
    let mut request = match args.request {
        Some(ref path) => Request::load(path)?,
        None => Request::default(),
    };

    let mut package = Package::new(&args.package);
    if let Some(ref version) = args.package_version {
        package = package.with_version(version);
    }
    for arg in &args.find_arg {
        package = package.with_constraint(arg);
    }
    request.packages.push(package);

    if args.targets.is_empty() && request.targets.is_empty() {
        request
            .targets
            .push(format!("{}::{}", args.package, args.package));
    }
    request.targets.extend(args.targets.iter().cloned());

    request.options.extend(args.define.iter().cloned());
    request.args.extend(args.cmake_arg.iter().cloned());

    if args.generator.is_some() {
        request.generator = args.generator.clone();
    } else if request.generator.is_none() {
        request.generator = config.cmake.generator.clone();
    }

    Ok(request)
}

/// Put `prefix` first on `CMAKE_PREFIX_PATH`, keeping any value already set.
fn add_prefix_path(request: &mut Request, prefix: &Path) {
    let prefix = prefix.display().to_string();
    match request.options.iter_mut().find(|o| o.key == PREFIX_PATH) {
        Some(option) => option.value = format!("{};{}", prefix, option.value),
        None => request.options.push(CMakeOption::new(PREFIX_PATH, prefix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wyvern").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_target_from_package() {
        let request = request(&parse(&["/opt/zlib", "ZLIB"]), &Config::default()).unwrap();

        assert_eq!(request.packages, vec![Package::new("ZLIB")]);
        assert_eq!(request.targets, vec!["ZLIB::ZLIB"]);
    }

    #[test]
    fn test_package_arguments() {
        let args = parse(&[
            "/opt/boost",
            "Boost",
            "Boost::filesystem",
            "--package-version",
            "1.73.0",
            "--find-arg",
            "COMPONENTS filesystem",
        ]);
        let request = request(&args, &Config::default()).unwrap();

        assert_eq!(
            request.packages[0].find_package_call(),
            "find_package(Boost 1.73.0 COMPONENTS filesystem REQUIRED)"
        );
        assert_eq!(request.targets, vec!["Boost::filesystem"]);
    }

    #[test]
    fn test_generator_precedence() {
        let mut config = Config::default();
        config.cmake.generator = Some("Unix Makefiles".to_string());

        let from_config = request(&parse(&["/p", "fmt"]), &config).unwrap();
        assert_eq!(from_config.generator.as_deref(), Some("Unix Makefiles"));

        let from_flag = request(&parse(&["/p", "fmt", "-G", "Ninja"]), &config).unwrap();
        assert_eq!(from_flag.generator.as_deref(), Some("Ninja"));
    }

    #[test]
    fn test_prefix_path_is_prepended() {
        let mut request = Request::default().option(PREFIX_PATH, "/opt/other");
        add_prefix_path(&mut request, Path::new("/opt/fmt"));
        assert_eq!(request.options, vec![CMakeOption::new(PREFIX_PATH, "/opt/fmt;/opt/other")]);

        let mut request = Request::default();
        add_prefix_path(&mut request, Path::new("/opt/fmt"));
        assert_eq!(request.options, vec![CMakeOption::new(PREFIX_PATH, "/opt/fmt")]);
    }

    #[test]
    fn test_options_from_flags_and_config() {
        let mut config = Config::default();
        config.cmake.timeout_secs = Some(30);
        config.cmake.build_config = Some("Debug".to_string());

        let args = parse(&["/p", "fmt", "--build-config", "Release"]);
        let defaults = options(&args, &config).unwrap();
        assert!(defaults.keep_generated_projects);
        assert!(defaults.enable_logging);
        assert!(!defaults.parallel);
        assert_eq!(defaults.build_config.as_deref(), Some("Release"));
        assert_eq!(defaults.process_timeout, Some(Duration::from_secs(30)));

        let quiet = options(&parse(&["/p", "fmt", "--clean", "--no-dump"]), &config).unwrap();
        assert!(!quiet.keep_generated_projects);
        assert!(!quiet.enable_logging);
    }

    #[test]
    fn test_parallel_from_config_or_flag() {
        let mut config = Config::default();
        config.extract.parallel = Some(false);
        assert!(!options(&parse(&["/p", "fmt"]), &config).unwrap().parallel);
        assert!(options(&parse(&["/p", "fmt", "--parallel"]), &config).unwrap().parallel);

        config.extract.parallel = Some(true);
        assert!(options(&parse(&["/p", "fmt"]), &config).unwrap().parallel);
    }
}
