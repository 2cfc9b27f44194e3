//! Conversion of raw reply documents into typed targets.

use std::str::FromStr;

use serde::Deserialize;

use crate::cmake::file_api::{RawDocument, RawModel};
use crate::cmake::fragment::split_fragment;
use crate::core::{DependenciesInfo, ExtractedConfiguration, Target};
use crate::errors::{ExtractError, Result};

/// Purpose of a link command fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    Flags,
    Libraries,
}

impl FromStr for LinkRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "flags" => Ok(LinkRole::Flags),
            "libraries" => Ok(LinkRole::Libraries),
            other => Err(format!("unsupported link fragment role `{}`", other)),
        }
    }
}

// Optional collections tolerate both absence and `null`; required scalars
// fail with serde's "missing field" error.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTarget {
    sources: Option<Vec<RawSource>>,
    compile_groups: Option<Vec<RawCompileGroup>>,
    link: Option<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompileGroup {
    language: String,
    compile_command_fragments: Option<Vec<RawFragment>>,
    defines: Option<Vec<RawDefine>>,
    includes: Option<Vec<RawInclude>>,
    source_indexes: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
struct RawFragment {
    fragment: String,
}

#[derive(Debug, Deserialize)]
struct RawDefine {
    define: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInclude {
    path: String,
    // Parsed to validate the document; the model does not distinguish
    // system include directories yet.
    #[serde(default)]
    #[allow(dead_code)]
    is_system: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    command_fragments: Option<Vec<RawLinkFragment>>,
}

#[derive(Debug, Deserialize)]
struct RawLinkFragment {
    role: String,
    fragment: String,
}

/// Convert one target document into a [`Target`] named `name`.
pub fn extract_target(name: &str, document: &RawDocument) -> Result<Target> {
    let raw = RawTarget::deserialize(&document.content)
        .map_err(|e| ExtractError::malformed(&document.path, e))?;

    let mut target = Target::new(name);
    let sources = raw.sources.unwrap_or_default();

    for group in raw.compile_groups.unwrap_or_default() {
        let compilation = target.compilations.entry(group.language).or_default();

        for fragment in group.compile_command_fragments.unwrap_or_default() {
            compilation
                .compilation_flags
                .extend(split_fragment(&fragment.fragment));
        }
        compilation
            .defines
            .extend(group.defines.unwrap_or_default().into_iter().map(|d| d.define));
        compilation
            .include_directories
            .extend(group.includes.unwrap_or_default().into_iter().map(|i| i.path));

        for index in group.source_indexes.unwrap_or_default() {
            let source = sources.get(index).ok_or_else(|| {
                ExtractError::schema(
                    &document.path,
                    format!("source index {} out of range ({} sources)", index, sources.len()),
                )
            })?;
            compilation.source_files.insert(source.path.clone());
        }
    }

    let fragments = raw
        .link
        .and_then(|link| link.command_fragments)
        .unwrap_or_default();
    for fragment in fragments {
        let role = fragment
            .role
            .parse::<LinkRole>()
            .map_err(|detail| ExtractError::schema(&document.path, detail))?;

        match role {
            LinkRole::Flags => target.link_flags.extend(split_fragment(&fragment.fragment)),
            LinkRole::Libraries => {
                let library = fragment.fragment.trim();
                if !library.is_empty() {
                    target.link_libraries.insert(library.to_string());
                }
            }
        }
    }

    Ok(target)
}

/// Convert a whole raw model.
pub fn extract_model(raw: &RawModel) -> Result<DependenciesInfo> {
    let mut info = DependenciesInfo::default();

    for (configuration_name, targets) in &raw.configurations {
        let mut configuration = ExtractedConfiguration::new(configuration_name.clone());
        for (target_name, document) in targets {
            let target = extract_target(target_name, document)?;
            configuration.targets.insert(target_name.clone(), target);
        }
        info.configurations
            .insert(configuration_name.clone(), configuration);
    }

    Ok(info)
}
