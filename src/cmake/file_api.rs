//! CMake file API client.
//!
//! Before configuring, a stateful query asking for the `codemodel` v2 object
//! is written under `<build>/.cmake/api/v1/query/client-wyvern/`. CMake then
//! answers during configuration with a reply index in
//! `<build>/.cmake/api/v1/reply/`, from which the codemodel and one document
//! per target are loaded into a [`RawModel`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ExtractError, Result};
use crate::util::fs::{glob_files, read, write_string};

/// Name under which wyvern's stateful query is registered.
pub const CLIENT_NAME: &str = "client-wyvern";

/// Query asking for the codemodel, major version 2.
pub const QUERY_DOCUMENT: &str = r#"{
  "requests": [
    { "kind": "codemodel", "version": { "major": 2 } }
  ]
}
"#;

/// Generator convenience targets that never carry settings of interest.
const META_TARGETS: &[&str] = &["ALL_BUILD", "ZERO_CHECK"];

/// `<build>/.cmake/api/v1`
pub fn api_dir(build_dir: &Path) -> PathBuf {
    build_dir.join(".cmake").join("api").join("v1")
}

/// Location of wyvern's query document.
pub fn query_path(build_dir: &Path) -> PathBuf {
    api_dir(build_dir)
        .join("query")
        .join(CLIENT_NAME)
        .join("query.json")
}

/// Directory CMake writes replies into.
pub fn reply_dir(build_dir: &Path) -> PathBuf {
    api_dir(build_dir).join("reply")
}

/// A reply document as loaded from disk.
#[derive(Debug, Clone, Serialize)]
pub struct RawDocument {
    pub path: PathBuf,
    pub content: Value,
}

/// The reply index plus every target document, keyed by configuration name
/// and then target name.
#[derive(Debug, Clone, Serialize)]
pub struct RawModel {
    pub index: RawDocument,
    pub configurations: BTreeMap<String, BTreeMap<String, RawDocument>>,
}

#[derive(Debug, Deserialize)]
struct ReplyIndex {
    reply: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ClientReply {
    #[serde(rename = "query.json")]
    query: QueryReply,
}

#[derive(Debug, Deserialize)]
struct QueryReply {
    responses: Vec<ResponseRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseRef {
    json_file: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Codemodel {
    configurations: Vec<ConfigurationRef>,
}

#[derive(Debug, Deserialize)]
struct ConfigurationRef {
    name: String,
    targets: Vec<TargetRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetRef {
    name: String,
    json_file: String,
}

/// Write the codemodel query into `build_dir`.
pub fn write_query(build_dir: &Path) -> Result<PathBuf> {
    let path = query_path(build_dir);
    write_string(&path, QUERY_DOCUMENT)?;
    Ok(path)
}

/// Load a JSON document without interpreting it.
fn load_document(path: &Path) -> Result<RawDocument> {
    let bytes = read(path)?;
    let content = serde_json::from_slice(&bytes).map_err(|e| ExtractError::malformed(path, e))?;
    Ok(RawDocument {
        path: path.to_path_buf(),
        content,
    })
}

/// Interpret a loaded document as `T`, naming any missing field.
fn typed<T: DeserializeOwned>(document: &RawDocument) -> Result<T> {
    T::deserialize(&document.content).map_err(|e| ExtractError::malformed(&document.path, e))
}

/// Locate the single reply index in `reply_dir`.
pub fn find_index(reply_dir: &Path) -> Result<PathBuf> {
    let mut found = glob_files(reply_dir, "index-*.json")?;
    if found.len() != 1 {
        return Err(ExtractError::MissingReplyDocument {
            directory: reply_dir.to_path_buf(),
            found: found.len(),
        });
    }
    Ok(found.remove(0))
}

/// Path of the codemodel document named by the index.
fn codemodel_path(index: &RawDocument, reply_dir: &Path) -> Result<PathBuf> {
    let parsed: ReplyIndex = typed(index)?;

    let client = parsed.reply.get(CLIENT_NAME).ok_or_else(|| {
        ExtractError::schema(&index.path, format!("no reply for `{}`", CLIENT_NAME))
    })?;
    let client =
        ClientReply::deserialize(client).map_err(|e| ExtractError::malformed(&index.path, e))?;

    let response = client
        .query
        .responses
        .first()
        .ok_or_else(|| ExtractError::schema(&index.path, "query has no responses"))?;

    match (&response.json_file, &response.error) {
        (Some(file), _) => Ok(reply_dir.join(file)),
        (None, Some(error)) => Err(ExtractError::schema(
            &index.path,
            format!("codemodel request failed: {}", error),
        )),
        (None, None) => Err(ExtractError::schema(
            &index.path,
            "codemodel response has neither `jsonFile` nor `error`",
        )),
    }
}

/// Read the reply CMake wrote into `build_dir` during configuration.
pub fn read_reply(build_dir: &Path) -> Result<RawModel> {
    let reply_dir = reply_dir(build_dir);
    let index = load_document(&find_index(&reply_dir)?)?;

    let codemodel_doc = load_document(&codemodel_path(&index, &reply_dir)?)?;
    let codemodel: Codemodel = typed(&codemodel_doc)?;

    let mut configurations = BTreeMap::new();
    for configuration in codemodel.configurations {
        let mut targets = BTreeMap::new();
        for target in configuration.targets {
            if META_TARGETS.contains(&target.name.as_str()) {
                continue;
            }
            let document = load_document(&reply_dir.join(&target.json_file))?;
            targets.insert(target.name, document);
        }
        tracing::debug!(
            "configuration `{}`: {} target(s)",
            configuration.name,
            targets.len()
        );
        configurations.insert(configuration.name, targets);
    }

    Ok(RawModel {
        index,
        configurations,
    })
}
