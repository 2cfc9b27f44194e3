//! Test fixtures for file API replies.
//!
//! [`write_reply`] lays out a reply tree the way CMake does after a configure
//! with wyvern's query in place: one index, one codemodel and one document
//! per target and configuration.

use std::path::Path;

use serde_json::{json, Value};

use crate::cmake::file_api::reply_dir;

/// Settings reported for one target.
#[derive(Debug, Clone, Default)]
pub struct TargetSettings {
    /// Compile command fragments, unsplit.
    pub fragments: Vec<String>,
    pub defines: Vec<String>,
    pub includes: Vec<String>,
    /// Link command fragments as `(role, fragment)`.
    pub link: Vec<(String, String)>,
}

impl TargetSettings {
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.fragments.push(fragment.to_string());
        self
    }

    pub fn define(mut self, define: &str) -> Self {
        self.defines.push(define.to_string());
        self
    }

    pub fn include(mut self, path: &str) -> Self {
        self.includes.push(path.to_string());
        self
    }

    pub fn link(mut self, role: &str, fragment: &str) -> Self {
        self.link.push((role.to_string(), fragment.to_string()));
        self
    }

    /// These settings followed by `extra`'s.
    pub fn merged(&self, extra: &TargetSettings) -> TargetSettings {
        let mut out = self.clone();
        out.fragments.extend(extra.fragments.iter().cloned());
        out.defines.extend(extra.defines.iter().cloned());
        out.includes.extend(extra.includes.iter().cloned());
        out.link.extend(extra.link.iter().cloned());
        out
    }

    fn document(&self, name: &str) -> Value {
        json!({
            "name": name,
            "type": "EXECUTABLE",
            "sources": [
                { "path": format!("{}.cpp", name), "compileGroupIndex": 0 },
                { "path": format!("{}.hpp", name) }
            ],
            "compileGroups": [ {
                "language": "CXX",
                "compileCommandFragments": self
                    .fragments
                    .iter()
                    .map(|f| json!({ "fragment": f }))
                    .collect::<Vec<_>>(),
                "defines": self
                    .defines
                    .iter()
                    .map(|d| json!({ "define": d }))
                    .collect::<Vec<_>>(),
                "includes": self
                    .includes
                    .iter()
                    .map(|p| json!({ "path": p }))
                    .collect::<Vec<_>>(),
                "sourceIndexes": [0]
            } ],
            "link": {
                "language": "CXX",
                "commandFragments": self
                    .link
                    .iter()
                    .map(|(role, fragment)| json!({ "fragment": fragment, "role": role }))
                    .collect::<Vec<_>>()
            }
        })
    }
}

/// A reply to write: the same targets in every configuration.
#[derive(Debug, Clone, Default)]
pub struct ReplyFixture {
    pub configurations: Vec<String>,
    pub targets: Vec<(String, TargetSettings)>,
}

impl ReplyFixture {
    pub fn new<I>(configurations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ReplyFixture {
            configurations: configurations.into_iter().map(Into::into).collect(),
            targets: Vec::new(),
        }
    }

    pub fn target(mut self, name: &str, settings: TargetSettings) -> Self {
        self.targets.push((name.to_string(), settings));
        self
    }
}

/// Write `fixture` as a file API reply under `build_dir`.
pub fn write_reply(build_dir: &Path, fixture: &ReplyFixture) {
    let dir = reply_dir(build_dir);
    std::fs::create_dir_all(&dir).unwrap();

    let codemodel_file = "codemodel-v2-0001.json";
    let codemodel_object = json!({
        "kind": "codemodel",
        "version": { "major": 2, "minor": 6 },
        "jsonFile": codemodel_file,
    });
    let index = json!({
        "cmake": { "version": { "major": 3, "minor": 28, "patch": 1 } },
        "objects": [codemodel_object],
        "reply": {
            "client-wyvern": {
                "query.json": {
                    "requests": [ { "kind": "codemodel", "version": { "major": 2 } } ],
                    "responses": [codemodel_object]
                }
            }
        }
    });
    write_json(&dir.join("index-2026-01-01T00-00-00-0000.json"), &index);

    let mut configurations = Vec::new();
    for configuration in &fixture.configurations {
        let mut targets = Vec::new();
        for (name, settings) in &fixture.targets {
            let file = format!("target-{}-{}.json", name, configuration);
            write_json(&dir.join(&file), &settings.document(name));
            targets.push(json!({
                "name": name,
                "id": format!("{}::@6890427a1f51a3e7e1df", name),
                "jsonFile": file
            }));
        }
        configurations.push(json!({ "name": configuration, "targets": targets }));
    }

    let codemodel = json!({
        "kind": "codemodel",
        "version": { "major": 2, "minor": 6 },
        "paths": {
            "source": build_dir.display().to_string(),
            "build": build_dir.display().to_string()
        },
        "configurations": configurations
    });
    write_json(&dir.join(codemodel_file), &codemodel);
}

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
