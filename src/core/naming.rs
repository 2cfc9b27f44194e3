//! Names of synthesized targets.
//!
//! A requested target identifier such as `Boost::filesystem` becomes the
//! normalized name `boost_filesystem`, which is used as the suffix of the
//! generated files and of the synthetic CMake target `wyvern_boost_filesystem`.

use std::collections::BTreeMap;

use crate::errors::{ExtractError, Result};

/// Prefix separating synthetic targets from the targets a user asked for.
pub const SYNTHETIC_PREFIX: &str = "wyvern_";

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '.' | ':' | '(' | ')')
}

/// Lowercase `identifier` and collapse every run of separator characters
/// (whitespace, `-`, `.`, `:`, `(`, `)`) into a single `_`.
pub fn normalize(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut in_run = false;

    for c in identifier.chars().flat_map(char::to_lowercase) {
        if is_separator(c) {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Name of the synthetic CMake target standing in for `identifier`.
pub fn synthetic_target_name(identifier: &str) -> String {
    format!("{}{}", SYNTHETIC_PREFIX, normalize(identifier))
}

/// Drop the synthetic prefix from a target name, if present.
pub fn strip_synthetic_prefix(name: &str) -> &str {
    name.strip_prefix(SYNTHETIC_PREFIX).unwrap_or(name)
}

/// Check that no two requested identifiers share a normalized name.
pub fn check_collisions<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    for identifier in identifiers {
        let normalized = normalize(identifier);
        if let Some(first) = seen.get(&normalized) {
            return Err(ExtractError::NameCollision {
                first: first.to_string(),
                second: identifier.to_string(),
                normalized,
            });
        }
        seen.insert(normalized, identifier);
    }

    Ok(())
}
