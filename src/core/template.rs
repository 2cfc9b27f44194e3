//! Verification code spliced into each dependent probe source.
//!
//! The template carries one placeholder, `{target}`, replaced by the
//! target's normalized name. Nothing else is interpreted, so C and C++ braces
//! pass through untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::util::fs::read_to_string;

/// Placeholder substituted by [`VerificationTemplate::render`].
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Code template proving an external target's headers and symbols are usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationTemplate {
    source: String,
}

impl VerificationTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        VerificationTemplate {
            source: source.into(),
        }
    }

    /// Load a template from a file.
    pub fn load(path: &Path) -> Result<Self> {
        read_to_string(path).map(Self::new)
    }

    /// Render the template for a target with the given normalized name.
    pub fn render(&self, target: &str) -> String {
        self.source.replace(TARGET_PLACEHOLDER, target)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
