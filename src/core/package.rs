//! A CMake package to look up with `find_package()`.

use serde::{Deserialize, Serialize};

/// A package the dependent project looks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name as given to `find_package()`, e.g. `fmt` or `Boost`.
    pub name: String,

    /// Version requirement, if any.
    #[serde(default)]
    pub version: Option<String>,

    /// Extra `find_package()` arguments such as `COMPONENTS filesystem`.
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Package {
    /// Create a package with no version or constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            version: None,
            constraints: Vec::new(),
        }
    }

    /// Require a version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Append a `find_package()` argument.
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// The `find_package()` call for this package.
    pub fn find_package_call(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(ref version) = self.version {
            parts.push(version);
        }
        parts.extend(self.constraints.iter().map(String::as_str));
        parts.push("REQUIRED");

        format!("find_package({})", parts.join(" "))
    }
}
