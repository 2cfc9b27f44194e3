//! Typed build settings of one target.
//!
//! Every collection is an [`OrderedSet`]: sorted and free of duplicates, so
//! two models compare and diff independently of the order CMake reported
//! their contents in.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Sorted, deduplicated collection of strings.
pub type OrderedSet = BTreeSet<String>;

/// Compile settings for one language of a target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compilation {
    pub include_directories: OrderedSet,
    pub defines: OrderedSet,
    pub compilation_flags: OrderedSet,
    pub source_files: OrderedSet,
}

impl Compilation {
    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.include_directories.is_empty()
            && self.defines.is_empty()
            && self.compilation_flags.is_empty()
            && self.source_files.is_empty()
    }

    /// Elements present here but absent from `control`, field by field.
    pub fn difference(&self, control: &Compilation) -> Compilation {
        Compilation {
            include_directories: subtract(&self.include_directories, &control.include_directories),
            defines: subtract(&self.defines, &control.defines),
            compilation_flags: subtract(&self.compilation_flags, &control.compilation_flags),
            source_files: subtract(&self.source_files, &control.source_files),
        }
    }
}

/// Build settings of one target, as CMake reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    pub name: String,

    /// Compile settings keyed by CMake language name (`C`, `CXX`, ...).
    pub compilations: BTreeMap<String, Compilation>,

    /// Always empty for now: the codemodel reply embeds search paths inside
    /// link fragments instead of reporting them separately.
    pub library_directories: OrderedSet,
    pub link_libraries: OrderedSet,
    pub link_flags: OrderedSet,
}

impl Target {
    /// Create an empty target.
    pub fn new(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when no language and no link field carries anything.
    pub fn is_empty(&self) -> bool {
        self.compilations.values().all(Compilation::is_empty)
            && self.library_directories.is_empty()
            && self.link_libraries.is_empty()
            && self.link_flags.is_empty()
    }

    /// Elements present here but absent from `control`, named `name`.
    ///
    /// A language missing from `control` is diffed against an empty
    /// compilation.
    pub fn difference(&self, control: &Target, name: impl Into<String>) -> Target {
        let empty = Compilation::default();
        let compilations = self
            .compilations
            .iter()
            .map(|(language, compilation)| {
                let base = control.compilations.get(language).unwrap_or(&empty);
                (language.clone(), compilation.difference(base))
            })
            .collect();

        Target {
            name: name.into(),
            compilations,
            library_directories: subtract(&self.library_directories, &control.library_directories),
            link_libraries: subtract(&self.link_libraries, &control.link_libraries),
            link_flags: subtract(&self.link_flags, &control.link_flags),
        }
    }
}

fn subtract(dependent: &OrderedSet, control: &OrderedSet) -> OrderedSet {
    dependent.difference(control).cloned().collect()
}
