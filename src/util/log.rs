//! Diagnostic dumps of intermediate models.

use serde::Serialize;

/// Run-scoped switch for model dumps.
///
/// Built once per extraction and handed to each cycle by reference. Dumps go
/// through `tracing` at `info` level and never fail: a model that cannot be
/// serialized is reported and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionLog {
    enabled: bool,
}

impl ExtractionLog {
    pub fn new(enabled: bool) -> Self {
        ExtractionLog { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dump `value` as pretty JSON under `label`.
    pub fn dump<T: Serialize + ?Sized>(&self, label: &str, value: &T) {
        if !self.enabled {
            return;
        }
        match serde_json::to_string_pretty(value) {
            Ok(json) => tracing::info!("{}:\n{}", label, json),
            Err(e) => tracing::warn!("could not dump {}: {}", label, e),
        }
    }
}
