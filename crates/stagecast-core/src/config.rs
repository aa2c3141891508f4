//! Runtime configuration
//!
//! Process-wide engine state, passed explicitly to the handlers that need it
//! instead of living in an ambient singleton. Shared via `Arc`; mutable pieces
//! are individually locked so concurrent dispatches never contend on more than
//! they touch.

use std::sync::RwLock;

/// Engine-level configuration and mutable process state.
#[derive(Debug)]
pub struct RuntimeConfig {
    /// Attach measured handler execution time to response envelopes.
    pub report_durations: bool,
    /// Template the host uses to name recording files.
    filename_formatting: RwLock<String>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            report_durations: false,
            filename_formatting: RwLock::new(String::from("%CCYY-%MM-%DD %hh-%mm-%ss")),
        }
    }

    pub fn with_durations(mut self) -> Self {
        self.report_durations = true;
        self
    }

    pub fn filename_formatting(&self) -> String {
        self.filename_formatting
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_filename_formatting(&self, formatting: impl Into<String>) {
        *self
            .filename_formatting
            .write()
            .unwrap_or_else(|e| e.into_inner()) = formatting.into();
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
