//! Diagnostics emitted while loading.
//!
//! The verbose flag and the sink travel with the loader options instead of
//! living in process-wide state. Quiet loads still reach `tracing` at DEBUG.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Receives load diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Progress, e.g. which source was loaded.
    fn notice(&self, message: &str);

    /// A failure, recoverable or not.
    fn failure(&self, message: &str);
}

/// Default sink: forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notice(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn failure(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Which kind of diagnostic a [`MemorySink`] entry was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Notice,
    Failure,
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(DiagnosticKind, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(DiagnosticKind, String)> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn failures(&self) -> Vec<String> {
        self.collect(DiagnosticKind::Failure)
    }

    pub fn notices(&self) -> Vec<String> {
        self.collect(DiagnosticKind::Notice)
    }

    fn collect(&self, kind: DiagnosticKind) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, message)| message)
            .collect()
    }

    fn push(&self, kind: DiagnosticKind, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((kind, message.to_string()));
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn notice(&self, message: &str) {
        self.push(DiagnosticKind::Notice, message);
    }

    fn failure(&self, message: &str) {
        self.push(DiagnosticKind::Failure, message);
    }
}

/// Verbose-gated handle onto a [`DiagnosticSink`].
#[derive(Clone)]
pub struct Diagnostics {
    verbose: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub fn new(verbose: bool, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { verbose, sink }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn notice(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.verbose {
            self.sink.notice(message);
        } else {
            tracing::debug!("{}", message);
        }
    }

    pub fn failure(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.verbose {
            self.sink.failure(message);
        } else {
            tracing::debug!("{}", message);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(false, Arc::new(TracingSink))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").field("verbose", &self.verbose).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_diagnostics_reach_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let diagnostics = Diagnostics::new(true, sink.clone());
        diagnostics.notice("Load default config from: app.conf.json");
        diagnostics.failure("Can't find package.json file! No config loaded");

        assert_eq!(sink.notices(), vec!["Load default config from: app.conf.json"]);
        assert_eq!(sink.failures(), vec!["Can't find package.json file! No config loaded"]);
    }

    #[test]
    fn quiet_diagnostics_skip_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let diagnostics = Diagnostics::new(false, sink.clone());
        diagnostics.notice("hello");
        diagnostics.failure("oops");
        assert!(sink.entries().is_empty());
    }
}
