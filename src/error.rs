//! Error taxonomy for configuration loading.
//!
//! Fatal errors stop the load and are returned to the caller. The only
//! recoverable condition, a missing default configuration, is logged and the
//! load continues without it unless a merge was forced against a custom config.

use std::path::PathBuf;
use thiserror::Error;

/// Whether a condition stops the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "Can't find {pattern}! Please make sure that your path or glob is correct (cwd: {})",
        .cwd.display()
    )]
    SourceNotFound { pattern: String, cwd: PathBuf, reason: Option<String> },

    #[error("Failed to load config source {}: {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// `forced` is set when the default had to be merged into a custom config.
    #[error("No default config loaded (expected {}): {reason}", .expected.display())]
    DefaultConfigMissing { expected: PathBuf, reason: String, forced: bool },

    #[error("FAILED loading init plugin \"{name}\" for \"{path}\"")]
    InitializerResolutionFailed { path: String, name: String },

    #[error("Initializer for \"{path}\" failed: {source}")]
    InitializerFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid loader settings: {0}")]
    Settings(Box<figment::Error>),
}

impl LoadError {
    pub fn severity(&self) -> Severity {
        match self {
            LoadError::DefaultConfigMissing { forced: false, .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// A missing default that the load cannot do without.
    pub fn into_forced(self) -> Self {
        match self {
            LoadError::DefaultConfigMissing { expected, reason, .. } => {
                LoadError::DefaultConfigMissing { expected, reason, forced: true }
            }
            other => other,
        }
    }

    /// Process exit status for a load that ended with this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<figment::Error> for LoadError {
    fn from(err: figment::Error) -> Self {
        LoadError::Settings(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_missing_is_the_only_recoverable_error() {
        let missing = LoadError::DefaultConfigMissing {
            expected: PathBuf::from("/srv/app.conf"),
            reason: "not found".to_string(),
            forced: false,
        };
        assert_eq!(missing.severity(), Severity::Recoverable);

        let not_found = LoadError::SourceNotFound {
            pattern: "conf/*.json".to_string(),
            cwd: PathBuf::from("/srv"),
            reason: None,
        };
        assert!(not_found.is_fatal());
        assert_eq!(not_found.exit_code(), 1);
    }

    #[test]
    fn forced_default_missing_is_fatal() {
        let missing = LoadError::DefaultConfigMissing {
            expected: PathBuf::from("/srv/app.conf"),
            reason: "not found".to_string(),
            forced: false,
        };
        let forced = missing.into_forced();
        assert!(matches!(forced, LoadError::DefaultConfigMissing { forced: true, .. }));
        assert_eq!(forced.severity(), Severity::Fatal);
        assert!(forced.is_fatal());

        let other = LoadError::InitializerResolutionFailed {
            path: "db".to_string(),
            name: "x".to_string(),
        };
        assert!(matches!(other.into_forced(), LoadError::InitializerResolutionFailed { .. }));
    }

    #[test]
    fn messages_name_the_offending_path() {
        let err = LoadError::InitializerResolutionFailed {
            path: "db.pool".to_string(),
            name: "pool-plugin".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("pool-plugin"));
        assert!(message.contains("db.pool"));
    }
}
