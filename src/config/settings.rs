//! Loader settings with their defaults

use serde::{Deserialize, Serialize};

/// Environment variable prefix for settings (`MASHCONF_VERBOSE=true`).
pub const ENV_PREFIX: &str = "MASHCONF_";

/// Where host package metadata lives unless told otherwise.
pub const DEFAULT_PACKAGE_JSON_PATH: &str = "/package.json";

/// Plain-data options of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Explicit custom config path or glob (`--config`).
    pub config: Option<String>,

    /// Look for the default config even when a custom config exists.
    pub merge_default_config: bool,

    /// Always merge the default config into a custom one (`--merge-default-config`).
    pub force_merge_default_config: bool,

    /// Never merge the default config into a custom one (`--ignore-default-config`).
    pub ignore_default_config: bool,

    /// Forward diagnostics to the sink instead of DEBUG-level tracing only.
    pub verbose: bool,

    /// Package metadata location relative to the working directory.
    pub package_json_path: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            config: None,
            merge_default_config: true,
            force_merge_default_config: false,
            ignore_default_config: false,
            verbose: false,
            package_json_path: DEFAULT_PACKAGE_JSON_PATH.to_string(),
        }
    }
}

impl LoaderSettings {
    /// Whether the default config is merged into an existing custom config.
    ///
    /// The force flag beats the ignore flag, which beats `merge_default_config`.
    pub fn merges_default(&self) -> bool {
        self.force_merge_default_config
            || (self.merge_default_config && !self.ignore_default_config)
    }
}
