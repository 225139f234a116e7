//! Loader settings and how they are layered
//!
//! Handles defaults, `MASHCONF_*` environment variables and caller overrides
//! with proper precedence (overrides > env > defaults).

pub mod merge;
pub mod settings;

pub use merge::{resolve_settings, resolve_settings_without_env, SettingsOverrides};
pub use settings::{LoaderSettings, DEFAULT_PACKAGE_JSON_PATH, ENV_PREFIX};
