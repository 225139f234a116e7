//! Layering of loader settings: defaults < environment < caller overrides

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::Serialize;

use super::settings::{LoaderSettings, ENV_PREFIX};
use crate::error::LoadError;

/// Caller-supplied settings; `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_default_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_merge_default_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_default_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_json_path: Option<String>,
}

/// Resolve settings from defaults, `MASHCONF_*` variables and `overrides`.
pub fn resolve_settings(overrides: &SettingsOverrides) -> Result<LoaderSettings, LoadError> {
    let settings = base_figment().merge(Serialized::defaults(overrides)).extract()?;
    Ok(settings)
}

/// Resolve settings from defaults and `overrides` only, ignoring the environment.
pub fn resolve_settings_without_env(
    overrides: &SettingsOverrides,
) -> Result<LoaderSettings, LoadError> {
    let settings = Figment::from(Serialized::defaults(LoaderSettings::default()))
        .merge(Serialized::defaults(overrides))
        .extract()?;
    Ok(settings)
}

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(LoaderSettings::default())).merge(Env::prefixed(ENV_PREFIX))
}
