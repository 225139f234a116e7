//! Config loading: discover custom and default sources, reconcile, initialize
//!
//! One pass per call, in a fixed order: custom sources are discovered and read
//! completely before the default source is looked up, and both are settled
//! before the merge. [`ConfigLoader::load_sync`] blocks; [`ConfigLoader::load`]
//! is the async form with the same ordering.

use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{resolve_settings, LoaderSettings, SettingsOverrides};
use crate::domain::LoadedConfig;
use crate::error::LoadError;
use crate::init::{initialize_all, Initializer, InitializerRegistry, InitializerSpec};
use crate::logging::{DiagnosticSink, Diagnostics, TracingSink};
use crate::merge::{complement, MergeFunction};
use crate::utils::normalize_path;

pub mod discover;
pub mod package;
pub mod source;

/// Everything a load needs, settings plus the host's hooks.
#[derive(Clone)]
pub struct LoaderOptions {
    /// Base for package metadata, default config and relative `--config` patterns.
    pub working_dir: PathBuf,
    pub settings: LoaderSettings,
    pub init: InitializerSpec,
    pub registry: InitializerRegistry,
    pub merger: Option<MergeFunction>,
    pub sink: Arc<dyn DiagnosticSink>,
    /// Also initialize custom configs loaded without a default config.
    pub init_custom_config: bool,
}

impl LoaderOptions {
    pub fn new(settings: LoaderSettings) -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            settings,
            init: InitializerSpec::new(),
            registry: InitializerRegistry::new(),
            merger: None,
            sink: Arc::new(TracingSink),
            init_custom_config: false,
        }
    }

    /// Options with settings resolved from defaults, environment and `overrides`.
    pub fn from_overrides(overrides: &SettingsOverrides) -> Result<Self, LoadError> {
        Ok(Self::new(resolve_settings(overrides)?))
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn initializer(mut self, path: impl Into<String>, initializer: Initializer) -> Self {
        self.init.insert(path, initializer);
        self
    }

    pub fn initializers(mut self, spec: InitializerSpec) -> Self {
        self.init = spec;
        self
    }

    pub fn registry(mut self, registry: InitializerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn merger(mut self, merger: MergeFunction) -> Self {
        self.merger = Some(merger);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn init_custom_config(mut self, enabled: bool) -> Self {
        self.init_custom_config = enabled;
        self
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new(LoaderSettings::default())
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("working_dir", &self.working_dir)
            .field("settings", &self.settings)
            .field("init", &self.init)
            .field("registry", &self.registry)
            .field("merger", &self.merger.is_some())
            .field("init_custom_config", &self.init_custom_config)
            .finish_non_exhaustive()
    }
}

/// Runs loads for one set of [`LoaderOptions`]. Nothing is cached between calls.
#[derive(Debug)]
pub struct ConfigLoader {
    options: LoaderOptions,
    diagnostics: Diagnostics,
}

impl ConfigLoader {
    pub fn new(options: LoaderOptions) -> Self {
        let diagnostics = Diagnostics::new(options.settings.verbose, options.sink.clone());
        Self { options, diagnostics }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Blocking load.
    pub fn load_sync(&self) -> Result<LoadedConfig, LoadError> {
        let custom = match self.options.settings.config.as_deref() {
            Some(pattern) => Some(self.load_custom_sync(pattern)?),
            None => None,
        };

        let has_custom = custom.is_some();
        let default = if self.wants_default(has_custom) {
            self.settle_default(has_custom, self.read_default_sync())?
        } else {
            None
        };

        self.reconcile(custom, default)
    }

    /// Non-blocking load; same stages and ordering as [`ConfigLoader::load_sync`].
    pub async fn load(&self) -> Result<LoadedConfig, LoadError> {
        let custom = match self.options.settings.config.as_deref() {
            Some(pattern) => Some(self.load_custom(pattern).await?),
            None => None,
        };

        let has_custom = custom.is_some();
        let default = if self.wants_default(has_custom) {
            let outcome = self.read_default().await;
            self.settle_default(has_custom, outcome)?
        } else {
            None
        };

        self.reconcile(custom, default)
    }

    fn wants_default(&self, has_custom: bool) -> bool {
        !has_custom || self.options.settings.merges_default()
    }

    fn load_custom_sync(&self, pattern: &str) -> Result<LoadedConfig, LoadError> {
        let files = discover::resolve_custom_sources(pattern, &self.options.working_dir)
            .map_err(|err| self.fail(err))?;

        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let value = source::read_source(&path).map_err(|err| self.fail(err))?;
            self.custom_loaded(&path, value, &mut sources);
        }
        Ok(LoadedConfig::from_sources(sources))
    }

    async fn load_custom(&self, pattern: &str) -> Result<LoadedConfig, LoadError> {
        let owned_pattern = pattern.to_string();
        let working_dir = self.options.working_dir.clone();
        let files = tokio::task::spawn_blocking(move || {
            discover::resolve_custom_sources(&owned_pattern, &working_dir)
        })
        .await
        .map_err(|join| LoadError::SourceNotFound {
            pattern: pattern.to_string(),
            cwd: self.options.working_dir.clone(),
            reason: Some(join.to_string()),
        })
        .and_then(|resolved| resolved)
        .map_err(|err| self.fail(err))?;

        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let value = source::read_source_async(&path).await.map_err(|err| self.fail(err))?;
            self.custom_loaded(&path, value, &mut sources);
        }
        Ok(LoadedConfig::from_sources(sources))
    }

    fn custom_loaded(&self, path: &Path, value: Value, sources: &mut Vec<(String, Value)>) {
        self.diagnostics.notice(format!("Load custom config from: {}", path.display()));
        sources.push((normalize_path(&path.to_string_lossy()), value));
    }

    fn read_default_sync(&self) -> Result<(PathBuf, Value), LoadError> {
        let working_dir = &self.options.working_dir;
        let metadata =
            package::metadata_path(working_dir, &self.options.settings.package_json_path);
        let content = fs::read_to_string(&metadata)
            .map_err(|e| package::missing_metadata(&metadata, e.to_string()))?;
        let name = package::package_name(&content, &metadata)?;

        let path = package::default_config_candidates(working_dir, &name)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| package::missing_default(working_dir, &name))?;
        let value = source::read_source(&path).map_err(default_unreadable)?;
        Ok((path, value))
    }

    async fn read_default(&self) -> Result<(PathBuf, Value), LoadError> {
        let working_dir = &self.options.working_dir;
        let metadata =
            package::metadata_path(working_dir, &self.options.settings.package_json_path);
        let content = tokio::fs::read_to_string(&metadata)
            .await
            .map_err(|e| package::missing_metadata(&metadata, e.to_string()))?;
        let name = package::package_name(&content, &metadata)?;

        let mut found = None;
        for candidate in package::default_config_candidates(working_dir, &name) {
            if tokio::fs::metadata(&candidate).await.map(|m| m.is_file()).unwrap_or(false) {
                found = Some(candidate);
                break;
            }
        }
        let path = found.ok_or_else(|| package::missing_default(working_dir, &name))?;
        let value = source::read_source_async(&path).await.map_err(default_unreadable)?;
        Ok((path, value))
    }

    /// A missing default is only fatal when it was meant to be merged into a custom config.
    fn settle_default(
        &self,
        has_custom: bool,
        outcome: Result<(PathBuf, Value), LoadError>,
    ) -> Result<Option<Value>, LoadError> {
        match outcome {
            Ok((path, value)) => {
                self.diagnostics.notice(format!("Load default config from: {}", path.display()));
                Ok(Some(value))
            }
            Err(err) if has_custom && self.options.settings.merges_default() => {
                Err(self.fail(err.into_forced()))
            }
            Err(err) => {
                self.diagnostics.failure(err.to_string());
                Ok(None)
            }
        }
    }

    fn reconcile(
        &self,
        custom: Option<LoadedConfig>,
        default: Option<Value>,
    ) -> Result<LoadedConfig, LoadError> {
        match (custom, default) {
            (None, default) => {
                let mut config = default.map(LoadedConfig::Single).unwrap_or_else(LoadedConfig::empty);
                self.initialize(&mut config)?;
                Ok(config)
            }
            (Some(mut custom), None) => {
                // Custom configs without a default are passed through uninitialized
                // unless the host opted in.
                if self.options.init_custom_config {
                    self.initialize(&mut custom)?;
                }
                Ok(custom)
            }
            (Some(mut custom), Some(default)) => {
                for value in custom.values_mut() {
                    complement(value, &default, self.options.merger.as_ref());
                }
                Ok(custom)
            }
        }
    }

    fn initialize(&self, config: &mut LoadedConfig) -> Result<(), LoadError> {
        if self.options.init.is_empty() {
            return Ok(());
        }
        let fired =
            initialize_all(config, &self.options.init, &self.options.registry, &self.diagnostics)?;
        tracing::debug!(fired, "initializers applied");
        Ok(())
    }

    fn fail(&self, err: LoadError) -> LoadError {
        self.diagnostics.failure(err.to_string());
        if let LoadError::SourceNotFound { reason: Some(reason), .. } = &err {
            self.diagnostics.failure(reason);
        }
        err
    }
}

fn default_unreadable(err: LoadError) -> LoadError {
    match err {
        LoadError::SourceUnreadable { path, reason } => {
            LoadError::DefaultConfigMissing { expected: path, reason, forced: false }
        }
        other => other,
    }
}

/// Blocking load with settings resolved from defaults, environment and `overrides`.
pub fn mash_conf_sync(overrides: &SettingsOverrides) -> Result<LoadedConfig, LoadError> {
    ConfigLoader::new(LoaderOptions::from_overrides(overrides)?).load_sync()
}

/// Async load with settings resolved from defaults, environment and `overrides`.
pub async fn mash_conf(overrides: &SettingsOverrides) -> Result<LoadedConfig, LoadError> {
    ConfigLoader::new(LoaderOptions::from_overrides(overrides)?).load().await
}
