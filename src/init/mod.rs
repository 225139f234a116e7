//! Path-triggered initializers
//!
//! An [`InitializerSpec`] maps dot-delimited property paths (`"db.pool"`) to
//! an [`Initializer`]. After a load, every initializer whose path fully exists
//! on the configuration is invoked with the node at that path.
//!
//! Named initializers are looked up in an [`InitializerRegistry`] that the host
//! application fills at startup.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub mod dispatch;

pub use dispatch::{initialize, initialize_all};

/// Callable initializer; receives the resolved node and may rewrite it.
pub type InitFn = Arc<dyn Fn(&mut Value) -> anyhow::Result<()> + Send + Sync>;

/// Object-style initializer registered under a name.
pub trait InitPlugin: Send + Sync {
    fn init(&self, node: &mut Value) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub enum Initializer {
    Inline(InitFn),
    /// Resolved through the [`InitializerRegistry`] at dispatch time.
    Named(String),
}

impl Initializer {
    pub fn inline<F>(init: F) -> Self
    where
        F: Fn(&mut Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Initializer::Inline(Arc::new(init))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Initializer::Named(name.into())
    }
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Initializer::Inline(_) => f.write_str("Inline(..)"),
            Initializer::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Ordered `(path, initializer)` pairs.
#[derive(Debug, Clone, Default)]
pub struct InitializerSpec {
    entries: Vec<(String, Initializer)>,
}

impl InitializerSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, initializer: Initializer) -> Self {
        self.insert(path, initializer);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, initializer: Initializer) {
        self.entries.push((path.into(), initializer));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Initializer)> {
        self.entries.iter().map(|(path, init)| (path.as_str(), init))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>> FromIterator<(P, Initializer)> for InitializerSpec {
    fn from_iter<I: IntoIterator<Item = (P, Initializer)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(path, init)| (path.into(), init)).collect() }
    }
}

/// What a registered name resolves to.
#[derive(Clone)]
pub enum Registered {
    Callable(InitFn),
    Plugin(Arc<dyn InitPlugin>),
}

/// Name -> initializer lookup for [`Initializer::Named`].
#[derive(Clone, Default)]
pub struct InitializerRegistry {
    entries: HashMap<String, Registered>,
}

impl InitializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_fn<F>(&mut self, name: impl Into<String>, init: F) -> &mut Self
    where
        F: Fn(&mut Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Registered::Callable(Arc::new(init)));
        self
    }

    pub fn register_plugin(
        &mut self,
        name: impl Into<String>,
        plugin: Arc<dyn InitPlugin>,
    ) -> &mut Self {
        self.entries.insert(name.into(), Registered::Plugin(plugin));
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&Registered> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for InitializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("InitializerRegistry").field("names", &names).finish()
    }
}
