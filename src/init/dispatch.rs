//! Walk initializer paths and invoke the matching initializers

use serde_json::Value;
use tracing::debug;

use super::{Initializer, InitializerRegistry, InitializerSpec, Registered};
use crate::domain::LoadedConfig;
use crate::error::LoadError;
use crate::logging::Diagnostics;

/// Run every initializer of `spec` whose path fully exists on `root`.
///
/// Paths are walked from the root for each entry. A missing segment skips the
/// entry without error. Returns the number of initializers invoked.
pub fn initialize(
    root: &mut Value,
    spec: &InitializerSpec,
    registry: &InitializerRegistry,
    diagnostics: &Diagnostics,
) -> Result<usize, LoadError> {
    let mut fired = 0;
    for (path, initializer) in spec.iter() {
        let Some(node) = resolve_path_mut(root, path) else {
            debug!(path, "initializer path not present, skipping");
            continue;
        };
        invoke(path, initializer, node, registry, diagnostics)?;
        fired += 1;
    }
    Ok(fired)
}

/// [`initialize`] applied to each configuration of a load result independently.
pub fn initialize_all(
    config: &mut LoadedConfig,
    spec: &InitializerSpec,
    registry: &InitializerRegistry,
    diagnostics: &Diagnostics,
) -> Result<usize, LoadError> {
    let mut fired = 0;
    for value in config.values_mut() {
        fired += initialize(value, spec, registry, diagnostics)?;
    }
    Ok(fired)
}

/// Object segments are keys, array segments must be in-range indices.
fn resolve_path_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get_mut(index)),
        _ => None,
    })
}

fn invoke(
    path: &str,
    initializer: &Initializer,
    node: &mut Value,
    registry: &InitializerRegistry,
    diagnostics: &Diagnostics,
) -> Result<(), LoadError> {
    let outcome = match initializer {
        Initializer::Inline(init) => init(node),
        Initializer::Named(name) => match registry.resolve(name) {
            Some(Registered::Callable(init)) => init(node),
            Some(Registered::Plugin(plugin)) => plugin.init(node),
            None => {
                let err = LoadError::InitializerResolutionFailed {
                    path: path.to_string(),
                    name: name.clone(),
                };
                diagnostics.failure(err.to_string());
                return Err(err);
            }
        },
    };

    outcome.map_err(|source| {
        let err = LoadError::InitializerFailed { path: path.to_string(), source };
        diagnostics.failure(err.to_string());
        err
    })
}
