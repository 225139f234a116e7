//! mashconf: locate, complement and initialize configuration for a host package
//!
//! A load discovers an optional *custom* configuration (explicit path or glob),
//! a *default* configuration named after the host package (`<name>.conf`),
//! fills the gaps of the custom configuration from the default, and finally
//! runs path-triggered initializers over the result.
//!
//! ```no_run
//! use mashconf::{ConfigLoader, Initializer, LoaderOptions, SettingsOverrides};
//!
//! # fn main() -> Result<(), mashconf::LoadError> {
//! let options = LoaderOptions::from_overrides(&SettingsOverrides::default())?
//!     .initializer("server.port", Initializer::inline(|port| {
//!         println!("listening on {port}");
//!         Ok(())
//!     }));
//! let config = ConfigLoader::new(options).load_sync()?;
//! # let _ = config;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod init;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod utils;

pub use config::{resolve_settings, LoaderSettings, SettingsOverrides};
pub use domain::{ConfigSet, ConfigValue, LoadedConfig};
pub use error::{LoadError, Severity};
pub use init::{InitPlugin, Initializer, InitializerRegistry, InitializerSpec, Registered};
pub use loader::{mash_conf, mash_conf_sync, ConfigLoader, LoaderOptions};
pub use logging::{DiagnosticSink, Diagnostics, MemorySink, TracingSink};
pub use merge::{complement, complemented, merge_function, MergeFunction};
