//! Command-line interface for mashconf
//!
//! Provides `show` and `sources` subcommands. The load flags are global so they
//! can be given before or after the subcommand.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mashconf::{LoaderOptions, SettingsOverrides};

mod output;
mod show;
mod sources;

/// Locate, complement and initialize configuration for a host package
#[derive(Parser)]
#[command(name = "mashconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    load: LoadArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and print the result
    Show(show::ShowArgs),

    /// List the sources a load would read, without loading them
    Sources,
}

/// Flags shared by every subcommand; unset flags fall back to `MASHCONF_*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Custom config path or glob pattern
    #[arg(short, long, global = true, value_name = "PATH_OR_GLOB")]
    pub config: Option<String>,

    /// Always merge the default config into the custom config
    #[arg(short, long, global = true)]
    pub merge_default_config: bool,

    /// Never merge the default config into the custom config
    #[arg(short, long, global = true)]
    pub ignore_default_config: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Host package root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Package metadata path relative to the package root
    #[arg(long, global = true, value_name = "PATH")]
    pub package_json: Option<String>,
}

impl LoadArgs {
    /// Flags that were not given stay `None` so lower layers can supply them.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config: self.config.clone(),
            force_merge_default_config: self.merge_default_config.then_some(true),
            ignore_default_config: self.ignore_default_config.then_some(true),
            verbose: self.verbose.then_some(true),
            package_json_path: self.package_json.clone(),
            ..Default::default()
        }
    }

    pub fn options(&self) -> Result<LoaderOptions> {
        let mut options = LoaderOptions::from_overrides(&self.overrides())?;
        if let Some(cwd) = &self.cwd {
            if !cwd.is_dir() {
                anyhow::bail!("Working directory is not a directory: {}", cwd.display());
            }
            options = options.working_dir(cwd);
        }
        Ok(options)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.load.options()?;

    // RUST_LOG in the environment always takes precedence; verbose (flag or
    // MASHCONF_VERBOSE) falls back to DEBUG.
    let filter = if options.settings.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args, options),
        Commands::Sources => sources::run(options),
    }
}
