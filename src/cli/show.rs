//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use mashconf::{ConfigLoader, LoaderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Toml,
    Yaml,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn run(args: ShowArgs, options: LoaderOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let loader = ConfigLoader::new(options);
    let config = runtime.block_on(loader.load())?;

    print!("{}", render(&config.into_value(), args.format)?);
    Ok(())
}

fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        OutputFormat::Toml => {
            toml::to_string_pretty(value).context("Config cannot be represented as TOML")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}
