//! Sources command implementation
//!
//! Mirrors the lookup order of a load without reading or merging anything.

use anyhow::Result;
use std::fs;

use super::output;
use mashconf::loader::{discover, package};
use mashconf::utils::display_relative;
use mashconf::LoaderOptions;

pub fn run(options: LoaderOptions) -> Result<()> {
    let working_dir = &options.working_dir;
    let settings = &options.settings;
    println!("Working directory: {}", working_dir.display());

    if let Some(pattern) = settings.config.as_deref() {
        output::section(&format!("Custom config ({})", pattern));
        match discover::resolve_custom_sources(pattern, working_dir) {
            Ok(paths) => {
                for path in paths {
                    output::found(&display_relative(&path, working_dir));
                }
            }
            Err(err) => output::missing(&err.to_string()),
        }
    }

    let has_custom = settings.config.is_some();
    if has_custom && !settings.merges_default() {
        println!("Default config: not merged");
        return Ok(());
    }

    let metadata = package::metadata_path(working_dir, &settings.package_json_path);
    output::section("Package metadata");
    let name = match fs::read_to_string(&metadata) {
        Ok(content) => match package::package_name(&content, &metadata) {
            Ok(name) => {
                output::found(&format!("{} (name: {})", display_relative(&metadata, working_dir), name));
                name
            }
            Err(err) => {
                output::missing(&err.to_string());
                return Ok(());
            }
        },
        Err(_) => {
            output::missing(&display_relative(&metadata, working_dir));
            return Ok(());
        }
    };

    output::section("Default config candidates");
    let mut selected = false;
    for candidate in package::default_config_candidates(working_dir, &name) {
        let shown = display_relative(&candidate, working_dir);
        if !selected && candidate.is_file() {
            selected = true;
            output::found(&format!("{} (selected)", shown));
        } else if candidate.is_file() {
            output::found(&shown);
        } else {
            output::missing(&shown);
        }
    }
    Ok(())
}
