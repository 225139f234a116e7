//! mashconf: inspect how a host package's configuration is located and merged
//!
//! Runs the same load a host application would and prints the result, or
//! lists every source the load would consider.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
