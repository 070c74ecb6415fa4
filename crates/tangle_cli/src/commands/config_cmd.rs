//! config subcommand handler.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;
use tangle_engine::Configuration;

use crate::config::{self, CONFIG_FILE};

/// Arguments for config subcommand
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the default configuration file
    #[arg(long, default_value_t = false)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, default_value_t = false, requires = "init")]
    pub force: bool,
}

/// Without `--init`, prints the effective configuration as TOML.
pub fn run(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    if !args.init {
        let current = config::load(path)?;
        print!("{}", toml::to_string_pretty(&current)?);
        return Ok(());
    }

    let target = path.unwrap_or(Path::new(CONFIG_FILE));
    if target.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }
    config::save(&Configuration::default(), target)?;
    println!("wrote {}", target.display());
    Ok(())
}
