//! json subcommand handler.
//!
//! Generates a single expression and prints it with the seed and options
//! that reproduce it. Every failure, configuration included, is reported as
//! an `{"ok": false}` document on stdout.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tangle_engine::{display_math, generate};

use super::seeded_source;
use crate::config::{self, FamilyFlags};
use crate::json_types::{print_pretty_json, ErrorJsonOutput, GenerateJsonOutput, OptionsJson};

/// Arguments for json subcommand
#[derive(Args, Debug)]
pub struct JsonArgs {
    /// Non-negative integer to disguise
    #[arg(allow_hyphen_values = true)]
    pub target: String,

    #[command(flatten)]
    pub families: FamilyFlags,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Wrap the expression in display math
    #[arg(long, default_value_t = false)]
    pub display: bool,
}

pub fn run(args: JsonArgs, config_path: Option<&Path>) {
    match run_inner(&args, config_path) {
        Ok(output) => print_pretty_json(&output),
        Err(e) => print_pretty_json(&ErrorJsonOutput::with_input(e.to_string(), &args.target)),
    }
}

fn run_inner(args: &JsonArgs, config_path: Option<&Path>) -> Result<GenerateJsonOutput> {
    let config = args.families.apply(config::load(config_path)?);
    let n = config.parse_target(&args.target)?;
    let (seed, mut rng) = seeded_source(args.seed);

    let mut latex = generate(n, &config, &mut rng)?;
    if args.display {
        latex = display_math(&latex);
    }

    Ok(GenerateJsonOutput {
        ok: true,
        input: args.target.clone(),
        chars: latex.chars().count(),
        latex,
        seed,
        options: OptionsJson::from_config(&config, args.display),
    })
}
