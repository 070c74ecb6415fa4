//! gen subcommand handler.

use anyhow::Result;
use clap::Args;
use tangle_engine::{display_math, generate, Configuration};

use super::seeded_source;
use crate::config::FamilyFlags;

/// Arguments for gen subcommand
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Non-negative integer to disguise
    #[arg(allow_hyphen_values = true)]
    pub target: String,

    #[command(flatten)]
    pub families: FamilyFlags,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of expressions to print
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Wrap each expression in display math
    #[arg(long, default_value_t = false)]
    pub display: bool,
}

pub fn run(args: GenArgs, base: Configuration) -> Result<()> {
    let config = args.families.apply(base);
    let n = config.parse_target(&args.target)?;
    let (_, mut rng) = seeded_source(args.seed);

    for _ in 0..args.count.max(1) {
        let latex = generate(n, &config, &mut rng)?;
        if args.display {
            println!("{}", display_math(&latex));
        } else {
            println!("{latex}");
        }
    }
    Ok(())
}
