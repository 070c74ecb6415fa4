use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tangle_engine::{Configuration, TangleError};

pub const CONFIG_FILE: &str = "tangle.toml";

/// Reads the configuration from `path`, or from `./tangle.toml` when no path
/// is given. A missing default file means defaults; a missing explicit file
/// is an error.
pub fn load(path: Option<&Path>) -> Result<Configuration> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => (Path::new(CONFIG_FILE), false),
    };
    if !explicit && !path.exists() {
        return Ok(Configuration::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .map_err(|e| TangleError::Config(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

pub fn save(config: &Configuration, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("serializing configuration")?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Family and range switches shared by every subcommand that generates.
/// Switches only ever turn families on; the file decides what is on by default.
#[derive(Args, Debug, Clone, Default)]
pub struct FamilyFlags {
    /// Render factorials as Gamma function values
    #[arg(long)]
    pub gamma: bool,

    /// Use Euler's identity e^{pi i} = -1
    #[arg(long)]
    pub euler: bool,

    /// Exponential and natural-log limits
    #[arg(long)]
    pub exp: bool,

    /// Polynomial limits
    #[arg(long)]
    pub poly: bool,

    /// Euler's totient and prime-counting disguises
    #[arg(long)]
    pub number_theory: bool,

    /// Geometric series
    #[arg(long)]
    pub series: bool,

    /// Pythagorean trig identity wrappers
    #[arg(long)]
    pub trig: bool,

    /// Enable every family
    #[arg(long)]
    pub all: bool,

    /// Nesting depth of the decomposition (1 to 4)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Largest accepted target
    #[arg(long, conflicts_with = "unbounded")]
    pub max_value: Option<u64>,

    /// Accept any u64 target
    #[arg(long)]
    pub unbounded: bool,
}

impl FamilyFlags {
    pub fn apply(&self, base: Configuration) -> Configuration {
        let mut config = if self.all {
            Configuration {
                max_value: base.max_value,
                max_depth: base.max_depth,
                ..Configuration::all()
            }
        } else {
            base
        };

        config.gamma_function |= self.gamma;
        config.eulers_identity |= self.euler;
        config.exponential_limits |= self.exp;
        config.polynomial_limits |= self.poly;
        config.number_theory |= self.number_theory;
        config.geometric_series |= self.series;
        config.trigonometry |= self.trig;

        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(max) = self.max_value {
            config.max_value = max;
        }
        if self.unbounded {
            config.max_value = 0;
        }
        config
    }
}
