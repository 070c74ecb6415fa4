mod commands;
mod config;
mod json_types;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

use commands::{config_cmd, gen, json, repl};

#[derive(Parser, Debug)]
#[command(name = "tangle")]
#[command(about = "Write an integer as a complicated but equivalent LaTeX expression")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./tangle.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print randomized expressions equal to N
    Gen(gen::GenArgs),
    /// Print one expression as JSON
    Json(json::JsonArgs),
    /// Interactive loop
    Repl(repl::ReplArgs),
    /// Show or initialise the configuration file
    Config(config_cmd::ConfigArgs),
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("warn,decompose=debug,oracle=debug,override=debug"),
        _ => EnvFilter::new("warn,decompose=trace,oracle=trace,override=trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.config.as_deref();
    match cli.command {
        // runs before loading so a broken file can be replaced
        Command::Config(args) => config_cmd::run(args, path),
        Command::Gen(args) => gen::run(args, config::load(path)?),
        Command::Json(args) => {
            json::run(args, path);
            Ok(())
        }
        Command::Repl(args) => repl::run(args, config::load(path)?),
    }
}
