//! Interactive loop: each line is a target, or a `:command` that changes the
//! session configuration.

use anyhow::Result;
use clap::Args;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tangle_engine::{generate, Configuration, RandomSource};

use super::seeded_source;
use crate::config::FamilyFlags;

/// Arguments for repl subcommand
#[derive(Args, Debug)]
pub struct ReplArgs {
    #[command(flatten)]
    pub families: FamilyFlags,

    /// Seed for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,
}

const HELP: &str = "\
Enter a non-negative integer to disguise it.
  :set <flag> on|off   toggle a family (gamma, euler, exp, poly, nt, series, trig)
  :depth <n>           nesting depth (1 to 4)
  :show                print the current configuration
  :help                this message
  :quit                leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Error(String),
    Quit,
}

pub struct Session<R> {
    pub config: Configuration,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: Configuration, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return match generate_line(line, &self.config, &mut self.rng) {
                Ok(latex) => Reply::Output(latex),
                Err(e) => Reply::Error(e),
            };
        };

        let mut words = command.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("quit" | "q" | "exit"), None, None) => Reply::Quit,
            (Some("help"), None, None) => Reply::Output(HELP.to_string()),
            (Some("show"), None, None) => match toml::to_string_pretty(&self.config) {
                Ok(s) => Reply::Output(s.trim_end().to_string()),
                Err(e) => Reply::Error(e.to_string()),
            },
            (Some("set"), Some(flag), Some(state)) => {
                let value = match state {
                    "on" | "true" => true,
                    "off" | "false" => false,
                    other => return Reply::Error(format!("expected on or off, got '{other}'")),
                };
                match self.config.set_flag(flag, value) {
                    Ok(()) => Reply::Output(format!("{flag}: {state}")),
                    Err(e) => Reply::Error(e.to_string()),
                }
            }
            (Some("depth"), Some(depth), None) => match depth.parse::<u32>() {
                Ok(d) => {
                    self.config.max_depth = d;
                    Reply::Output(format!("depth: {}", self.config.depth()))
                }
                Err(_) => Reply::Error(format!("invalid depth '{depth}'")),
            },
            _ => Reply::Error(format!("unknown command ':{command}' (try :help)")),
        }
    }
}

fn generate_line(
    line: &str,
    config: &Configuration,
    rng: &mut dyn RandomSource,
) -> Result<String, String> {
    let n = config.parse_target(line).map_err(|e| e.to_string())?;
    generate(n, config, rng).map_err(|e| e.to_string())
}

pub fn run(args: ReplArgs, base: Configuration) -> Result<()> {
    let (seed, rng) = seeded_source(args.seed);
    let mut session = Session::new(args.families.apply(base), rng);

    println!("tangle: type a number, :help for commands (seed {seed})");

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs::home_dir()
        .map(|p| p.join(".tangle_history"))
        .unwrap_or_else(|| std::path::PathBuf::from(".tangle_history"));
    let _ = rl.load_history(&history_path);

    loop {
        match rl.readline("tangle> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match session.handle_line(&line) {
                    Reply::Output(s) => println!("{s}"),
                    Reply::Error(e) => eprintln!("Error: {e}"),
                    Reply::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    Ok(())
}
