//! JSON output types for the `json` subcommand.

use serde::Serialize;
use tangle_engine::Configuration;

/// One generated expression
#[derive(Serialize, Debug)]
pub struct GenerateJsonOutput {
    pub ok: bool,
    pub input: String,
    pub latex: String,
    pub chars: usize,
    /// Seed that reproduces this output with `--seed`
    pub seed: u64,
    pub options: OptionsJson,
}

/// Configuration the expression was generated under
#[derive(Serialize, Debug)]
pub struct OptionsJson {
    pub families: Vec<&'static str>,
    pub max_value: Option<u64>,
    pub max_depth: u32,
    pub display: bool,
}

impl OptionsJson {
    pub fn from_config(config: &Configuration, display: bool) -> Self {
        Self {
            families: config.enabled_families(),
            max_value: config.limit(),
            max_depth: config.depth(),
            display,
        }
    }
}

/// An error result
#[derive(Serialize, Debug)]
pub struct ErrorJsonOutput {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl ErrorJsonOutput {
    pub fn with_input(error: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            input: Some(input.into()),
        }
    }
}

pub fn print_pretty_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("JSON serialization error: {}", e);
            println!("{{\"ok\":false,\"error\":\"JSON_SERIALIZATION_FAILED\"}}");
        }
    }
}
