//! Randomized decomposition of non-negative integers into equivalent LaTeX.
//!
//! [`generate`] is the single entry point front ends need: it validates the
//! target, builds the configured operations, runs the decomposition engine
//! and checks the structural invariants of the result.

pub mod config;
pub mod decompose;
pub mod error;
pub mod latex;
pub mod operation;
pub mod oracle;
pub mod overrides;
pub mod random;
pub mod representations;

pub use config::{build_operations, Configuration, DEFAULT_MAX_VALUE, MAX_DEPTH};
pub use decompose::{decompose, eligible_rules, DecompositionRule, RULES};
pub use error::TangleError;
pub use latex::{check_balanced, display_math, tidy};
pub use operation::Operation;
pub use random::{RandomSource, RngSource, ScriptedSource};

/// Writes `n` as a randomized expression that evaluates to `n`.
pub fn generate(
    n: u64,
    config: &Configuration,
    rng: &mut dyn RandomSource,
) -> Result<String, TangleError> {
    let ops = build_operations(config);
    let raw = decompose(n, &ops, config, rng)?;
    let latex = tidy(&raw);
    check_balanced(&latex)?;
    ensure_invariant!(!latex.is_empty(), "empty expression generated for {}", n);
    Ok(latex)
}

/// File name (without extension) used when exporting the rendering of `n`.
pub fn export_file_stem(n: u64) -> String {
    format!("complicated-expression-that-equals-{n}")
}
