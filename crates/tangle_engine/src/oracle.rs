//! Number-theoretic disguise: write `n` as `\varphi(x)` or `\pi(y)` when a
//! small preimage exists.

use tangle_math::{prime_count_preimages, totient_preimages};

use crate::random::{pick, RandomSource};

/// Probability of keeping the literal among the candidates even when a
/// totient or prime-counting preimage exists.
pub const LITERAL_PROBABILITY: f64 = 0.3;

/// One randomly chosen rendering of `n` among `\varphi(x)`, `\pi(y)` and the
/// literal. The literal is always a candidate when neither preimage exists,
/// so this never fails.
pub fn number_theory_functions(n: u64, rng: &mut dyn RandomSource) -> String {
    let phi_inputs = totient_preimages(n);
    let pi_inputs = prime_count_preimages(n);
    let mut candidates: Vec<String> = Vec::with_capacity(3);

    if let Some(x) = pick(rng, &phi_inputs) {
        candidates.push(format!("\\varphi({x})"));
    }
    if let Some(y) = pick(rng, &pi_inputs) {
        candidates.push(format!("\\pi({y})"));
    }
    if candidates.is_empty() || rng.chance(LITERAL_PROBABILITY) {
        candidates.push(n.to_string());
    }

    let chosen = pick(rng, &candidates)
        .cloned()
        .unwrap_or_else(|| n.to_string());
    tracing::trace!(
        target: "oracle",
        n,
        phi = phi_inputs.len(),
        pi = pi_inputs.len(),
        chosen = %chosen,
        "disguise"
    );
    chosen
}

/// `n` disguised through the oracle when `enabled`, the literal otherwise.
pub fn disguise(n: u64, enabled: bool, rng: &mut dyn RandomSource) -> String {
    if enabled {
        number_theory_functions(n, rng)
    } else {
        n.to_string()
    }
}
