//! Closed-form overrides applied around every configured operation.
//!
//! Half of the time, before delegating, a wrapped operation checks whether
//! the sub-value is a small factorial or a power of two and renders it with
//! the matching identity instead.

use tangle_math::{is_factorial, is_pow2};

use crate::operation::Operation;
use crate::representations::{factorial, pow2_choose};

/// Probability that the closed-form checks run for a given sub-value.
pub const OVERRIDE_PROBABILITY: f64 = 0.5;

pub fn with_closed_forms(op: Operation, gamma_function: bool, number_theory: bool) -> Operation {
    let name = op.name();
    Operation::new(name, move |v, rng| {
        if rng.chance(OVERRIDE_PROBABILITY) {
            if let Some(k) = is_factorial(v) {
                tracing::trace!(target: "override", v, k, op = name, "factorial");
                return factorial(k, gamma_function, rng);
            }
            if is_pow2(v) {
                let k = v.trailing_zeros();
                tracing::trace!(target: "override", v, k, op = name, "pow2");
                return pow2_choose(k, number_theory, rng);
            }
        }
        op.render(v, rng)
    })
}
