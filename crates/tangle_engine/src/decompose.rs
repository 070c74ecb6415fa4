//! Decomposition engine.
//!
//! For a target `n` the engine collects every rule whose precondition holds,
//! picks one uniformly, and lets it render its sub-values through four
//! operation slots drawn from the available operations. Add-multiply is
//! always eligible, so the eligible set is never empty for valid input.
//!
//! With `max_depth > 1` one of the slot candidates re-enters the engine on
//! its sub-value with the depth reduced by one, so recursion is bounded by
//! the configured depth rather than by the shrinking of sub-values.

use smallvec::SmallVec;
use tangle_math::{
    factors, floor_log, integer_sqrt, is_odd, is_prime, is_square, lcm, prime_powers,
};

use crate::config::Configuration;
use crate::error::TangleError;
use crate::latex::{braced, parens};
use crate::operation::Operation;
use crate::random::{pick, shuffle, RandomSource};

/// Operation slots handed to a rule.
pub const SLOT_COUNT: usize = 4;

/// Longest odd-number sum the square rule will write out.
const MAX_ODD_TERMS: u64 = 32;

/// A rewrite of `n` into an equivalent expression shape.
pub trait DecompositionRule: Sync {
    fn name(&self) -> &'static str;

    /// Numeric precondition on the target.
    fn is_eligible(&self, n: u64) -> bool;

    fn apply(
        &self,
        n: u64,
        slots: &Slots<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<String, TangleError>;
}

/// Defines a unit struct implementing [`DecompositionRule`].
macro_rules! define_rule {
    (
        $(#[$meta:meta])*
        $struct_name:ident,
        $name_str:expr,
        eligible: |$en:ident| $eligible:expr,
        apply: |$n:ident, $slots:ident, $rng:ident| $body:block
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl DecompositionRule for $struct_name {
            fn name(&self) -> &'static str {
                $name_str
            }

            fn is_eligible(&self, $en: u64) -> bool {
                $eligible
            }

            fn apply(
                &self,
                $n: u64,
                $slots: &Slots<'_>,
                $rng: &mut dyn RandomSource,
            ) -> Result<String, TangleError> $body
        }
    };
}

enum Slot {
    Leaf(Operation),
    Nested,
}

/// The (up to) four renderers a rule draws on for its sub-values.
pub struct Slots<'a> {
    slots: SmallVec<[Slot; 8]>,
    pool: &'a [Operation],
    depth: u32,
}

impl<'a> Slots<'a> {
    /// Pads the pool with identity operations up to [`SLOT_COUNT`], adds the
    /// nested-decomposition candidate when depth allows, shuffles and keeps
    /// four.
    fn draw(pool: &'a [Operation], depth: u32, rng: &mut dyn RandomSource) -> Self {
        let mut slots: SmallVec<[Slot; 8]> = pool.iter().cloned().map(Slot::Leaf).collect();
        if depth > 1 {
            slots.push(Slot::Nested);
        }
        while slots.len() < SLOT_COUNT {
            slots.push(Slot::Leaf(Operation::identity()));
        }
        shuffle(rng, slots.as_mut_slice());
        slots.truncate(SLOT_COUNT);
        Self { slots, pool, depth }
    }

    /// Renders `v` through slot `i` (taken modulo the slot count).
    pub fn render(
        &self,
        i: usize,
        v: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<String, TangleError> {
        match &self.slots[i % self.slots.len()] {
            Slot::Leaf(op) => Ok(op.render(v, rng)),
            Slot::Nested => {
                let inner = decompose_at(v, self.pool, self.depth - 1, rng)?;
                Ok(parens(&inner))
            }
        }
    }

    pub fn names(&self) -> SmallVec<[&'static str; 8]> {
        self.slots
            .iter()
            .map(|s| match s {
                Slot::Leaf(op) => op.name(),
                Slot::Nested => "nested",
            })
            .collect()
    }
}

/// Divisor pair `(a, b)` with `a * b == n`, preferring non-trivial divisors
/// when `n` has any.
pub fn divisor_pair(n: u64, rng: &mut dyn RandomSource) -> (u64, u64) {
    let all = factors(n);
    let proper: Vec<u64> = all.iter().copied().filter(|&d| d > 1 && d < n).collect();
    let candidates = if proper.is_empty() { &all } else { &proper };
    let a = pick(rng, candidates.as_slice()).copied().unwrap_or(1);
    let b = if a == 0 { 0 } else { n / a };
    (a, b)
}

/// `(ceil(n/2), floor(n/2))`; for odd `n` their squares differ by `n`.
pub fn consecutive_halves(n: u64) -> (u64, u64) {
    let low = n / 2;
    (n - low, low)
}

/// Splits the distinct prime powers of `n` into two groups whose products
/// have `n` as their lcm. With two or more distinct primes both groups are
/// non-empty; a prime power leaves the second group empty (product `1`).
pub fn lcm_groups(n: u64, rng: &mut dyn RandomSource) -> (Vec<u64>, Vec<u64>) {
    let mut powers: Vec<u64> = prime_powers(n)
        .into_iter()
        .map(|(p, e)| p.pow(e))
        .collect();
    shuffle(rng, powers.as_mut_slice());
    let split = if powers.len() >= 2 {
        rng.range(1, powers.len() as u64 - 1) as usize
    } else {
        powers.len()
    };
    let second = powers.split_off(split);
    (powers, second)
}

/// `(base^k, k)` closest to `n` for the given base, with the offset
/// `n - base^k` (positive) or `base^k - n` (negative).
pub fn power_offset(n: u64, base: u64) -> (u32, u64, bool) {
    let k = floor_log(n, base);
    let lower = base.pow(k);
    let below = n - lower;
    match lower.checked_mul(base) {
        Some(upper) if upper - n <= below => (k + 1, upper - n, false),
        _ => (k, below, true),
    }
}

fn power_suffix(k: u32) -> String {
    if k == 1 {
        String::new()
    } else {
        format!("^{{{k}}}")
    }
}

define_rule!(
    /// `ab` or `(a-c)(b+c) + c(b-a+c)` for a divisor pair and random `c`.
    AbcSplitRule,
    "abc_split",
    eligible: |n| n != 0 && n < 100 && (n == 2 || !is_prime(n)),
    apply: |n, slots, rng| {
        let (a, b) = divisor_pair(n, rng);
        let c = rng.range(1, 30);

        if rng.chance(0.2) {
            let left = braced(&parens(&braced(&slots.render(0, a, rng)?)));
            let right = braced(&parens(&braced(&slots.render(1, b, rng)?)));
            return Ok(braced(&format!("{left}{right}")));
        }

        let a0 = slots.render(0, a, rng)?;
        let c1 = slots.render(1, c, rng)?;
        let b2 = slots.render(2, b, rng)?;
        let c3 = slots.render(3, c, rng)?;
        let c3b = slots.render(3, c, rng)?;
        let b3 = slots.render(3, b, rng)?;
        let a3 = slots.render(3, a, rng)?;
        let c3c = slots.render(3, c, rng)?;
        Ok(format!(
            "{{ \\left({{{a0} - {c1}}}\\right) \\left({{{b2} + {c3}}}\\right) + {{{c3b}}}{{\\left({{{b3} - {a3} + {c3c}}} \\right)}} }}"
        ))
    }
);

define_rule!(
    /// `\sqrt{n^2}` for small `n`.
    SqrtRule,
    "sqrt",
    eligible: |n| n < 10,
    apply: |n, slots, rng| {
        let square = slots.render(0, n * n, rng)?;
        Ok(format!("{{\\sqrt{{{square}}}}}"))
    }
);

define_rule!(
    /// Sum of the first `sqrt(n)` odd numbers, or a binomial square.
    SquareRule,
    "sum_of_odds",
    eligible: |n| n > 1 && is_square(n),
    apply: |n, slots, rng| {
        let root = integer_sqrt(n);

        if root <= MAX_ODD_TERMS && rng.chance(0.2) {
            let mut terms = vec![slots.render(0, 1, rng)?];
            for odd in (3..2 * root).step_by(2) {
                terms.push(slots.render(3, odd, rng)?);
            }
            return Ok(format!("{{ {} }}", terms.join(" + ")));
        }

        let a = rng.range(1, root - 1);
        let b = root - a;
        if rng.chance(0.5) {
            let a0 = slots.render(0, a, rng)?;
            let b0 = slots.render(0, b, rng)?;
            Ok(format!("{{ {{\\left({a0} + {b0}\\right)}}^2}}"))
        } else {
            let a0 = slots.render(0, a, rng)?;
            let two = slots.render(3, 2, rng)?;
            let a1 = slots.render(1, a, rng)?;
            let b2 = slots.render(2, b, rng)?;
            let b3 = slots.render(3, b, rng)?;
            Ok(format!(
                "{{ {{\\left({a0}\\right)}}^2 + {{{two}}}{{\\left({a1}\\right)}}{{\\left({b2}\\right)}} + {{\\left({b3}\\right)}}^2}}"
            ))
        }
    }
);

define_rule!(
    /// `ceil(n/2)^2 - floor(n/2)^2` for odd `n`.
    DifferenceOfSquaresRule,
    "difference_of_squares",
    eligible: |n| is_odd(n),
    apply: |n, slots, rng| {
        let (high, low) = consecutive_halves(n);
        if high < 10 && rng.chance(0.7) {
            let hi_sq = slots.render(0, high * high, rng)?;
            let lo_sq = slots.render(0, low * low, rng)?;
            Ok(format!("{{{hi_sq} - {lo_sq}}}"))
        } else {
            let hi = slots.render(0, high, rng)?;
            let lo = slots.render(1, low, rng)?;
            Ok(format!(
                "{{ \\left({{{hi}}}\\right)^2 - \\left({{{lo}}}\\right)^2}}"
            ))
        }
    }
);

define_rule!(
    /// `nr / r` for a small random `r`.
    MulDivideRule,
    "mul_divide",
    eligible: |n| n <= 200,
    apply: |n, slots, rng| {
        let r = rng.range(1, 5);
        let top = slots.render(0, n * r, rng)?;
        let bottom = slots.render(1, r, rng)?;
        Ok(format!("{{\\frac{{{top}}}{{{bottom}}}}}"))
    }
);

define_rule!(
    /// `\operatorname{lcm}(g_1, g_2)` over a partition of the prime powers.
    LcmSplitRule,
    "lcm_split",
    eligible: |n| n > 1 && !is_prime(n),
    apply: |n, slots, rng| {
        let (first, second) = lcm_groups(n, rng);
        let g1: u64 = first.iter().product();
        let g2: u64 = second.iter().product();
        debug_assert_eq!(lcm(g1, g2), n);
        let left = slots.render(0, g1, rng)?;
        let right = slots.render(1, g2, rng)?;
        Ok(format!(
            "{{\\operatorname{{lcm}}\\left({{{left}}}, {{{right}}}\\right)}}"
        ))
    }
);

define_rule!(
    /// `a \times d + r` with `n = ad + r`. Always eligible.
    AddMultiplyRule,
    "add_multiply",
    eligible: |_n| true,
    apply: |n, slots, rng| {
        let d = rng.range(2, n.saturating_add(1).max(2));
        let (a, r) = (n / d, n % d);
        let a0 = slots.render(0, a, rng)?;
        let d1 = slots.render(1, d, rng)?;
        let r2 = slots.render(2, r, rng)?;
        Ok(format!("{{{a0} \\times {{{d1}}} + {r2}}}"))
    }
);

define_rule!(
    /// `2d + 1` or `(d+1)^2 - d^2` with `d = floor(n/2)`.
    OddSplitRule,
    "odd_split",
    eligible: |n| n > 2 && is_odd(n),
    apply: |n, slots, rng| {
        let d = n / 2;
        if rng.chance(0.5) {
            let two = slots.render(0, 2, rng)?;
            let d1 = slots.render(1, d, rng)?;
            let one = slots.render(2, 1, rng)?;
            Ok(format!("{{{two} \\left({{{d1}}}\\right) + {one}}}"))
        } else {
            let d0 = slots.render(0, d, rng)?;
            let one = slots.render(1, 1, rng)?;
            let d2 = slots.render(2, d, rng)?;
            Ok(format!(
                "{{\\left({{{d0} + {one}}}\\right)^2 - \\left({{{d2}}}\\right)^2}}"
            ))
        }
    }
);

define_rule!(
    /// `\sqrt{c^2 - b^2}` from Fibonacci's Pythagorean triple for odd `n`.
    PythagoreanRule,
    "pythagorean_root",
    eligible: |n| n < 10 && is_odd(n),
    apply: |n, slots, rng| {
        let square = n * n;
        let (c, b) = ((square + 1) / 2, (square - 1) / 2);
        let c0 = slots.render(0, c, rng)?;
        let b1 = slots.render(1, b, rng)?;
        Ok(format!(
            "{{\\sqrt{{\\left({{{c0}}}\\right)^2 - \\left({{{b1}}}\\right)^2}}}}"
        ))
    }
);

define_rule!(
    /// `base^k \pm r` around the nearest power of a random base in `6..=8`.
    PowerOffsetRule,
    "power_offset",
    eligible: |n| n >= 8,
    apply: |n, slots, rng| {
        let base = rng.range(6, 8);
        let (k, offset, add) = power_offset(n, base);
        let b0 = slots.render(0, base, rng)?;
        let r1 = slots.render(1, offset, rng)?;
        let sign = if add { '+' } else { '-' };
        Ok(format!(
            "{{ \\left({{{b0}}}\\right){} {sign} {{{r1}}}}}",
            power_suffix(k)
        ))
    }
);

/// Every rule the engine knows, in a fixed order.
pub const RULES: &[&dyn DecompositionRule] = &[
    &AbcSplitRule,
    &SqrtRule,
    &SquareRule,
    &DifferenceOfSquaresRule,
    &MulDivideRule,
    &LcmSplitRule,
    &AddMultiplyRule,
    &OddSplitRule,
    &PythagoreanRule,
    &PowerOffsetRule,
];

/// Rules whose precondition holds for `n`.
pub fn eligible_rules(n: u64) -> SmallVec<[&'static dyn DecompositionRule; 16]> {
    RULES.iter().copied().filter(|r| r.is_eligible(n)).collect()
}

/// Writes `n` as an equivalent expression using the given operations.
///
/// Validates `n` against the configuration's range, then applies one
/// uniformly chosen eligible rule (recursing up to the configured depth).
pub fn decompose(
    n: u64,
    ops: &[Operation],
    config: &Configuration,
    rng: &mut dyn RandomSource,
) -> Result<String, TangleError> {
    let n = config.validate_target(n)?;
    let depth = config.depth();
    if depth != config.max_depth {
        tracing::debug!(
            target: "decompose",
            requested = config.max_depth,
            depth,
            "depth_clamped"
        );
    }
    decompose_at(n, ops, depth, rng)
}

fn decompose_at(
    n: u64,
    ops: &[Operation],
    depth: u32,
    rng: &mut dyn RandomSource,
) -> Result<String, TangleError> {
    let eligible = eligible_rules(n);
    let rule = *pick(rng, eligible.as_slice()).ok_or(TangleError::NoEligibleRule(n))?;
    let slots = Slots::draw(ops, depth, rng);

    tracing::debug!(
        target: "decompose",
        n,
        depth,
        rule = rule.name(),
        eligible = eligible.len(),
        slots = ?slots.names(),
        "rule_chosen"
    );

    rule.apply(n, &slots, rng)
}
