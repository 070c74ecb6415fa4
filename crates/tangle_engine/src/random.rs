//! Injectable randomness.
//!
//! Every stochastic choice in the engine goes through [`RandomSource`], which
//! exposes a single uniform draw in `[0, 1)`. Branch thresholds are compared
//! against that draw directly, so a scripted source pins every decision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..n`; `0` when `n == 0`.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo <= hi);
        let span = hi - lo;
        if span == u64::MAX {
            return lo + (self.next_f64() * u64::MAX as f64) as u64;
        }
        let offset = (self.next_f64() * (span + 1) as f64) as u64;
        lo + offset.min(span)
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Uniformly chosen element, `None` for an empty slice.
pub fn pick<'a, R, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(rng.below(items.len()))
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<R, T>(rng: &mut R, items: &mut [T])
where
    R: RandomSource + ?Sized,
{
    let mut remaining = items.len();
    while remaining > 1 {
        let j = rng.below(remaining);
        remaining -= 1;
        items.swap(remaining, j);
    }
}

/// Adapter from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0 - f64::EPSILON);
        }
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
