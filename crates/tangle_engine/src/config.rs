use serde::{Deserialize, Serialize};

use crate::error::TangleError;
use crate::operation::Operation;
use crate::oracle::number_theory_functions;
use crate::overrides::with_closed_forms;
use crate::representations::{
    eulers_identity, infinite_geometric_series, lim_diff_two_squares, limit_exponential,
    limit_natural_log, limit_polynomial, trig_identity,
};

/// Default upper bound on the target value.
pub const DEFAULT_MAX_VALUE: u64 = 1000;

/// Hard cap on nested decomposition depth.
pub const MAX_DEPTH: u32 = 4;

/// Which representation families are available for one run.
///
/// Any combination is legal, including none at all (literal rendering only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Render factorials as `\Gamma(n+1)` half of the time.
    pub gamma_function: bool,
    pub eulers_identity: bool,
    pub exponential_limits: bool,
    pub polynomial_limits: bool,
    /// Disguise coefficients as totient / prime-counting values, and offer
    /// the disguise itself as an operation.
    pub number_theory: bool,
    pub geometric_series: bool,
    /// Wrap operation output with `\cos^2x + \sin^2x`.
    pub trigonometry: bool,
    /// Largest accepted target; `0` means unbounded.
    pub max_value: u64,
    /// `1` applies a single rule; higher values let operation slots
    /// decompose their sub-values again, up to [`MAX_DEPTH`].
    pub max_depth: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            gamma_function: false,
            eulers_identity: false,
            exponential_limits: false,
            polynomial_limits: false,
            number_theory: false,
            geometric_series: false,
            trigonometry: false,
            max_value: DEFAULT_MAX_VALUE,
            max_depth: 1,
        }
    }
}

impl Configuration {
    /// Every representation family enabled.
    pub fn all() -> Self {
        Self {
            gamma_function: true,
            eulers_identity: true,
            exponential_limits: true,
            polynomial_limits: true,
            number_theory: true,
            geometric_series: true,
            trigonometry: true,
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<u64> {
        (self.max_value != 0).then_some(self.max_value)
    }

    pub fn depth(&self) -> u32 {
        self.max_depth.clamp(1, MAX_DEPTH)
    }

    /// Names of the enabled families, in declaration order.
    pub fn enabled_families(&self) -> Vec<&'static str> {
        [
            ("gamma_function", self.gamma_function),
            ("eulers_identity", self.eulers_identity),
            ("exponential_limits", self.exponential_limits),
            ("polynomial_limits", self.polynomial_limits),
            ("number_theory", self.number_theory),
            ("geometric_series", self.geometric_series),
            ("trigonometry", self.trigonometry),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }

    /// Sets a family flag by name, for interactive front ends.
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), TangleError> {
        let slot = match name {
            "gamma" | "gamma_function" => &mut self.gamma_function,
            "euler" | "eulers_identity" => &mut self.eulers_identity,
            "exp" | "exponential_limits" => &mut self.exponential_limits,
            "poly" | "polynomial_limits" => &mut self.polynomial_limits,
            "nt" | "number_theory" => &mut self.number_theory,
            "series" | "geometric_series" => &mut self.geometric_series,
            "trig" | "trigonometry" => &mut self.trigonometry,
            other => return Err(TangleError::Config(format!("unknown flag '{other}'"))),
        };
        *slot = value;
        Ok(())
    }

    /// Target accepted by this configuration's range limit.
    pub fn validate_target(&self, n: u64) -> Result<u64, TangleError> {
        match self.limit() {
            Some(limit) if n > limit => Err(TangleError::OutOfRange { value: n, limit }),
            _ => Ok(n),
        }
    }

    /// Parses user text into a validated target.
    pub fn parse_target(&self, input: &str) -> Result<u64, TangleError> {
        let trimmed = input.trim();
        let n = trimmed
            .parse::<u64>()
            .map_err(|_| TangleError::InvalidInput(trimmed.to_string()))?;
        self.validate_target(n)
    }
}

/// Operations for the enabled families, each wrapped with the closed-form
/// overrides. Empty when no family that contributes an operation is enabled.
pub fn build_operations(config: &Configuration) -> Vec<Operation> {
    let nt = config.number_theory;
    let mut ops = Vec::new();

    if config.eulers_identity {
        ops.push(Operation::new("eulers_identity", |n, _| eulers_identity(n)));
    }
    if config.exponential_limits {
        ops.push(Operation::new("limit_natural_log", move |n, rng| {
            limit_natural_log(n, nt, rng)
        }));
        ops.push(Operation::new("limit_exponential", move |n, rng| {
            limit_exponential(n, nt, rng)
        }));
    }
    if config.polynomial_limits {
        ops.push(Operation::new("lim_diff_two_squares", lim_diff_two_squares));
        ops.push(Operation::new("limit_polynomial", limit_polynomial));
    }
    if config.geometric_series {
        ops.push(Operation::new("infinite_geometric_series", move |n, rng| {
            infinite_geometric_series(n, nt, rng)
        }));
    }
    if config.number_theory {
        ops.push(Operation::new("number_theory", number_theory_functions));
    }

    ops.into_iter()
        .map(|op| {
            let op = if config.trigonometry {
                op.map(|s, rng| trig_identity(&s, rng).unwrap_or(s))
            } else {
                op
            };
            with_closed_forms(op, config.gamma_function, nt)
        })
        .collect()
}
