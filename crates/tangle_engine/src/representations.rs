//! Leaf renderers.
//!
//! Each function writes a value using one fixed identity (factorials,
//! limits, Euler's identity, series). Values `0` and `1` usually get a
//! canonical closed form; larger values go through a parametrized formula
//! whose coefficient can be disguised through the oracle.

use crate::oracle::disguise;
use crate::random::{pick, RandomSource};

/// `n!` as either `\Gamma(n+1)` (when enabled, half the time) or a product.
pub fn factorial(k: u32, gamma_function: bool, rng: &mut dyn RandomSource) -> String {
    if gamma_function && rng.chance(0.5) {
        format!("{{\\Gamma ({})}}", k + 1)
    } else {
        format!("{{\\prod_{{k=1}}^{{{k}}} k}}")
    }
}

/// `2^k` as the row sum of Pascal's triangle.
pub fn pow2_choose(k: u32, number_theory: bool, rng: &mut dyn RandomSource) -> String {
    let upper = disguise(u64::from(k), number_theory, rng);
    format!("{{\\sum_{{k=0}}^{{{upper}}} {{{k} \\choose k}}}}")
}

pub fn limit_natural_log(n: u64, number_theory: bool, rng: &mut dyn RandomSource) -> String {
    match n {
        0 => "{\\lim_{x \\to \\infty}{ \\frac{\\ln(x)}{x} }}".to_string(),
        1 => "{\\lim_{x \\to 1} {\\frac{\\ln(x)}{x - 1}}}".to_string(),
        _ => {
            let c = disguise(n, number_theory, rng);
            format!("{{\\lim_{{x \\to 0}}{{ \\frac{{-\\ln(1 + {c}(e^{{-x}} - 1))}}{{x}} }}}}")
        }
    }
}

pub fn limit_exponential(n: u64, number_theory: bool, rng: &mut dyn RandomSource) -> String {
    match n {
        0 => "{\\lim_{x \\to \\infty}{xe^{-x}}}".to_string(),
        1 => "{\\lim_{x \\to 0}{ \\frac{e^x - 1}{x} }}".to_string(),
        _ => {
            let c = disguise(n, number_theory, rng);
            format!("{{\\lim_{{x \\to 0}}{{ \\frac{{e^{{{c}x}} - 1}}{{x}} }}}}")
        }
    }
}

/// Ratio of two polynomials of equal degree whose leading coefficients
/// divide to `n`. The lower-order terms vanish as `x -> \infty`, so they
/// are random.
pub fn limit_polynomial(n: u64, rng: &mut dyn RandomSource) -> String {
    match n {
        0 => {
            let r = rng.range(0, 19);
            format!("{{\\lim_{{x \\to \\infty}}{{{r}x^{{-1}}}}}}")
        }
        1 => "{\\lim_{x \\to \\infty}{x^{1/x}}}".to_string(),
        _ => {
            let m = rng.range(1, 5);
            let (m, scaled) = match n.checked_mul(m) {
                Some(scaled) => (m, scaled),
                None => (1, n),
            };
            let highest_power = rng.range(2, 4);
            let numerator = polynomial(scaled, highest_power, rng);
            let denominator = polynomial(m, highest_power, rng);
            format!("{{ \\lim_{{x \\to \\infty}} {{ \\frac{{{numerator}}}{{{denominator}}}}} }}")
        }
    }
}

fn polynomial(leading: u64, degree: u64, rng: &mut dyn RandomSource) -> String {
    let mut out = format!("{leading}x^{{{degree}}} ");
    for power in (1..degree).rev() {
        let coef = rng.range(2, 11);
        let exponent = if power < 2 {
            String::new()
        } else {
            format!("^{{{power}}}")
        };
        let sign = pick(rng, &['-', '+']).copied().unwrap_or('+');
        out.push_str(&format!("{sign} {coef}x{exponent} "));
    }
    out
}

/// `e^{\pi i} = -1`.
pub fn eulers_identity(n: u64) -> String {
    if n == 0 {
        "{(e^{\\pi i} + 1)}".to_string()
    } else {
        format!("{{-{n}e^{{\\pi i}}}}")
    }
}

pub fn infinite_geometric_series(
    n: u64,
    number_theory: bool,
    rng: &mut dyn RandomSource,
) -> String {
    match n {
        // sines over one full period cancel
        0 => {
            let r = rng.range(3, 12);
            format!(
                "{{\\sum\\limits_{{k=0}}^{{{}}} {{\\sin \\left({{ \\frac{{2 \\pi k}}{{{r}}} }} \\right)}}}}",
                r - 1
            )
        }
        // residue of zeta at its pole
        1 => "{\\lim_{\\epsilon \\to 0}{ \\epsilon \\zeta(1 + \\epsilon) }}".to_string(),
        // sum of ((n-1)/n)^k is 1 / (1 - (n-1)/n) = n
        _ => {
            let num = disguise(n - 1, number_theory, rng);
            let den = disguise(n, number_theory, rng);
            format!(
                "{{\\sum\\limits_{{k=0}}^\\infty {{\\left({{\\frac{{{num}}}{{{den}}}}}\\right)^{{k}}}}}}"
            )
        }
    }
}

/// Multiplies or divides by `\cos^2x + \sin^2x` a quarter of the time each.
/// `None` means the expression is left unchanged.
pub fn trig_identity(expression: &str, rng: &mut dyn RandomSource) -> Option<String> {
    let v = rng.next_f64();
    if v < 0.25 {
        Some(format!(
            "\\left(\\frac{{{expression}}}{{(\\cos^2x + \\sin^2x)}}\\right)"
        ))
    } else if v < 0.5 {
        Some(format!(
            "\\left({{{expression} \\times (\\cos^2x + \\sin^2x)}}\\right)"
        ))
    } else {
        None
    }
}

/// `\lim_{x \to n \mp r} (x^2 - r^2) / (x \mp r)`, which is `x \pm r` at the
/// limit point.
pub fn lim_diff_two_squares(n: u64, rng: &mut dyn RandomSource) -> String {
    let r = rng.range(1, 10);
    let square = r * r;
    let n = i128::from(n);
    let r_wide = i128::from(r);
    if rng.chance(0.5) {
        format!(
            "{{\\lim_{{x \\to {}}} \\frac{{x^2 - {square}}}{{x - {r}}}}}",
            n - r_wide
        )
    } else {
        format!(
            "{{\\lim_{{x \\to {}}} \\frac{{x^2 - {square}}}{{x + {r}}}}}",
            n + r_wide
        )
    }
}

/// The literal decimal form, rendered by [`Operation::identity`].
///
/// [`Operation::identity`]: crate::operation::Operation::identity
pub fn same_number(n: u64) -> String {
    n.to_string()
}
