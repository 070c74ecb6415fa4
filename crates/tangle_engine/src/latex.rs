//! LaTeX string helpers and the structural checks applied before output
//! leaves the engine.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TangleError;

/// `{s}`
pub fn braced(s: &str) -> String {
    format!("{{{s}}}")
}

/// `\left(s\right)`
pub fn parens(s: &str) -> String {
    format!("\\left({s}\\right)")
}

/// Display-mode wrapper used when the caller asks for a block equation.
pub fn display_math(s: &str) -> String {
    format!("\\[ {s} \\]")
}

/// Verifies that every `{` is closed, ignoring escaped `\{` and `\}`.
/// On failure reports the byte offset of the first offending brace (or the
/// end of input for an unclosed group).
pub fn check_balanced(latex: &str) -> Result<(), TangleError> {
    let mut open: Vec<usize> = Vec::new();
    let mut escaped = false;
    for (i, ch) in latex.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => open.push(i),
            '}' => {
                if open.pop().is_none() {
                    return Err(TangleError::UnbalancedLatex { position: i });
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(&position) => Err(TangleError::UnbalancedLatex { position }),
        None => Ok(()),
    }
}

pub fn is_balanced(latex: &str) -> bool {
    check_balanced(latex).is_ok()
}

/// Collapses whitespace runs to a single space and trims the ends.
pub fn tidy(latex: &str) -> String {
    static RE_WS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("valid regex literal"));
    RE_WS.replace_all(latex.trim(), " ").into_owned()
}
