use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TangleError {
    #[error("invalid input '{0}': expected a non-negative integer")]
    InvalidInput(String),
    #[error("{value} is out of range (maximum {limit})")]
    OutOfRange { value: u64, limit: u64 },
    /// The fallback rule covers every target, so reaching this is a bug in
    /// some rule's precondition.
    #[error("no decomposition rule is eligible for {0}")]
    NoEligibleRule(u64),
    #[error("unbalanced braces in generated LaTeX at byte {position}")]
    UnbalancedLatex { position: usize },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Invariant check: `debug_assert!` in debug builds, `TangleError::Internal`
/// in release.
#[macro_export]
macro_rules! ensure_invariant {
    ($cond:expr, $msg:literal $(, $args:expr)* $(,)?) => {
        if cfg!(debug_assertions) {
            debug_assert!($cond, $msg $(, $args)*);
        }
        if !$cond {
            return Err($crate::error::TangleError::Internal(format!($msg $(, $args)*)));
        }
    };
}
