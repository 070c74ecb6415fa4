//! Pure integer helpers shared by the decomposition engine.
//!
//! [`predicates`] classifies targets for rule eligibility; [`number_theory`]
//! owns the precomputed totient and prime-counting tables.

pub mod number_theory;
pub mod predicates;

pub use number_theory::{
    euler_phi, prime_count, prime_count_preimages, prime_sieve, totient_preimages, ORACLE_LIMIT,
};
pub use predicates::{
    factors, floor_log, gcd, integer_sqrt, is_factorial, is_odd, is_pow2, is_prime, is_square, lcm,
    prime_factors, prime_powers,
};
