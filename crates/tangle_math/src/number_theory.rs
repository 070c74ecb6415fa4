//! Totient and prime-counting tables backing the disguise oracle.
//!
//! Both tables cover `0..=ORACLE_LIMIT`, are built once on first use and
//! are read-only afterwards, so concurrent readers need no locking.

use std::sync::LazyLock;

use crate::predicates::prime_powers;

/// Upper end of the preimage search range.
pub const ORACLE_LIMIT: u64 = 999;

static PRIMES: LazyLock<Vec<u64>> = LazyLock::new(|| prime_sieve(ORACLE_LIMIT));

static TOTIENTS: LazyLock<Vec<u64>> = LazyLock::new(|| totient_table(ORACLE_LIMIT));

/// Sieve of Eratosthenes: every prime `<= limit`, ascending.
pub fn prime_sieve(limit: u64) -> Vec<u64> {
    let limit = limit as usize;
    let mut marks = vec![true; limit + 1];
    marks[0] = false;
    if limit >= 1 {
        marks[1] = false;
    }
    let mut p = 2;
    while p * p <= limit {
        if marks[p] {
            for m in (p * p..=limit).step_by(p) {
                marks[m] = false;
            }
        }
        p += 1;
    }
    marks
        .iter()
        .enumerate()
        .filter_map(|(i, &is_p)| is_p.then_some(i as u64))
        .collect()
}

/// `phi[i]` for every `i` in `0..=limit`, computed by the product formula
/// over a sieve. `phi[0]` is `0`.
fn totient_table(limit: u64) -> Vec<u64> {
    let limit = limit as usize;
    let mut phi: Vec<u64> = (0..=limit as u64).collect();
    for p in 2..=limit {
        // untouched entries are prime
        if phi[p] == p as u64 {
            for m in (p..=limit).step_by(p) {
                phi[m] -= phi[m] / p as u64;
            }
        }
    }
    phi
}

/// Euler's totient: the count of `1..=n` coprime to `n`. Inputs past the
/// table go through the product formula over the prime factorization.
pub fn euler_phi(n: u64) -> u64 {
    if n <= ORACLE_LIMIT {
        return TOTIENTS[n as usize];
    }
    prime_powers(n)
        .into_iter()
        .map(|(p, e)| p.pow(e - 1) * (p - 1))
        .product()
}

/// The prime-counting function `pi(n)`, tabulated only up to
/// [`ORACLE_LIMIT`].
pub fn prime_count(n: u64) -> Option<u64> {
    (n <= ORACLE_LIMIT).then(|| PRIMES.partition_point(|&p| p <= n) as u64)
}

/// Every `x` in `1..=ORACLE_LIMIT` with `phi(x) == n`.
pub fn totient_preimages(n: u64) -> Vec<u64> {
    (1..=ORACLE_LIMIT)
        .filter(|&x| TOTIENTS[x as usize] == n)
        .collect()
}

/// Every `y` in `1..=ORACLE_LIMIT` with `pi(y) == n`.
pub fn prime_count_preimages(n: u64) -> Vec<u64> {
    (1..=ORACLE_LIMIT)
        .filter(|&y| prime_count(y) == Some(n))
        .collect()
}
