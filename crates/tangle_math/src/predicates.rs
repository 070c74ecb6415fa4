//! Integer classifiers that drive rule eligibility.
//!
//! Everything here is pure and input-only. Square roots go through
//! [`num_integer::Roots`] so large inputs never touch floating point, and
//! primality and factoring stay fast across the whole `u64` range.

use num_integer::Roots;

/// Bases that make Miller-Rabin exact for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Factors below this are stripped by trial division before Pollard's rho.
const TRIAL_LIMIT: u64 = 1_000;

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin primality test. `2` is prime, `0` and `1` are
/// not.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// A non-trivial factor of `n`, which must be an odd composite.
fn pollard_rho(n: u64) -> u64 {
    let mut c: u64 = 1;
    loop {
        let step = |x: u64| ((x as u128 * x as u128 + c as u128) % n as u128) as u64;
        let (mut x, mut y, mut d) = (2u64, 2u64, 1u64);
        while d == 1 {
            x = step(x);
            y = step(step(y));
            d = gcd(x.abs_diff(y), n);
        }
        if d != n {
            return d;
        }
        c += 1;
    }
}

fn split_prime_factors(n: u64, out: &mut Vec<u64>) {
    if n == 1 {
        return;
    }
    if is_prime(n) {
        out.push(n);
        return;
    }
    let d = pollard_rho(n);
    split_prime_factors(d, out);
    split_prime_factors(n / d, out);
}

/// `floor(sqrt(n))`, exact for every `u64`.
#[inline]
pub fn integer_sqrt(n: u64) -> u64 {
    Roots::sqrt(&n)
}

/// True iff `n` has an exact integer square root.
pub fn is_square(n: u64) -> bool {
    let r = integer_sqrt(n);
    r * r == n
}

#[inline]
pub fn is_odd(n: u64) -> bool {
    n % 2 != 0
}

/// Powers of two starting at `2` (so `1 = 2^0` is excluded).
#[inline]
pub fn is_pow2(n: u64) -> bool {
    n >= 2 && n.is_power_of_two()
}

/// Inverse factorial restricted to the small factorials that show up as
/// sub-values: returns `k` with `k! == n` for `k` in `2..=6`.
pub fn is_factorial(n: u64) -> Option<u32> {
    match n {
        2 => Some(2),
        6 => Some(3),
        24 => Some(4),
        120 => Some(5),
        720 => Some(6),
        _ => None,
    }
}

/// All divisors of `n` in ascending order.
///
/// `0` divides only `0`, so `factors(0)` is the degenerate `[0]`.
pub fn factors(n: u64) -> Vec<u64> {
    if n == 0 {
        return vec![0];
    }
    let mut low = Vec::new();
    let mut high = Vec::new();
    let limit = Roots::sqrt(&n);
    for i in 1..=limit {
        if n % i == 0 {
            low.push(i);
            if i != n / i {
                high.push(n / i);
            }
        }
    }
    low.extend(high.into_iter().rev());
    low
}

/// Prime factorization with multiplicity, ascending (`12 -> [2, 2, 3]`).
/// `0` and `1` have no prime factors.
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }
    let mut p = 2;
    while p < TRIAL_LIMIT && p * p <= n {
        while n % p == 0 {
            out.push(p);
            n /= p;
        }
        p += if p == 2 { 1 } else { 2 };
    }
    split_prime_factors(n, &mut out);
    out.sort_unstable();
    out
}

/// Prime factorization grouped into `(prime, exponent)` pairs.
pub fn prime_powers(n: u64) -> Vec<(u64, u32)> {
    let mut grouped: Vec<(u64, u32)> = Vec::new();
    for p in prime_factors(n) {
        match grouped.last_mut() {
            Some((q, e)) if *q == p => *e += 1,
            _ => grouped.push((p, 1)),
        }
    }
    grouped
}

/// Euclid's algorithm. `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple; `lcm(0, x) == 0`.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Largest `k` with `base^k <= n`. Requires `base >= 2` and `n >= 1`.
pub fn floor_log(n: u64, base: u64) -> u32 {
    debug_assert!(base >= 2 && n >= 1);
    let mut k = 0;
    let mut p: u64 = 1;
    while let Some(next) = p.checked_mul(base) {
        if next > n {
            break;
        }
        p = next;
        k += 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sieve(limit: usize) -> Vec<bool> {
        let mut is_p = vec![true; limit + 1];
        is_p[0] = false;
        if limit >= 1 {
            is_p[1] = false;
        }
        let mut p = 2;
        while p * p <= limit {
            if is_p[p] {
                let mut m = p * p;
                while m <= limit {
                    is_p[m] = false;
                    m += p;
                }
            }
            p += 1;
        }
        is_p
    }

    #[test]
    fn is_prime_matches_sieve_up_to_1000() {
        let reference = sieve(1000);
        for n in 0..=1000u64 {
            assert_eq!(is_prime(n), reference[n as usize], "n = {n}");
        }
    }

    #[test]
    fn two_is_prime_and_small_edges_are_not() {
        assert!(is_prime(2));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(9));
        assert!(is_prime(997));
    }

    #[test]
    fn is_prime_is_exact_near_u64_max() {
        assert!(is_prime(18_446_744_073_709_551_557));
        assert!(!is_prime(u64::MAX));
        // strong pseudoprime to bases 2 through 11
        assert!(!is_prime(2_152_302_898_747));
        assert!(!is_prime(4_294_967_291 * 4_294_967_279));
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn prime_factors_split_large_semiprimes() {
        assert_eq!(
            prime_factors(4_294_967_291 * 4_294_967_279),
            vec![4_294_967_279, 4_294_967_291]
        );
        assert_eq!(prime_factors(1_000_003 * 1_000_003), vec![1_000_003, 1_000_003]);
        assert_eq!(prime_factors(1 << 40), vec![2; 40]);
        assert_eq!(
            prime_powers(999_983 * 999_979 * 8),
            vec![(2, 3), (999_979, 1), (999_983, 1)]
        );
    }

    #[test]
    fn is_square_handles_large_values_exactly() {
        let r: u64 = 4_294_967_295;
        assert!(is_square(r * r));
        assert!(!is_square(r * r - 1));
        assert!(!is_square(r * r + 1));
        assert!(is_square(0));
        assert!(is_square(1));
    }

    #[test]
    fn is_pow2_excludes_one() {
        assert!(!is_pow2(0));
        assert!(!is_pow2(1));
        assert!(is_pow2(2));
        assert!(is_pow2(1024));
        assert!(!is_pow2(1000));
    }

    #[test]
    fn is_factorial_lookup_is_fixed() {
        assert_eq!(is_factorial(6), Some(3));
        assert_eq!(is_factorial(720), Some(6));
        assert_eq!(is_factorial(1), None);
        assert_eq!(is_factorial(5040), None);
    }

    #[test]
    fn factors_of_zero_is_degenerate() {
        assert_eq!(factors(0), vec![0]);
        assert_eq!(factors(1), vec![1]);
        assert_eq!(factors(36), vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
    }

    #[test]
    fn prime_factors_with_multiplicity() {
        assert_eq!(prime_factors(12), vec![2, 2, 3]);
        assert_eq!(prime_factors(997), vec![997]);
        assert!(prime_factors(1).is_empty());
        assert_eq!(prime_powers(360), vec![(2, 3), (3, 2), (5, 1)]);
    }

    #[test]
    fn floor_log_boundaries() {
        assert_eq!(floor_log(1, 6), 0);
        assert_eq!(floor_log(6, 6), 1);
        assert_eq!(floor_log(35, 6), 1);
        assert_eq!(floor_log(36, 6), 2);
        assert_eq!(floor_log(u64::MAX, 2), 63);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn square_odd_pow2_match_brute_force(n in 0u64..5000) {
            let brute_square = (0..=n).any(|r| r * r == n);
            prop_assert_eq!(is_square(n), brute_square);
            prop_assert_eq!(is_odd(n), n % 2 == 1);
            let brute_pow2 = (1..13).any(|k| 1u64 << k == n);
            prop_assert_eq!(is_pow2(n), brute_pow2);
        }

        #[test]
        fn factors_match_brute_force(n in 1u64..3000) {
            let brute: Vec<u64> = (1..=n).filter(|i| n % i == 0).collect();
            prop_assert_eq!(factors(n), brute);
        }

        #[test]
        fn is_prime_agrees_with_trial_division(n in 0u64..2_000_000) {
            let brute = n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0);
            prop_assert_eq!(is_prime(n), brute);
        }

        #[test]
        fn prime_factors_multiply_back(n in 2u64..100_000) {
            let fs = prime_factors(n);
            prop_assert_eq!(fs.iter().product::<u64>(), n);
            prop_assert!(fs.iter().all(|&p| is_prime(p)));
            prop_assert!(fs.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn gcd_and_lcm_match_num_integer(a in 0u64..10_000, b in 0u64..10_000) {
            prop_assert_eq!(gcd(a, b), num_integer::Integer::gcd(&a, &b));
            prop_assert_eq!(lcm(a, b), num_integer::Integer::lcm(&a, &b));
        }
    }
}
