//! Number-theoretic helpers over `u64` with `u128` intermediates
//!
//! These are the classical collaborators of the solvers. Order finding and
//! factoring sit behind [`GroupOracle`] so a different implementation can be
//! swapped in without touching circuit synthesis.

use num_integer::Integer;

/// Greatest common divisor
#[inline]
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// Extended GCD: returns `(g, x, y)` with `a*x + b*y = g`
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);
    while r != 0 {
        let q = old_r.div_euclid(r);
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    if old_r < 0 {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Modular inverse `a^-1 mod n`, or `None` when `gcd(a, n) != 1`
pub fn mod_inverse(a: u64, n: u64) -> Option<u64> {
    if n == 0 {
        return None;
    }
    let (g, x, _) = extended_gcd(a as i128, n as i128);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(n as i128) as u64)
}

/// `a * b mod n` without overflow
#[inline]
pub fn mod_mul(a: u64, b: u64, n: u64) -> u64 {
    ((a as u128 * b as u128) % n as u128) as u64
}

/// Modular exponentiation: `base^exp mod n` by square-and-multiply
pub fn mod_pow(base: u64, mut exp: u64, n: u64) -> u64 {
    if n == 1 {
        return 0;
    }
    let m = n as u128;
    let mut b = base as u128 % m;
    let mut result = 1u128;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        exp >>= 1;
        b = b * b % m;
    }
    result as u64
}

/// Prime factors of `n` in ascending order, with multiplicity
///
/// Trial division; `0` and `1` have no prime factors.
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    while n % 2 == 0 {
        factors.push(2);
        n /= 2;
    }
    let mut p = 3u64;
    while (p as u128) * (p as u128) <= n as u128 {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += 2;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Euler's totient
pub fn euler_totient(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut factors = prime_factors(n);
    factors.dedup();
    factors.iter().fold(n, |acc, &p| acc / p * (p - 1))
}

/// Multiplicative order of `a` modulo `n`
///
/// Returns `None` when `a` is not invertible modulo `n`. Every residue is
/// congruent to 1 modulo 1, so the order there is 1.
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    if n == 0 || gcd(a, n) != 1 {
        return None;
    }
    if n == 1 {
        return Some(1);
    }
    let mut order = euler_totient(n);
    let mut primes = prime_factors(order);
    primes.dedup();
    for p in primes {
        while order % p == 0 && mod_pow(a, order / p, n) == 1 {
            order /= p;
        }
    }
    Some(order)
}

/// Smallest `w` with `n < 2^w`
#[inline]
pub fn bit_width(n: u64) -> usize {
    (u64::BITS - n.leading_zeros()) as usize
}

/// Smallest `w` with `n <= 2^w`
#[inline]
pub fn ceil_log2(n: u64) -> usize {
    if n <= 1 {
        0
    } else {
        bit_width(n - 1)
    }
}

/// Source of group orders and factorizations for the solvers
///
/// Implementations must be pure: the same inputs always give the same
/// answer.
pub trait GroupOracle {
    /// Multiplicative order of `base` modulo `modulus`, `None` if undefined
    fn order(&self, base: u64, modulus: u64) -> Option<u64>;

    /// Prime factors of `n`, ascending, with multiplicity
    fn factor(&self, n: u64) -> Vec<u64>;
}

/// Trial-division oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalOracle;

impl GroupOracle for ClassicalOracle {
    fn order(&self, base: u64, modulus: u64) -> Option<u64> {
        multiplicative_order(base, modulus)
    }

    fn factor(&self, n: u64) -> Vec<u64> {
        prime_factors(n)
    }
}
