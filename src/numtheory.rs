//! Number-theory utilities.
//!
//! Pure, deterministic functions used by every other component to build,
//! validate, and rank candidates. Modular multiplication widens to `u128`
//! so that `modulus²` can never overflow.

/// Greatest common divisor. `gcd(0, 0) == 0` by convention.
pub fn gcd(a: u64, b: u64) -> u64 {
    num_integer::gcd(a, b)
}

/// Modular exponentiation by iterative square-and-multiply.
///
/// `modulus` must be at least 1; `mod_pow(_, _, 1)` is 0. Every
/// multiplication is performed in `u128` and reduced immediately, so the
/// result is exact for any `u64` modulus.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    assert!(modulus >= 1, "modulus must be at least 1");
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result = 1u128;
    let mut b = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        exp >>= 1;
        b = b * b % m;
    }
    result as u64
}

/// Euler's totient `φ(n)` via trial-division factorization up to `√n`.
///
/// Accumulates `n · ∏ (1 - 1/p)` over distinct prime factors, kept in
/// integer arithmetic as `φ ← φ / p · (p - 1)`.
pub fn euler_totient(mut n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut phi = n;
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            while n % p == 0 {
                n /= p;
            }
            phi = phi / p * (p - 1);
        }
        p += 1;
    }
    if n > 1 {
        phi = phi / n * (n - 1);
    }
    phi
}

/// All divisors of `n`, sorted ascending, unique. `divisors(1) == [1]`.
pub fn divisors(n: u64) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    let mut divs = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            divs.push(i);
            if i != n / i {
                divs.push(n / i);
            }
        }
        i += 1;
    }
    divs.sort_unstable();
    divs
}

/// Largest prime factor of `n`; returns 1 for `n <= 1`.
pub fn largest_prime_factor(mut n: u64) -> u64 {
    if n <= 1 {
        return 1;
    }
    let mut largest = 1u64;
    let mut p = 2u64;
    while p * p <= n {
        while n % p == 0 {
            largest = p;
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        largest = n;
    }
    largest
}

/// Multiplicative order of `a` mod `n`: the smallest `r > 0` with
/// `a^r ≡ 1 (mod n)`.
///
/// Searched over ascending divisors of `φ(n)` (Euler's theorem guarantees
/// the order divides the totient). Returns `None` when `gcd(a, n) != 1`,
/// where no order exists.
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    if n < 2 || gcd(a, n) != 1 {
        return None;
    }
    let phi = euler_totient(n);
    divisors(phi).into_iter().find(|&d| mod_pow(a, d, n) == 1)
}
