//! Arbitrary-precision integer facade (component C1).
//!
//! Thin wrappers around `num-bigint` for the handful of operations the
//! threshold scheme needs: modular exponentiation with both unsigned and
//! signed exponents, modular inverse, the extended Euclidean algorithm
//! (gcd + Bézout coefficients), and factorial. Kept in one module so every
//! other component goes through the same arithmetic primitives rather than
//! reaching into `num-bigint` directly.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Calculates the modular exponentiation of a base raised to an exponent
/// modulo a modulus.
///
/// # Arguments
///
/// * `base` - The base of the exponentiation.
/// * `exponent` - The exponent.
/// * `modulus` - The modulus.
///
/// # Returns
///
/// The result of the modular exponentiation as a `BigUint`.
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// `base^exponent mod modulus` for a possibly-negative `exponent`.
///
/// A negative exponent is realized by inverting `base` modulo `modulus`
/// first and raising the inverse to the exponent's absolute value — never
/// via a library-level signed `modpow`.
///
/// # Arguments
///
/// * `base` - The base of the exponentiation.
/// * `exponent` - The (possibly negative) exponent.
/// * `modulus` - The modulus.
///
/// # Returns
///
/// `None` if `base` has no inverse mod `modulus` (i.e.
/// `gcd(base, modulus) != 1`), otherwise `Some` of the result.
pub fn mod_exp_signed(base: &BigUint, exponent: &BigInt, modulus: &BigUint) -> Option<BigUint> {
    match exponent.sign() {
        Sign::Minus => {
            let inv = mod_inverse(base, modulus)?;
            Some(inv.modpow(exponent.magnitude(), modulus))
        }
        _ => Some(base.modpow(exponent.magnitude(), modulus)),
    }
}

/// Extended Euclidean algorithm for computing the greatest common divisor
/// and Bézout coefficients.
///
/// # Arguments
///
/// * `a` - The first integer.
/// * `b` - The second integer.
///
/// # Returns
///
/// A tuple `(g, x, y)` with `g = gcd(a, b)` and `a*x + b*y = g`.
pub fn egcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        (b.clone(), BigInt::zero(), BigInt::one())
    } else {
        let (g, x, y) = egcd(&(b % a), a);
        (g, y - (b / a) * &x, x)
    }
}

/// Computes the modular multiplicative inverse of `a` modulo `m`.
///
/// # Arguments
///
/// * `a` - The number to find the inverse for.
/// * `m` - The modulus.
///
/// # Returns
///
/// `Some` of the inverse if it exists, `None` otherwise.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a_signed = BigInt::from(a.clone());
    let m_signed = BigInt::from(m.clone());
    let (g, x, _) = egcd(&a_signed, &m_signed);
    if g != BigInt::one() {
        return None;
    }
    let x_mod_m = ((x % &m_signed) + &m_signed) % &m_signed;
    x_mod_m.to_biguint()
}

/// `n!` as a `BigUint`. `0! = 1`.
pub fn factorial(n: u64) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
}
