//! Safe-prime and RSA key generation (component C2).

use crate::bigint::mod_inverse;
use crate::error::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_prime::nt_funcs::is_prime;
use num_prime::{Primality, PrimalityTestConfig, RandPrime};
use num_traits::One;
use rand::thread_rng;
use tracing::{debug, trace};

/// Public RSA exponent, fixed per the scheme.
pub const PUBLIC_EXPONENT: u32 = 65537;

fn probably_prime(candidate: &BigUint) -> bool {
    // num_prime's default config already exceeds the scheme's floor of 8
    // Miller-Rabin rounds.
    let primality = is_prime(candidate, Some(PrimalityTestConfig::default()));
    primality == Primality::Yes || primality.probably()
}

/// Samples a safe prime `p = 2p' + 1` of the requested bit length, where
/// both `p` and `p'` are prime.
///
/// # Arguments
///
/// * `bits` - The bit length of `p'`; `p` ends up one bit longer.
///
/// # Returns
///
/// The pair `(p, p')`.
fn generate_safe_prime(bits: usize) -> (BigUint, BigUint) {
    let mut rng = thread_rng();
    let config = PrimalityTestConfig::default();
    loop {
        let p_prime: BigUint = rng.gen_prime(bits, Some(config));
        let p = &p_prime * 2u32 + BigUint::one();
        if probably_prime(&p) {
            trace!(bits, "found safe prime candidate");
            return (p, p_prime);
        }
    }
}

/// Generates the safe-prime RSA modulus `n = p*q` and the Shamir field
/// modulus `m = p'*q'`, where `p = 2p'+1`, `q = 2q'+1`.
///
/// # Arguments
///
/// * `bits` - The bit length of each of `p` and `q`, so `n` has
///   approximately `2*bits` bits.
///
/// # Returns
///
/// The pair `(n, m)`, or an error if `bits` is too small to admit a safe
/// prime.
pub fn generate_safe_prime_pair(bits: usize) -> Result<(BigUint, BigUint)> {
    if bits < 2 {
        return Err(Error::InvalidParameters(
            "safe-prime bit length must be at least 2".into(),
        ));
    }
    let (p, p_prime) = generate_safe_prime(bits);
    let (q, q_prime) = generate_safe_prime(bits);
    let n = &p * &q;
    let m = &p_prime * &q_prime;
    debug!(n_bits = n.bits(), "generated safe-prime RSA modulus");
    Ok((n, m))
}

/// Generates a full RSA keypair over a safe-prime modulus.
///
/// `e` is fixed at 65537. `d = e^-1 mod m` must exist because `m = p'q'`
/// and `e` is prime with `e > l` (callers are expected to choose
/// `keysize` large enough that `p', q' > e`, which `Session::setup`
/// enforces).
///
/// # Arguments
///
/// * `keysize` - The bit length of `n`; each of the two safe primes is
///   generated with `keysize/2` bits.
///
/// # Returns
///
/// The tuple `(n, e, d, m)`, or an error if `keysize` is too small or `e`
/// happens to have no inverse mod `m`.
pub fn generate_rsa_key(keysize: usize) -> Result<(BigUint, BigUint, BigUint, BigUint)> {
    if keysize < 512 {
        return Err(Error::InvalidParameters(format!(
            "keysize must be at least 512 bits, got {keysize}"
        )));
    }
    let (n, m) = generate_safe_prime_pair(keysize / 2)?;
    let e = BigUint::from(PUBLIC_EXPONENT);
    let d = mod_inverse(&e, &m).ok_or_else(|| {
        Error::InvalidParameters(
            "public exponent has no inverse mod m; choose a larger keysize".into(),
        )
    })?;
    Ok((n, e, d, m))
}

/// Samples a quasi-uniform generator of `Q_n`, the cyclic subgroup of
/// quadratic residues mod `n`.
///
/// This is the corrected sampling variant (`r < n`, reduced mod `n`); the
/// alternative `r < sqrt(n)` without reduction that appears in one
/// reference branch is not used here.
///
/// # Arguments
///
/// * `n` - The RSA modulus.
///
/// # Returns
///
/// A `BigUint` in `Q_n`, computed as `r^2 mod n` for `r` drawn uniformly
/// from `[0, n)`.
pub fn generate_random_quadratic(n: &BigUint) -> BigUint {
    let mut rng = thread_rng();
    let r = rng.gen_biguint_range(&BigUint::from(0u32), n);
    (&r * &r) % n
}
