//! Share combination: Lagrange-in-exponent over k shares, finished via
//! Shoup's e-th root extraction trick (component C7).

use crate::bigint::mod_exp_signed;
use crate::error::{Error, Result};
use crate::hash::hash_to_int;
use crate::share::SignatureShare;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Combines shares into a full RSA signature.
///
/// Selects the `k` smallest ids present, per the scheme's recommended
/// deterministic policy. The underlying Lagrange-interpolation identity
/// guarantees that *any* k valid shares recombine to the same signature
/// `y` regardless of which ids are chosen; picking deterministically just
/// makes `Session::combine` reproducible across callers holding different
/// (but equally valid) subsets of shares.
///
/// # Arguments
///
/// * `n` - The RSA modulus.
/// * `e` - The public exponent.
/// * `k` - The signing threshold.
/// * `delta` - `l!`.
/// * `bezout_a` - Bézout coefficient for `4*delta^2` in `4*delta^2*a + e*b = 1`.
/// * `bezout_b` - Bézout coefficient for `e` in the same identity.
/// * `msg` - The signed message.
/// * `shares` - The candidate shares, keyed by participant id.
///
/// # Returns
///
/// The combined RSA signature `y` with `y^e ≡ H(msg) (mod n)`, or an
/// error if there were too few shares or the result failed its sanity
/// check.
pub fn combine(
    n: &BigUint,
    e: &BigUint,
    k: usize,
    delta: &BigUint,
    bezout_a: &BigInt,
    bezout_b: &BigInt,
    msg: &[u8],
    shares: &HashMap<usize, SignatureShare>,
) -> Result<BigUint> {
    if shares.len() < k {
        return Err(Error::InsufficientShares {
            required: k,
            available: shares.len(),
        });
    }

    let mut ids: Vec<usize> = shares.keys().copied().collect();
    ids.sort_unstable();
    ids.truncate(k);

    let x = hash_to_int(msg);
    let delta_signed = BigInt::from(delta.clone());

    let mut w = BigUint::one();
    for &i in &ids {
        let lambda = lagrange_coefficient(&delta_signed, &ids, i);
        let xi = &shares[&i].xi;
        let term = mod_exp_signed(xi, &lambda, n).ok_or(Error::CombineFailed)?;
        w = (&w * &term) % n;
    }
    w = w.modpow(&BigUint::from(2u32), n);

    let w_pow_a = mod_exp_signed(&w, bezout_a, n).ok_or(Error::CombineFailed)?;
    let x_pow_b = mod_exp_signed(&x, bezout_b, n).ok_or(Error::CombineFailed)?;
    let y = (&w_pow_a * &x_pow_b) % n;

    if y.modpow(e, n) != x {
        warn!("combine produced a signature failing the e-th power check");
        return Err(Error::CombineFailed);
    }

    debug!(ids = ?ids, "combined signature from shares");
    Ok(y)
}

/// Computes a scaled Lagrange coefficient for interpolation at zero.
///
/// The division is exact: `Δ = l!` absorbs any denominator, because every
/// factor `(i-j)` with `i, j ∈ 1..=l` has absolute value at most `l`.
///
/// # Arguments
///
/// * `delta` - `l!`, the scaling factor.
/// * `ids` - The participant ids being interpolated over.
/// * `i` - The id to compute the coefficient for; must be a member of `ids`.
///
/// # Returns
///
/// `λ_{0,i} = Δ · ∏_{j≠i}(-j) / ∏_{j≠i}(i-j)`, computed over the integers.
fn lagrange_coefficient(delta: &BigInt, ids: &[usize], i: usize) -> BigInt {
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();
    let i_signed = BigInt::from(i as i64);
    for &j in ids {
        if j == i {
            continue;
        }
        let j_signed = BigInt::from(j as i64);
        numerator *= -&j_signed;
        denominator *= &i_signed - &j_signed;
    }
    delta * numerator / denominator
}

/// Verifies a combined RSA signature.
///
/// # Arguments
///
/// * `n` - The RSA modulus.
/// * `e` - The public exponent.
/// * `msg` - The signed message.
/// * `signature` - The candidate signature.
///
/// # Returns
///
/// `true` if `signature^e ≡ H(msg) (mod n)`, `false` otherwise.
pub fn verify_signature(n: &BigUint, e: &BigUint, msg: &[u8], signature: &BigUint) -> bool {
    signature.modpow(e, n) == hash_to_int(msg)
}
