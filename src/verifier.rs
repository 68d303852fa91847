//! Share verification (component C6).
//!
//! Pure: recomputes the Fiat–Shamir challenge from the share's own
//! transcript and accepts iff it matches the challenge carried in the
//! share. Has no side effects; inserting an accepted share into a
//! participant's `known_shares` is the caller's job (`Session::receive_share`).

use crate::bigint::mod_exp_signed;
use crate::hash::{fiat_shamir_challenge, hash_to_int};
use crate::share::SignatureShare;
use num_bigint::{BigInt, BigUint};

/// Verifies a signature share's NIZK proof.
///
/// # Arguments
///
/// * `n` - The RSA modulus.
/// * `v` - The session's group generator.
/// * `delta` - `l!`.
/// * `vk_i` - The share producer's published verification key.
/// * `msg` - The message the share is claimed to sign.
/// * `share` - The share to verify.
///
/// # Returns
///
/// `true` if the recomputed challenge matches `share.c`. Returns `false`
/// on any arithmetic inconsistency (including a negative exponent whose
/// base has no modular inverse, which cannot occur for a well-formed
/// `n`, `v`, `vk_i` but is handled rather than panicking).
pub fn verify_share(
    n: &BigUint,
    v: &BigUint,
    delta: &BigUint,
    vk_i: &BigUint,
    msg: &[u8],
    share: &SignatureShare,
) -> bool {
    let x = hash_to_int(msg);
    let two_delta = BigUint::from(2u32) * delta;
    let four_delta = &two_delta * 2u32;
    let x_tilde = x.modpow(&four_delta, n);

    let neg_c = -BigInt::from(share.c.clone());
    let neg_2c = &neg_c * 2;

    let v_pow_z = v.modpow(&share.z, n);
    let vk_pow_neg_c = match mod_exp_signed(vk_i, &neg_c, n) {
        Some(val) => val,
        None => return false,
    };
    let v_prime = (&v_pow_z * &vk_pow_neg_c) % n;

    let x_tilde_pow_z = x_tilde.modpow(&share.z, n);
    let xi_pow_neg_2c = match mod_exp_signed(&share.xi, &neg_2c, n) {
        Some(val) => val,
        None => return false,
    };
    let x_prime = (&x_tilde_pow_z * &xi_pow_neg_2c) % n;

    let xi_squared = share.xi.modpow(&BigUint::from(2u32), n);

    let c_prime = fiat_shamir_challenge(v, &x_tilde, vk_i, &xi_squared, &v_prime, &x_prime);
    c_prime == share.c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::generate_random_quadratic;
    use crate::signer::sign_share;

    fn toy_params() -> (BigUint, BigUint, BigUint) {
        let (n, m) = crate::primes::generate_safe_prime_pair(64).unwrap();
        let v = generate_random_quadratic(&n);
        (n, v, m)
    }

    #[test]
    fn honest_share_verifies() {
        let (n, v, m) = toy_params();
        let delta = BigUint::from(24u32);
        let secret_share = BigUint::from(777u32) % &m;
        let vk_i = v.modpow(&secret_share, &n);

        let share = sign_share(&n, &v, &delta, &vk_i, &secret_share, 2, b"msg");
        assert!(verify_share(&n, &v, &delta, &vk_i, b"msg", &share));
    }

    #[test]
    fn tampered_z_fails_verification() {
        let (n, v, m) = toy_params();
        let delta = BigUint::from(24u32);
        let secret_share = BigUint::from(777u32) % &m;
        let vk_i = v.modpow(&secret_share, &n);

        let mut share = sign_share(&n, &v, &delta, &vk_i, &secret_share, 2, b"msg");
        share.z += 1u32;
        assert!(!verify_share(&n, &v, &delta, &vk_i, b"msg", &share));
    }

    #[test]
    fn tampered_c_fails_verification() {
        let (n, v, m) = toy_params();
        let delta = BigUint::from(24u32);
        let secret_share = BigUint::from(777u32) % &m;
        let vk_i = v.modpow(&secret_share, &n);

        let mut share = sign_share(&n, &v, &delta, &vk_i, &secret_share, 2, b"msg");
        share.c += 1u32;
        assert!(!verify_share(&n, &v, &delta, &vk_i, b"msg", &share));
    }

    #[test]
    fn wrong_message_fails_verification() {
        let (n, v, m) = toy_params();
        let delta = BigUint::from(24u32);
        let secret_share = BigUint::from(777u32) % &m;
        let vk_i = v.modpow(&secret_share, &n);

        let share = sign_share(&n, &v, &delta, &vk_i, &secret_share, 2, b"msg");
        assert!(!verify_share(&n, &v, &delta, &vk_i, b"different msg", &share));
    }
}
