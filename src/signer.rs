//! Signature share generation with Fiat–Shamir NIZK proof (component C5).

use crate::hash::{fiat_shamir_challenge, hash_to_int, message_digest_hex};
use crate::share::SignatureShare;
use num_bigint::{BigUint, RandBigInt};
use rand::thread_rng;
use tracing::trace;

/// SHA-256 output length in bits, used to size the NIZK security parameter.
const HASH_BITS: u64 = 256;

/// Computes the signing participant's share of `H(msg)^d mod n`, together
/// with the NIZK proof that it was computed correctly.
///
/// The security parameter `L` for the proof's random exponent is sized
/// relative to the actual modulus and hash length
/// (`bitlen(n) + 2*bitlen(hash) + 1`), not hard-coded to a specific key
/// size.
///
/// # Arguments
///
/// * `n` - The RSA modulus.
/// * `v` - The session's group generator.
/// * `delta` - `l!`.
/// * `vk_i` - The signer's published verification key, `v^{secret_share} mod n`.
/// * `secret_share` - The signer's Shamir share of the private exponent `d`.
/// * `id` - The signer's participant id.
/// * `msg` - The message to sign.
///
/// # Returns
///
/// The `SignatureShare` carrying the raw share and its NIZK proof.
pub fn sign_share(
    n: &BigUint,
    v: &BigUint,
    delta: &BigUint,
    vk_i: &BigUint,
    secret_share: &BigUint,
    id: usize,
    msg: &[u8],
) -> SignatureShare {
    let x = hash_to_int(msg);
    let two_delta = BigUint::from(2u32) * delta;
    let four_delta = &two_delta * 2u32;

    let xi_exponent = &two_delta * secret_share;
    let xi = x.modpow(&xi_exponent, n);

    let x_tilde = x.modpow(&four_delta, n);

    let l_bits = n.bits() + 2 * HASH_BITS + 1;
    let mut rng = thread_rng();
    let r = rng.gen_biguint(l_bits);

    let x_prime = x_tilde.modpow(&r, n);
    let v_prime = v.modpow(&r, n);
    let xi_squared = xi.modpow(&BigUint::from(2u32), n);

    let c = fiat_shamir_challenge(v, &x_tilde, vk_i, &xi_squared, &v_prime, &x_prime);
    let z = secret_share * &c + &r;

    trace!(
        id,
        message_digest = %message_digest_hex(msg),
        "produced signature share"
    );

    SignatureShare { xi, z, c, id }
}
