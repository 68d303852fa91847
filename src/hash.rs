//! Hash-to-integer and Fiat–Shamir transcript hashing.
//!
//! Two distinct uses of SHA-256 appear in the scheme: hashing the signed
//! message into a big integer (`x = H(msg)`, used directly, never reduced
//! mod n), and hashing the six-value NIZK transcript into the Fiat–Shamir
//! challenge `c`. The transcript framing below is the wire format — any
//! deviation breaks interoperability with the reference construction.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Hashes a message into a big integer.
///
/// # Arguments
///
/// * `msg` - The message to hash.
///
/// # Returns
///
/// `x = int(SHA-256(msg))`, big-endian unsigned. Not reduced mod any
/// modulus — `x` may exceed `n`.
pub fn hash_to_int(msg: &[u8]) -> BigUint {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    BigUint::from_bytes_be(&hasher.finalize())
}

/// Hex-encoded SHA-256 digest of `msg`, used only to identify a message in
/// error messages and logs — never as cryptographic material.
pub fn message_digest_hex(msg: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Computes the Fiat–Shamir challenge `c = H(v‖x̃‖vk_i‖xi²‖v′‖x′)`.
///
/// Each value is rendered as its ASCII decimal representation; the six
/// fields are joined with `"|"` and hashed with SHA-256. This exact
/// framing is the wire format for the NIZK proof transcript.
///
/// # Arguments
///
/// * `v` - The session's group generator.
/// * `x_tilde` - `x^(4*delta) mod n`.
/// * `vk_i` - The signer's verification key.
/// * `xi_squared` - The signer's raw share squared, mod `n`.
/// * `v_prime` - The proof's first commitment.
/// * `x_prime` - The proof's second commitment.
///
/// # Returns
///
/// The challenge `c` as a `BigUint`.
#[allow(clippy::too_many_arguments)]
pub fn fiat_shamir_challenge(
    v: &BigUint,
    x_tilde: &BigUint,
    vk_i: &BigUint,
    xi_squared: &BigUint,
    v_prime: &BigUint,
    x_prime: &BigUint,
) -> BigUint {
    let transcript = format!(
        "{}|{}|{}|{}|{}|{}",
        v, x_tilde, vk_i, xi_squared, v_prime, x_prime
    );
    let mut hasher = Sha256::new();
    hasher.update(transcript.as_bytes());
    BigUint::from_bytes_be(&hasher.finalize())
}
