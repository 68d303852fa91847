//! The signature share produced by a participant, together with its
//! Fiat–Shamir NIZK proof of correctness (component data model, §3).

use num_bigint::BigUint;

/// One participant's contribution towards a combined RSA signature.
///
/// `xi` is the raw signature share `x^{2Δ·s_i} mod n`. `z` and `c` are the
/// Fiat–Shamir proof's response and challenge, proving knowledge of an
/// `s_i` such that `log_x̃(xi²) = log_v(vk_i) = s_i` without revealing
/// `s_i`. Both are non-negative by construction (sums/products of
/// non-negative terms), so `BigUint` suffices — signed arithmetic is only
/// needed internally, in verification and combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureShare {
    pub xi: BigUint,
    pub z: BigUint,
    pub c: BigUint,
    pub id: usize,
}
