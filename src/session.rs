//! Trusted-dealer setup and session state (components C4, C8).

use crate::bigint::{egcd, factorial};
use crate::combiner;
use crate::error::{Error, Result};
use crate::hash::message_digest_hex;
use crate::polynomial::Polynomial;
use crate::primes::{generate_random_quadratic, generate_rsa_key};
use crate::share::SignatureShare;
use crate::signer;
use crate::verifier;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// A participant's secret share, held as a zeroize-on-drop byte buffer
/// rather than a bare `BigUint` so the backing memory is wiped when the
/// participant (and so the session) is dropped.
#[derive(Clone)]
struct SecretShare(Zeroizing<Vec<u8>>);

impl SecretShare {
    fn new(value: &BigUint) -> Self {
        SecretShare(Zeroizing::new(value.to_bytes_be()))
    }

    fn as_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

/// A single participant's state: its id, its secret Shamir share (never
/// exposed outside this crate), and the signature shares it has collected
/// per message.
pub struct Participant {
    id: usize,
    secret_share: SecretShare,
    /// `known_shares[msg][producer_id] = share`. Each participant owns an
    /// independent set of inner maps — inserting under a missing outer key
    /// always creates a fresh inner map, so no two participants or
    /// messages can ever alias the same inner map.
    known_shares: HashMap<Vec<u8>, HashMap<usize, SignatureShare>>,
}

impl Participant {
    /// This participant's id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Shares collected so far for `msg`, keyed by producing participant id.
    pub fn known_shares_for(&self, msg: &[u8]) -> Option<&HashMap<usize, SignatureShare>> {
        self.known_shares.get(msg)
    }
}

/// Frozen session parameters plus the live participant table.
///
/// Owns its participants (index 0 unused, a sentinel matching
/// `verification_keys[0]`); a `Participant` never holds a back-reference
/// to its `Session` — operations that need session parameters take
/// `&Session` explicitly.
pub struct Session {
    pub l: usize,
    pub k: usize,
    pub n: BigUint,
    pub m: BigUint,
    pub e: BigUint,
    pub delta: BigUint,
    pub v: BigUint,
    /// Length `l+1`; index 0 is an unused sentinel, never read.
    pub verification_keys: Vec<BigUint>,
    bezout_a: BigInt,
    bezout_b: BigInt,
    /// Length `l+1`; index 0 is an unused sentinel.
    participants: Vec<Option<Participant>>,
}

impl Session {
    /// Runs trusted-dealer setup: generates the RSA key, splits `d` via a
    /// random degree-`(k-1)` polynomial over `ℤ/mℤ`, publishes verification
    /// keys, and precomputes the Bézout coefficients the combiner reuses.
    ///
    /// # Arguments
    ///
    /// * `l` - The number of participants the private key is split across.
    /// * `k` - The signing threshold; any `k` of the `l` participants can
    ///   combine a signature.
    /// * `keysize` - The bit length of the RSA modulus `n`.
    ///
    /// # Returns
    ///
    /// The fully initialized `Session`, or an error if `l`, `k`, or
    /// `keysize` are out of range.
    pub fn setup(l: usize, k: usize, keysize: usize) -> Result<Session> {
        if l < 1 {
            return Err(Error::InvalidParameters("l must be at least 1".into()));
        }
        if k < 1 || k > l {
            return Err(Error::InvalidParameters(format!(
                "k must satisfy 1 <= k <= l (k={k}, l={l})"
            )));
        }

        let (n, e, d, m) = generate_rsa_key(keysize)?;

        if e <= BigUint::from(l as u64) {
            return Err(Error::InvalidParameters(
                "keysize too small for this many participants (need e > l)".into(),
            ));
        }

        let poly = Polynomial::new(d, m.clone(), k - 1);
        let shares: Vec<BigUint> = (1..=l).map(|i| poly.evaluate(&BigUint::from(i as u64))).collect();

        let v = generate_random_quadratic(&n);
        let mut verification_keys = vec![BigUint::zero(); l + 1];
        for (idx, share) in shares.iter().enumerate() {
            verification_keys[idx + 1] = v.modpow(share, &n);
        }

        let delta = factorial(l as u64);
        let four_delta_sq = {
            let d = BigInt::from(delta.clone());
            BigInt::from(4u32) * &d * &d
        };
        let e_signed = BigInt::from(e.clone());
        let (gcd, bezout_a, bezout_b) = egcd(&four_delta_sq, &e_signed);
        if gcd != BigInt::one() {
            // Cannot happen for a well-formed e (odd prime > l), but is
            // checked rather than assumed.
            return Err(Error::InvalidParameters(
                "gcd(4*delta^2, e) != 1; choose different l or keysize".into(),
            ));
        }

        let mut participants: Vec<Option<Participant>> = (0..=l).map(|_| None).collect();
        for (idx, share) in shares.into_iter().enumerate() {
            let id = idx + 1;
            participants[id] = Some(Participant {
                id,
                secret_share: SecretShare::new(&share),
                known_shares: HashMap::new(),
            });
        }

        info!(l, k, n_bits = n.bits(), "threshold RSA session setup complete");

        Ok(Session {
            l,
            k,
            n,
            m,
            e,
            delta,
            v,
            verification_keys,
            bezout_a,
            bezout_b,
            participants,
        })
    }

    /// Looks up a participant by id.
    ///
    /// # Arguments
    ///
    /// * `id` - The participant id, which must be in `1..=l`.
    ///
    /// # Returns
    ///
    /// A reference to the participant, or `Error::OutOfRange` if `id` is
    /// not a valid participant id for this session.
    pub fn participant(&self, id: usize) -> Result<&Participant> {
        self.participants
            .get(id)
            .and_then(|p| p.as_ref())
            .ok_or(Error::OutOfRange { id, l: self.l })
    }

    fn participant_mut(&mut self, id: usize) -> Result<&mut Participant> {
        let l = self.l;
        self.participants
            .get_mut(id)
            .and_then(|p| p.as_mut())
            .ok_or(Error::OutOfRange { id, l })
    }

    /// Has participant `id` sign `msg`, recording the resulting share in
    /// its own `known_shares` before returning it.
    ///
    /// # Arguments
    ///
    /// * `id` - The signing participant's id.
    /// * `msg` - The message to sign.
    ///
    /// # Returns
    ///
    /// The produced `SignatureShare`, or `Error::OutOfRange` if `id` is
    /// invalid.
    pub fn sign_share(&mut self, id: usize, msg: &[u8]) -> Result<SignatureShare> {
        if id == 0 || id > self.l {
            return Err(Error::OutOfRange { id, l: self.l });
        }
        let vk_i = self.verification_keys[id].clone();
        let n = self.n.clone();
        let v = self.v.clone();
        let delta = self.delta.clone();

        let secret_share = self.participant(id)?.secret_share.as_biguint();
        let share = signer::sign_share(&n, &v, &delta, &vk_i, &secret_share, id, msg);

        let participant = self.participant_mut(id)?;
        participant
            .known_shares
            .entry(msg.to_vec())
            .or_insert_with(HashMap::new)
            .insert(id, share.clone());

        Ok(share)
    }

    /// Verifies `share` against `msg` under this session's parameters.
    /// Pure — has no effect on `known_shares`.
    ///
    /// # Arguments
    ///
    /// * `msg` - The message the share is claimed to sign.
    /// * `share` - The share to verify.
    ///
    /// # Returns
    ///
    /// `true` if the share's NIZK proof checks out, `false` otherwise.
    pub fn verify_share(&self, msg: &[u8], share: &SignatureShare) -> bool {
        if share.id == 0 || share.id > self.l {
            return false;
        }
        let vk_i = &self.verification_keys[share.id];
        verifier::verify_share(&self.n, &self.v, &self.delta, vk_i, msg, share)
    }

    /// Verifies `share` and, if valid, records it in `receiver`'s
    /// `known_shares` for `msg`.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The id of the participant recording the share.
    /// * `msg` - The message the share is claimed to sign.
    /// * `share` - The share being submitted.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the share verified and was recorded, or
    /// `Error::InvalidShare` (with no mutation) if it did not.
    pub fn receive_share(&mut self, receiver: usize, msg: &[u8], share: SignatureShare) -> Result<()> {
        if !self.verify_share(msg, &share) {
            warn!(
                id = share.id,
                message_digest = %message_digest_hex(msg),
                "rejected invalid share"
            );
            return Err(Error::InvalidShare {
                message_digest: message_digest_hex(msg),
                id: share.id,
            });
        }
        let share_id = share.id;
        let participant = self.participant_mut(receiver)?;
        participant
            .known_shares
            .entry(msg.to_vec())
            .or_insert_with(HashMap::new)
            .insert(share_id, share);
        debug!(receiver, id = share_id, "recorded verified share");
        Ok(())
    }

    /// Combines `k` of `shares` into a full RSA signature.
    ///
    /// # Arguments
    ///
    /// * `msg` - The message the shares sign.
    /// * `shares` - At least `k` shares, keyed by producing participant id,
    ///   all for the same message.
    ///
    /// # Returns
    ///
    /// The combined RSA signature, or an error if there were too few
    /// shares or combination failed its sanity check.
    pub fn combine(
        &self,
        msg: &[u8],
        shares: &HashMap<usize, SignatureShare>,
    ) -> Result<BigUint> {
        combiner::combine(
            &self.n,
            &self.e,
            self.k,
            &self.delta,
            &self.bezout_a,
            &self.bezout_b,
            msg,
            shares,
        )
    }

    /// Verifies a combined RSA signature.
    ///
    /// # Arguments
    ///
    /// * `msg` - The signed message.
    /// * `signature` - The candidate signature.
    ///
    /// # Returns
    ///
    /// `true` if `signature^e ≡ H(msg) (mod n)`, `false` otherwise.
    pub fn verify_signature(&self, msg: &[u8], signature: &BigUint) -> bool {
        combiner::verify_signature(&self.n, &self.e, msg, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_rejects_k_greater_than_l() {
        assert!(matches!(
            Session::setup(3, 5, 512),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn setup_rejects_k_zero() {
        assert!(matches!(
            Session::setup(3, 0, 512),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn participant_out_of_range_errors() {
        let session = Session::setup(3, 2, 512).unwrap();
        assert!(matches!(
            session.participant(0),
            Err(Error::OutOfRange { id: 0, l: 3 })
        ));
        assert!(matches!(
            session.participant(4),
            Err(Error::OutOfRange { id: 4, l: 3 })
        ));
        assert!(session.participant(1).is_ok());
    }

    #[test]
    fn verification_keys_match_secret_shares() {
        let session = Session::setup(4, 2, 512).unwrap();
        for id in 1..=4 {
            let s_i = session.participant(id).unwrap().secret_share.as_biguint();
            let expected = session.v.modpow(&s_i, &session.n);
            assert_eq!(session.verification_keys[id], expected);
        }
    }

    #[test]
    #[tracing_test::traced_test]
    fn setup_logs_completion_at_info_level() {
        let _session = Session::setup(3, 2, 512).unwrap();
        assert!(tracing_test::logs_contain(
            "threshold RSA session setup complete"
        ));
    }

    #[test]
    #[tracing_test::traced_test]
    fn receive_share_logs_rejection_of_tampered_shares() {
        let mut session = Session::setup(3, 2, 512).unwrap();
        let msg = b"span assertion";
        let mut share = session.sign_share(1, msg).unwrap();
        share.z += 1u32;
        assert!(session.receive_share(2, msg, share).is_err());
        assert!(tracing_test::logs_contain("rejected invalid share"));
    }
}
