//! A (k, l)-threshold RSA signature scheme, following Shoup's "Practical
//! Threshold Signatures" construction.
//!
//! Any `k` out of `l` designated participants can cooperatively produce a
//! standard RSA signature under a shared public key, while any coalition
//! of fewer than `k` participants cannot. Each participant contributes a
//! signature share accompanied by a non-interactive zero-knowledge proof
//! of correctness; a combiner verifies incoming shares and, once `k` valid
//! shares are available, recombines them into a full RSA signature
//! indistinguishable from one produced by the monolithic private key.
//!
//! ```
//! use threshold_rsa::Session;
//! use std::collections::HashMap;
//!
//! let mut session = Session::setup(3, 2, 512).unwrap();
//! let msg = b"hello";
//!
//! let s1 = session.sign_share(1, msg).unwrap();
//! let s2 = session.sign_share(2, msg).unwrap();
//!
//! let mut shares = HashMap::new();
//! shares.insert(1, s1);
//! shares.insert(2, s2);
//!
//! let signature = session.combine(msg, &shares).unwrap();
//! assert!(session.verify_signature(msg, &signature));
//! ```
//!
//! ## Scope
//!
//! This crate is the cryptographic core only: trusted-dealer setup, share
//! signing, share verification, and share combination. Choreography —
//! who sends which share to whom, over what transport, with what
//! persistence — is left to the caller; `Session::receive_share` models
//! "sending" as a direct method call with no I/O implied.
//!
//! This crate does not implement distributed key generation (the dealer
//! in [`Session::setup`] is trusted), proactive share refresh, or
//! constant-time arithmetic — see each module's documentation for the
//! specific guarantees it does and does not make.

mod bigint;
mod combiner;
mod error;
mod hash;
mod polynomial;
mod primes;
mod session;
mod share;
mod signer;
mod verifier;

pub use error::{Error, Result};
pub use session::{Participant, Session};
pub use share::SignatureShare;

/// Lower-level building blocks, exposed for callers that need to compose
/// their own protocol on top of the primitives (e.g. an external CLI
/// shell) rather than going through [`Session`].
pub mod primitives {
    pub use crate::bigint::{egcd, mod_exp, mod_exp_signed, mod_inverse, factorial};
    pub use crate::hash::{fiat_shamir_challenge, hash_to_int, message_digest_hex};
    pub use crate::polynomial::Polynomial;
    pub use crate::primes::{
        generate_random_quadratic, generate_rsa_key, generate_safe_prime_pair, PUBLIC_EXPONENT,
    };
}
