//! Collaborator traits for the authentication core
//!
//! The authenticator only orchestrates: session state, key derivation,
//! credential resolution and the raw cryptographic primitives live behind
//! these traits. All calls are synchronous; borrowed inputs must stay valid
//! for the duration of a single `build`/`process` call.

use crate::config::AuthConfig;
use crate::error::Result;
use crate::params::{CandidateList, HashAlgorithm, KeyType, SignatureParams};

/// Read/write view of the IKE_SA owning an authentication exchange
pub trait IkeSession {
    /// Our own identity
    fn local_id(&self) -> &str;

    /// The peer's identity
    fn remote_id(&self) -> &str;

    /// Authentication config for the local (`true`) or remote (`false`)
    /// authentication round
    fn auth_cfg(&self, local: bool) -> &AuthConfig;

    /// Mutable access to the same config, for recording verification results
    fn auth_cfg_mut(&mut self, local: bool) -> &mut AuthConfig;

    /// Whether the peer advertised support for RFC 7427 signature
    /// authentication (SIGNATURE_HASH_ALGORITHMS notify seen)
    fn supports_signature_auth(&self) -> bool;

    /// Whether online certificate validation (CRL/OCSP) is currently
    /// suspended for this session
    fn online_validation_suspended(&self) -> bool;
}

/// IKEv2 key material derivation (the "keymat")
pub trait Keymat {
    /// Derive the octets to be signed or verified for an authentication
    /// exchange
    ///
    /// `schemes` is the candidate list in preference order; the keymat may
    /// narrow or reorder it (e.g. when a PPK or intermediate exchange binds
    /// a specific scheme) and leaves the scheme it actually bound first.
    ///
    /// # Errors
    ///
    /// Fails if the transcript data is insufficient to derive the octets.
    fn get_auth_octets(
        &self,
        verify: bool,
        ike_sa_init: &[u8],
        nonce: &[u8],
        id: &str,
        reserved: &[u8; 3],
        schemes: &mut CandidateList,
    ) -> Result<Vec<u8>>;

    /// Whether the peer advertised support for the given hash algorithm in
    /// its SIGNATURE_HASH_ALGORITHMS notify
    fn hash_algorithm_supported(&self, hash: HashAlgorithm) -> bool;
}

/// Private key handle bound to a local identity
pub trait PrivateKey {
    /// Type of the key
    fn key_type(&self) -> KeyType;

    /// Key size in bits
    fn keysize(&self) -> usize;

    /// Sign the octets with the given scheme and parameters
    ///
    /// Returns `None` if the backing key does not support the scheme; the
    /// caller treats this as a signal to try the next candidate, not as a
    /// fatal error.
    fn sign(&self, params: &SignatureParams, octets: &[u8]) -> Option<Vec<u8>>;
}

/// Public key of a candidate trust anchor
pub trait PublicKey {
    /// Verify a signature over the octets with the given scheme and
    /// parameters
    fn verify(&self, params: &SignatureParams, octets: &[u8], signature: &[u8]) -> bool;
}

/// Credential store resolving identities to keys
pub trait CredentialStore {
    /// Find a private key for the given identity matching the auth config
    ///
    /// `key_type` restricts the key type; `None` accepts any.
    fn get_private(
        &self,
        key_type: Option<KeyType>,
        id: &str,
        auth: &AuthConfig,
    ) -> Option<Box<dyn PrivateKey>>;

    /// Enumerate candidate public keys for verifying a signature by `id`
    ///
    /// Yields each trusted public key of the asserted type together with the
    /// auth config of its trust chain. Enumeration is lazy and the order is
    /// trust-store-defined. `online` controls whether revocation/online
    /// checks are performed during trust chain validation.
    fn public_key_candidates<'a>(
        &'a self,
        key_type: KeyType,
        id: &'a str,
        auth: &'a AuthConfig,
        online: bool,
    ) -> Box<dyn Iterator<Item = (Box<dyn PublicKey>, AuthConfig)> + 'a>;
}
