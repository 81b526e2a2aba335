//! Default signature scheme sets and the classic method mapping
//!
//! Two ways to pick a scheme for a key: the keysize-tiered default sets
//! used by RFC 7427 negotiation, and the fixed legacy mapping used when the
//! peer does not support signature authentication.

use tracing::warn;

use crate::error::{Error, Result};
use crate::params::{HashAlgorithm, KeyType, SignatureParams, SignatureScheme};
use crate::payload::AuthMethod;
use crate::traits::PrivateKey;

/// Default signature schemes appropriate for a key of the given type and
/// size, strongest-sufficient hash first within each family
///
/// RSA keys get one tier per hash strength, gated by key size: a hash is
/// only offered if the key is small enough that the hash does not weaken
/// the combination (SHA-256 up to 3072 bit, SHA-384 up to 7680 bit, SHA-512
/// always). Each RSA tier lists RSASSA-PSS before PKCS#1; whether PSS is
/// actually offered is decided later by policy
/// (see [`crate::select::select_signature_schemes`]).
///
/// ECDSA keys get the hashes matching or exceeding the curve strength.
/// Ed25519 hashes internally and has a single scheme.
pub fn default_schemes_for_key(key_type: KeyType, keysize: usize) -> Vec<SignatureParams> {
    let mut schemes = Vec::new();
    match key_type {
        KeyType::Rsa => {
            let tiers: [(usize, HashAlgorithm, SignatureScheme); 3] = [
                (3072, HashAlgorithm::Sha256, SignatureScheme::RsaPkcs1Sha256),
                (7680, HashAlgorithm::Sha384, SignatureScheme::RsaPkcs1Sha384),
                (0, HashAlgorithm::Sha512, SignatureScheme::RsaPkcs1Sha512),
            ];
            for (max_keysize, hash, pkcs1) in tiers {
                if max_keysize != 0 && keysize > max_keysize {
                    continue;
                }
                schemes.push(SignatureParams::rsa_pss(hash));
                schemes.push(SignatureParams::new(pkcs1));
            }
        }
        KeyType::Ecdsa => {
            let tiers: [(usize, SignatureScheme); 3] = [
                (256, SignatureScheme::EcdsaSha256),
                (384, SignatureScheme::EcdsaSha384),
                (0, SignatureScheme::EcdsaSha512),
            ];
            for (max_keysize, scheme) in tiers {
                if max_keysize != 0 && keysize > max_keysize {
                    continue;
                }
                schemes.push(SignatureParams::new(scheme));
            }
        }
        KeyType::Ed25519 => {
            schemes.push(SignatureParams::new(SignatureScheme::Ed25519));
        }
    }
    schemes
}

/// Map a private key to the classic (pre-RFC 7427) auth method and scheme
///
/// Used when the peer has not advertised signature authentication support;
/// never consults peer hash capabilities. A pure function of key type and
/// size.
///
/// # Errors
///
/// Fails for key types without a classic method (e.g. Ed25519) and for
/// ECDSA keys whose size matches no IKEv2 ECDSA method.
pub fn classic_scheme_for_key(
    private: &dyn PrivateKey,
) -> Result<(AuthMethod, SignatureParams)> {
    match private.key_type() {
        KeyType::Rsa => Ok((
            AuthMethod::RsaSig,
            SignatureParams::new(SignatureScheme::RsaPkcs1Sha1),
        )),
        KeyType::Ecdsa => match private.keysize() {
            256 => Ok((
                AuthMethod::EcdsaSha256P256,
                SignatureParams::new(SignatureScheme::EcdsaSha256),
            )),
            384 => Ok((
                AuthMethod::EcdsaSha384P384,
                SignatureParams::new(SignatureScheme::EcdsaSha384),
            )),
            521 => Ok((
                AuthMethod::EcdsaSha512P521,
                SignatureParams::new(SignatureScheme::EcdsaSha512),
            )),
            size => {
                warn!(keysize = size, "ECDSA private key size not supported");
                Err(Error::AuthenticationFailed(format!(
                    "{} bit ECDSA private key size not supported",
                    size
                )))
            }
        },
        key_type => {
            warn!(%key_type, "private key type has no classic auth method");
            Err(Error::AuthenticationFailed(format!(
                "private key of type {} not supported",
                key_type
            )))
        }
    }
}
