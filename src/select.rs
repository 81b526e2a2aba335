//! Signature scheme selection for RFC 7427 negotiation
//!
//! Computes the ordered candidate list to try when signing, from the local
//! auth configuration, the peer's advertised hash support and the private
//! key's properties.

use tracing::debug;

use crate::config::{AuthConfig, Settings};
use crate::params::{CandidateList, KeyType, SignatureParams, SignatureScheme};
use crate::schemes::default_schemes_for_key;
use crate::traits::{Keymat, PrivateKey};

/// Select the signature schemes to offer for the given key
///
/// If the auth config pins one or more signature schemes, only those
/// matching the key's type and supported by the peer are kept, in
/// configured order. This fully overrides automatic selection: an empty
/// result is final, no fallback to defaults is attempted.
///
/// Without explicit configuration, the default schemes for the key's type
/// and size are offered, filtered by peer hash support. RSASSA-PSS defaults
/// are only offered when enabled by [`Settings::rsa_pss`]. For RSA keys the
/// default set is then widened with SHA-384 and SHA-256 PKCS#1 variants if
/// the peer supports them: large keys only guarantee a SHA-512 candidate,
/// and peers restricted to weaker hashes would otherwise never match.
///
/// An empty list means "no common algorithm"; callers fail without
/// attempting a signature.
pub fn select_signature_schemes(
    auth: &AuthConfig,
    keymat: &dyn Keymat,
    private: &dyn PrivateKey,
    settings: &Settings,
) -> CandidateList {
    let mut selected = CandidateList::new();
    let key_type = private.key_type();

    let mut have_config = false;
    for config in auth.signature_schemes() {
        have_config = true;
        if key_type == config.scheme.key_type()
            && keymat.hash_algorithm_supported(config.hash_algorithm())
        {
            selected.push(config.clone());
        } else {
            debug!(scheme = %config, %key_type,
                   "configured signature scheme not usable, skipped");
        }
    }
    if have_config {
        return selected;
    }

    // No explicit configuration: schemes appropriate for the key that the
    // other peer supports
    for config in default_schemes_for_key(key_type, private.keysize()) {
        if config.scheme == SignatureScheme::RsaPss && !settings.rsa_pss {
            continue;
        }
        if keymat.hash_algorithm_supported(config.hash_algorithm()) {
            selected.push(config);
        }
    }

    // The defaults for an RSA key only guarantee a SHA-512 candidate; also
    // offer the weaker PKCS#1 variants for interoperability
    if key_type == KeyType::Rsa {
        for scheme in [
            SignatureScheme::RsaPkcs1Sha384,
            SignatureScheme::RsaPkcs1Sha256,
        ] {
            if !selected.contains_scheme(scheme)
                && keymat.hash_algorithm_supported(scheme.default_hash())
            {
                selected.push(SignatureParams::new(scheme));
            }
        }
    }

    selected
}
