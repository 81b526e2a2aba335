//! Public key authenticator for the IKE_AUTH exchange
//!
//! Two role variants share one workflow core: a [`PubkeySigner`] proves our
//! own identity (it captures the nonce received from the peer and the
//! IKE_SA_INIT message we sent), a [`PubkeyVerifier`] checks the peer's
//! proof (it captures the nonce we sent and the IKE_SA_INIT message we
//! received). The signed octets are always keyed by "my data" vs. "peer
//! data" depending on direction, so the roles are fixed at construction.
//!
//! Each instance serves exactly one in-flight exchange direction and is
//! invoked synchronously on the session's processing context.

use crate::codec::{decode_auth_data, encode_auth_data};
use crate::config::{AuthClass, AuthConfig, AuthRule, Settings};
use crate::error::{Error, Result};
use crate::logging;
use crate::params::{CandidateList, KeyType, SignatureParams, SignatureScheme};
use crate::payload::{AuthMethod, AuthPayload};
use crate::schemes::classic_scheme_for_key;
use crate::select::select_signature_schemes;
use crate::traits::{CredentialStore, IkeSession, Keymat, PrivateKey};

use tracing::debug;

/// One direction of the mutual authentication exchange
///
/// Implemented by [`PubkeySigner`] (the `build` direction) and
/// [`PubkeyVerifier`] (the `process` direction). Calling the method the
/// role does not implement fails with [`Error::AuthenticationFailed`].
pub trait ExchangeAuthenticator {
    /// Build the AUTH payload proving our own identity
    fn build(&mut self) -> Result<AuthPayload> {
        Err(Error::AuthenticationFailed(
            "this authenticator role cannot build".to_string(),
        ))
    }

    /// Verify the AUTH payload of the incoming IKE_AUTH message
    ///
    /// `auth` is `None` when the message carried no AUTH payload.
    fn process(&mut self, auth: Option<&AuthPayload>) -> Result<()> {
        let _ = auth;
        Err(Error::AuthenticationFailed(
            "this authenticator role cannot process".to_string(),
        ))
    }
}

/// State shared by both authenticator roles
struct AuthCore<'a> {
    /// The IKE_SA this exchange belongs to
    session: &'a mut dyn IkeSession,

    /// Key material derivation for the signed octets
    keymat: &'a dyn Keymat,

    /// Credential store resolving identities to keys
    creds: &'a dyn CredentialStore,

    /// Policy settings read at scheme selection time
    settings: Settings,

    /// Nonce to include in the AUTH calculation
    nonce: &'a [u8],

    /// IKE_SA_INIT message data to include in the AUTH calculation
    ike_sa_init: &'a [u8],

    /// Reserved bytes of the ID payload
    reserved: [u8; 3],
}

impl AuthCore<'_> {
    /// Derive the auth octets for a single fixed scheme
    ///
    /// The keymat may still rewrite the scheme (e.g. bind parameters); the
    /// scheme it leaves in the list is returned alongside the octets.
    fn auth_octets_with_scheme(
        &self,
        verify: bool,
        id: &str,
        params: SignatureParams,
    ) -> Result<(Vec<u8>, SignatureParams)> {
        let mut schemes = CandidateList::new();
        schemes.push(params);

        let octets = self.keymat.get_auth_octets(
            verify,
            self.ike_sa_init,
            self.nonce,
            id,
            &self.reserved,
            &mut schemes,
        )?;
        let params = schemes.take_first().ok_or_else(|| {
            Error::AuthenticationFailed(
                "key material rejected the signature scheme".to_string(),
            )
        })?;
        Ok((octets, params))
    }

    /// Create a signature using RFC 7427 signature authentication
    fn sign_signature_auth(
        &self,
        auth: &AuthConfig,
        private: &dyn PrivateKey,
        id: &str,
    ) -> Result<Vec<u8>> {
        let mut schemes = select_signature_schemes(auth, self.keymat, private, &self.settings);
        if schemes.is_empty() {
            logging::log_local_auth(id, "none", false);
            return Err(Error::AuthenticationFailed(format!(
                "no common hash algorithm found to create signature with {} key",
                private.key_type()
            )));
        }

        let octets = self.keymat.get_auth_octets(
            false,
            self.ike_sa_init,
            self.nonce,
            id,
            &self.reserved,
            &mut schemes,
        )?;

        for params in schemes.iter() {
            match private.sign(params, &octets) {
                Some(signature) => match encode_auth_data(params, &signature) {
                    Ok(auth_data) => {
                        logging::log_local_auth(id, &params.to_string(), true);
                        return Ok(auth_data);
                    }
                    Err(e) => {
                        debug!(scheme = %params, error = %e,
                               "unable to encode authentication data");
                    }
                },
                None => {
                    debug!(scheme = %params, key_type = %private.key_type(),
                           "unable to create signature");
                }
            }
        }
        logging::log_local_auth(id, "none", false);
        Err(Error::AuthenticationFailed(format!(
            "{} key rejected every selected signature scheme",
            private.key_type()
        )))
    }

    /// Create a classic (pre-RFC 7427) IKEv2 signature
    fn sign_classic(
        &self,
        private: &dyn PrivateKey,
        id: &str,
    ) -> Result<(AuthMethod, Vec<u8>)> {
        let (auth_method, params) = classic_scheme_for_key(private)?;
        let (octets, params) = self.auth_octets_with_scheme(false, id, params)?;

        match private.sign(&params, &octets) {
            Some(signature) => {
                logging::log_local_auth(id, &params.to_string(), true);
                Ok((auth_method, signature))
            }
            None => {
                logging::log_local_auth(id, &params.to_string(), false);
                Err(Error::AuthenticationFailed(format!(
                    "unable to create {} signature",
                    params
                )))
            }
        }
    }
}

/// Authenticator proving our own identity with a private key signature
pub struct PubkeySigner<'a> {
    core: AuthCore<'a>,
}

impl<'a> PubkeySigner<'a> {
    /// Create a signer for the local authentication round
    ///
    /// # Arguments
    ///
    /// * `received_nonce` - nonce received from the peer
    /// * `sent_init` - the complete IKE_SA_INIT message we sent
    /// * `reserved` - reserved bytes of our ID payload
    pub fn new(
        session: &'a mut dyn IkeSession,
        keymat: &'a dyn Keymat,
        creds: &'a dyn CredentialStore,
        settings: Settings,
        received_nonce: &'a [u8],
        sent_init: &'a [u8],
        reserved: [u8; 3],
    ) -> Self {
        PubkeySigner {
            core: AuthCore {
                session,
                keymat,
                creds,
                settings,
                nonce: received_nonce,
                ike_sa_init: sent_init,
                reserved,
            },
        }
    }
}

impl ExchangeAuthenticator for PubkeySigner<'_> {
    fn build(&mut self) -> Result<AuthPayload> {
        let core = &mut self.core;
        let id = core.session.local_id().to_string();
        let auth = core.session.auth_cfg(true).clone();

        let private = core.creds.get_private(None, &id, &auth).ok_or_else(|| {
            Error::NotFound(format!("no private key found for '{}'", id))
        })?;

        let (auth_method, auth_data) = if core.session.supports_signature_auth() {
            let data = core.sign_signature_auth(&auth, private.as_ref(), &id)?;
            (AuthMethod::DigitalSignature, data)
        } else {
            core.sign_classic(private.as_ref(), &id)?
        };
        drop(private);

        logging::log_auth_data("out", auth_method.to_u8(), &auth_data);
        Ok(AuthPayload::new(auth_method, auth_data))
    }
}

/// Authenticator verifying the peer's identity against trusted public keys
pub struct PubkeyVerifier<'a> {
    core: AuthCore<'a>,
}

impl<'a> PubkeyVerifier<'a> {
    /// Create a verifier for the remote authentication round
    ///
    /// # Arguments
    ///
    /// * `sent_nonce` - nonce we sent to the peer
    /// * `received_init` - the complete IKE_SA_INIT message we received
    /// * `reserved` - reserved bytes of the peer's ID payload
    pub fn new(
        session: &'a mut dyn IkeSession,
        keymat: &'a dyn Keymat,
        creds: &'a dyn CredentialStore,
        settings: Settings,
        sent_nonce: &'a [u8],
        received_init: &'a [u8],
        reserved: [u8; 3],
    ) -> Self {
        PubkeyVerifier {
            core: AuthCore {
                session,
                keymat,
                creds,
                settings,
                nonce: sent_nonce,
                ike_sa_init: received_init,
                reserved,
            },
        }
    }
}

impl ExchangeAuthenticator for PubkeyVerifier<'_> {
    fn process(&mut self, auth_payload: Option<&AuthPayload>) -> Result<()> {
        let payload = auth_payload.ok_or_else(|| {
            Error::AuthenticationFailed("AUTH payload missing".to_string())
        })?;
        logging::log_auth_data("in", payload.auth_method.to_u8(), &payload.auth_data);

        let (key_type, params, signature): (KeyType, SignatureParams, &[u8]) =
            match payload.auth_method {
                AuthMethod::RsaSig => (
                    KeyType::Rsa,
                    SignatureParams::new(SignatureScheme::RsaPkcs1Sha1),
                    &payload.auth_data,
                ),
                AuthMethod::EcdsaSha256P256 => (
                    KeyType::Ecdsa,
                    SignatureParams::new(SignatureScheme::EcdsaSha256),
                    &payload.auth_data,
                ),
                AuthMethod::EcdsaSha384P384 => (
                    KeyType::Ecdsa,
                    SignatureParams::new(SignatureScheme::EcdsaSha384),
                    &payload.auth_data,
                ),
                AuthMethod::EcdsaSha512P521 => (
                    KeyType::Ecdsa,
                    SignatureParams::new(SignatureScheme::EcdsaSha512),
                    &payload.auth_data,
                ),
                AuthMethod::DigitalSignature => {
                    let decoded = decode_auth_data(&payload.auth_data)?;
                    (decoded.key_type, decoded.params, decoded.signature)
                }
                method => {
                    return Err(Error::UnsupportedAlgorithm(format!(
                        "{:?} authentication unsupported",
                        method
                    )));
                }
            };

        let core = &mut self.core;
        let id = core.session.remote_id().to_string();
        let (octets, params) = core.auth_octets_with_scheme(true, &id, params)?;

        let auth = core.session.auth_cfg(false).clone();
        let online = !core.session.online_validation_suspended();

        let mut tried = 0usize;
        let mut matched: Option<AuthConfig> = None;
        for (public, current_auth) in
            core.creds.public_key_candidates(key_type, &id, &auth, online)
        {
            tried += 1;
            if public.verify(&params, &octets, signature) {
                matched = Some(current_auth);
                break;
            }
            logging::log_verify_retry(&id);
        }

        match matched {
            Some(current_auth) => {
                logging::log_peer_auth_success(&id, &params.to_string());
                let cfg = core.session.auth_cfg_mut(false);
                cfg.merge(current_auth);
                cfg.add(AuthRule::AuthClass(AuthClass::PublicKey));
                cfg.add(AuthRule::IkeSignatureScheme(params));
                if !online {
                    cfg.add(AuthRule::CertValidationSuspended(true));
                }
                Ok(())
            }
            None if tried > 0 => Err(Error::AuthenticationFailed(format!(
                "signature of '{}' did not verify against any trusted {} key",
                id, key_type
            ))),
            None => {
                logging::log_no_trusted_key(key_type, &id);
                Err(Error::NotFound(format!(
                    "no trusted {} public key found for '{}'",
                    key_type, id
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HashAlgorithm;

    struct MockSession {
        local: String,
        remote: String,
        local_cfg: AuthConfig,
        remote_cfg: AuthConfig,
        signature_auth: bool,
        suspended: bool,
    }

    impl MockSession {
        fn new(signature_auth: bool) -> Self {
            MockSession {
                local: "alice@example.com".to_string(),
                remote: "bob@example.com".to_string(),
                local_cfg: AuthConfig::new(),
                remote_cfg: AuthConfig::new(),
                signature_auth,
                suspended: false,
            }
        }
    }

    impl IkeSession for MockSession {
        fn local_id(&self) -> &str {
            &self.local
        }
        fn remote_id(&self) -> &str {
            &self.remote
        }
        fn auth_cfg(&self, local: bool) -> &AuthConfig {
            if local {
                &self.local_cfg
            } else {
                &self.remote_cfg
            }
        }
        fn auth_cfg_mut(&mut self, local: bool) -> &mut AuthConfig {
            if local {
                &mut self.local_cfg
            } else {
                &mut self.remote_cfg
            }
        }
        fn supports_signature_auth(&self) -> bool {
            self.signature_auth
        }
        fn online_validation_suspended(&self) -> bool {
            self.suspended
        }
    }

    /// Deterministic stand-in for the transcript-derived octets
    fn expected_octets(init: &[u8], nonce: &[u8], id: &str, reserved: &[u8; 3]) -> Vec<u8> {
        let mut octets = Vec::new();
        octets.extend_from_slice(init);
        octets.extend_from_slice(nonce);
        octets.extend_from_slice(id.as_bytes());
        octets.extend_from_slice(reserved);
        octets
    }

    struct MockKeymat {
        supported: Vec<HashAlgorithm>,
        fail_octets: bool,
        bind_scheme: Option<SignatureScheme>,
    }

    impl MockKeymat {
        fn all_sha2() -> Self {
            MockKeymat {
                supported: vec![
                    HashAlgorithm::Sha256,
                    HashAlgorithm::Sha384,
                    HashAlgorithm::Sha512,
                ],
                fail_octets: false,
                bind_scheme: None,
            }
        }
    }

    impl Keymat for MockKeymat {
        fn get_auth_octets(
            &self,
            _verify: bool,
            ike_sa_init: &[u8],
            nonce: &[u8],
            id: &str,
            reserved: &[u8; 3],
            schemes: &mut CandidateList,
        ) -> Result<Vec<u8>> {
            if self.fail_octets {
                return Err(Error::AuthenticationFailed(
                    "transcript data unavailable".to_string(),
                ));
            }
            if let Some(bound) = self.bind_scheme {
                schemes.retain(|p| p.scheme == bound);
            }
            Ok(expected_octets(ike_sa_init, nonce, id, reserved))
        }

        fn hash_algorithm_supported(&self, hash: HashAlgorithm) -> bool {
            self.supported.contains(&hash)
        }
    }

    fn mock_signature(scheme: SignatureScheme, octets: &[u8]) -> Vec<u8> {
        let mut sig = scheme.to_string().into_bytes();
        sig.extend_from_slice(octets);
        sig
    }

    struct MockPrivateKey {
        key_type: KeyType,
        keysize: usize,
        accepts: Vec<SignatureScheme>,
    }

    impl PrivateKey for MockPrivateKey {
        fn key_type(&self) -> KeyType {
            self.key_type
        }
        fn keysize(&self) -> usize {
            self.keysize
        }
        fn sign(&self, params: &SignatureParams, octets: &[u8]) -> Option<Vec<u8>> {
            if self.accepts.contains(&params.scheme) {
                Some(mock_signature(params.scheme, octets))
            } else {
                None
            }
        }
    }

    struct MockPublicKey {
        good: bool,
    }

    impl crate::traits::PublicKey for MockPublicKey {
        fn verify(&self, params: &SignatureParams, octets: &[u8], signature: &[u8]) -> bool {
            self.good && signature == mock_signature(params.scheme, octets)
        }
    }

    struct MockCreds {
        private: Option<(KeyType, usize, Vec<SignatureScheme>)>,
        /// (verifies, auth config of the trust chain)
        anchors: Vec<(bool, AuthConfig)>,
    }

    impl CredentialStore for MockCreds {
        fn get_private(
            &self,
            _key_type: Option<KeyType>,
            _id: &str,
            _auth: &AuthConfig,
        ) -> Option<Box<dyn PrivateKey>> {
            self.private
                .as_ref()
                .map(|(key_type, keysize, accepts)| {
                    Box::new(MockPrivateKey {
                        key_type: *key_type,
                        keysize: *keysize,
                        accepts: accepts.clone(),
                    }) as Box<dyn PrivateKey>
                })
        }

        fn public_key_candidates<'a>(
            &'a self,
            _key_type: KeyType,
            _id: &'a str,
            _auth: &'a AuthConfig,
            _online: bool,
        ) -> Box<dyn Iterator<Item = (Box<dyn crate::traits::PublicKey>, AuthConfig)> + 'a>
        {
            Box::new(self.anchors.iter().map(|(good, cfg)| {
                (
                    Box::new(MockPublicKey { good: *good }) as Box<dyn crate::traits::PublicKey>,
                    cfg.clone(),
                )
            }))
        }
    }

    const NONCE: &[u8] = b"nonce-nonce-nonce-nonce-nonce-no";
    const INIT: &[u8] = b"ike-sa-init-message-bytes";
    const RESERVED: [u8; 3] = [0x01, 0x02, 0x03];

    #[test]
    fn test_build_classic_rsa() {
        let mut session = MockSession::new(false);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: Some((
                KeyType::Rsa,
                2048,
                vec![SignatureScheme::RsaPkcs1Sha1],
            )),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        let payload = signer.build().unwrap();

        assert_eq!(payload.auth_method, AuthMethod::RsaSig);
        let octets = expected_octets(INIT, NONCE, "alice@example.com", &RESERVED);
        assert_eq!(
            payload.auth_data,
            mock_signature(SignatureScheme::RsaPkcs1Sha1, &octets)
        );
    }

    #[test]
    fn test_build_classic_ecdsa_384() {
        let mut session = MockSession::new(false);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: Some((
                KeyType::Ecdsa,
                384,
                vec![SignatureScheme::EcdsaSha384],
            )),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        let payload = signer.build().unwrap();
        assert_eq!(payload.auth_method, AuthMethod::EcdsaSha384P384);
    }

    #[test]
    fn test_build_no_private_key_is_not_found() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(signer.build(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_build_signature_auth_encodes_rfc7427_data() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: Some((
                KeyType::Rsa,
                2048,
                vec![SignatureScheme::RsaPkcs1Sha256],
            )),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        let payload = signer.build().unwrap();
        assert_eq!(payload.auth_method, AuthMethod::DigitalSignature);

        let decoded = decode_auth_data(&payload.auth_data).unwrap();
        assert_eq!(decoded.params.scheme, SignatureScheme::RsaPkcs1Sha256);
        let octets = expected_octets(INIT, NONCE, "alice@example.com", &RESERVED);
        assert_eq!(
            decoded.signature,
            &mock_signature(SignatureScheme::RsaPkcs1Sha256, &octets)[..]
        );
    }

    #[test]
    fn test_build_pinned_scheme_peer_lacks_hash_fails() {
        let mut session = MockSession::new(true);
        session.local_cfg.add(AuthRule::IkeSignatureScheme(
            SignatureParams::new(SignatureScheme::RsaPkcs1Sha384),
        ));
        let keymat = MockKeymat {
            supported: vec![HashAlgorithm::Sha256],
            fail_octets: false,
            bind_scheme: None,
        };
        let creds = MockCreds {
            private: Some((
                KeyType::Rsa,
                2048,
                vec![
                    SignatureScheme::RsaPkcs1Sha256,
                    SignatureScheme::RsaPkcs1Sha384,
                ],
            )),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            signer.build(),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_build_key_rejects_every_candidate_fails() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: Some((KeyType::Rsa, 2048, vec![])),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            signer.build(),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_build_honors_keymat_scheme_binding() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat {
            supported: vec![
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha384,
                HashAlgorithm::Sha512,
            ],
            fail_octets: false,
            bind_scheme: Some(SignatureScheme::RsaPkcs1Sha512),
        };
        let creds = MockCreds {
            private: Some((
                KeyType::Rsa,
                2048,
                vec![
                    SignatureScheme::RsaPkcs1Sha256,
                    SignatureScheme::RsaPkcs1Sha512,
                ],
            )),
            anchors: vec![],
        };

        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        let payload = signer.build().unwrap();
        let decoded = decode_auth_data(&payload.auth_data).unwrap();
        assert_eq!(decoded.params.scheme, SignatureScheme::RsaPkcs1Sha512);
    }

    #[test]
    fn test_signer_cannot_process() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![],
        };
        let mut signer = PubkeySigner::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            signer.process(None),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    fn anchor_cfg(marker: SignatureScheme) -> AuthConfig {
        let mut cfg = AuthConfig::new();
        cfg.add(AuthRule::IkeSignatureScheme(SignatureParams::new(marker)));
        cfg
    }

    fn legacy_rsa_payload(id: &str) -> AuthPayload {
        let octets = expected_octets(INIT, NONCE, id, &RESERVED);
        AuthPayload::new(
            AuthMethod::RsaSig,
            mock_signature(SignatureScheme::RsaPkcs1Sha1, &octets),
        )
    }

    #[test]
    fn test_process_second_anchor_verifies() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![
                (false, anchor_cfg(SignatureScheme::EcdsaSha256)),
                (true, anchor_cfg(SignatureScheme::EcdsaSha384)),
            ],
        };

        let payload = legacy_rsa_payload("bob@example.com");
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        verifier.process(Some(&payload)).unwrap();

        // the merged config reflects the second anchor plus the recorded
        // auth class and matched scheme
        let rules: Vec<_> = session.remote_cfg.rules().cloned().collect();
        assert!(rules.contains(&AuthRule::IkeSignatureScheme(SignatureParams::new(
            SignatureScheme::EcdsaSha384
        ))));
        assert!(!rules.contains(&AuthRule::IkeSignatureScheme(SignatureParams::new(
            SignatureScheme::EcdsaSha256
        ))));
        assert!(rules.contains(&AuthRule::AuthClass(AuthClass::PublicKey)));
        assert!(rules.contains(&AuthRule::IkeSignatureScheme(SignatureParams::new(
            SignatureScheme::RsaPkcs1Sha1
        ))));
    }

    #[test]
    fn test_process_all_anchors_fail() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![
                (false, AuthConfig::new()),
                (false, AuthConfig::new()),
            ],
        };

        let payload = legacy_rsa_payload("bob@example.com");
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(Some(&payload)),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_process_zero_anchors_is_not_found() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![],
        };

        let payload = legacy_rsa_payload("bob@example.com");
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(Some(&payload)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_process_missing_payload_fails() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![],
        };
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(None),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_process_unsupported_method_is_invalid() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![(true, AuthConfig::new())],
        };

        let payload = AuthPayload::new(AuthMethod::SharedKeyMic, vec![0u8; 32]);
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(Some(&payload)),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_process_unknown_oid_is_invalid() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![(true, AuthConfig::new())],
        };

        // SEQUENCE { OID 1.2.3.4 } followed by signature bytes
        let mut auth_data = vec![7u8, 0x30, 0x05, 0x06, 0x03, 0x2A, 0x03, 0x04];
        auth_data.extend_from_slice(&[0xEE; 32]);
        let payload = AuthPayload::new(AuthMethod::DigitalSignature, auth_data);

        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(Some(&payload)),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_process_keymat_failure_fails() {
        let mut session = MockSession::new(true);
        let keymat = MockKeymat {
            supported: vec![HashAlgorithm::Sha256],
            fail_octets: true,
            bind_scheme: None,
        };
        let creds = MockCreds {
            private: None,
            anchors: vec![(true, AuthConfig::new())],
        };

        let payload = legacy_rsa_payload("bob@example.com");
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        assert!(matches!(
            verifier.process(Some(&payload)),
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_process_records_suspended_validation() {
        let mut session = MockSession::new(true);
        session.suspended = true;
        let keymat = MockKeymat::all_sha2();
        let creds = MockCreds {
            private: None,
            anchors: vec![(true, AuthConfig::new())],
        };

        let payload = legacy_rsa_payload("bob@example.com");
        let mut verifier = PubkeyVerifier::new(
            &mut session,
            &keymat,
            &creds,
            Settings::default(),
            NONCE,
            INIT,
            RESERVED,
        );
        verifier.process(Some(&payload)).unwrap();

        let rules: Vec<_> = session.remote_cfg.rules().cloned().collect();
        assert!(rules.contains(&AuthRule::CertValidationSuspended(true)));
    }
}
