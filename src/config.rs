//! Authentication configuration
//!
//! An [`AuthConfig`] is an ordered list of rules constraining (local round)
//! or describing (remote round) one authentication exchange. During
//! verification the matched trust anchor's config is merged into the
//! session's gathered remote config.

use crate::params::SignatureParams;

/// How an exchange authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthClass {
    /// Public key signature (RSA, ECDSA, Ed25519)
    PublicKey,
    /// Pre-shared key MIC
    PreSharedKey,
}

/// A single authentication constraint or result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRule {
    /// Require (local) or record (remote) a specific IKE signature scheme
    IkeSignatureScheme(SignatureParams),
    /// Class of authentication performed
    AuthClass(AuthClass),
    /// Online certificate validation (CRL/OCSP) was suspended for this
    /// verification and must be caught up later
    CertValidationSuspended(bool),
}

/// Ordered set of authentication rules
///
/// Rule order is meaningful: explicitly configured signature schemes are
/// tried in the order they appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    rules: Vec<AuthRule>,
}

impl AuthConfig {
    /// Empty configuration
    pub fn new() -> Self {
        AuthConfig { rules: Vec::new() }
    }

    /// Append a rule
    pub fn add(&mut self, rule: AuthRule) {
        self.rules.push(rule);
    }

    /// Iterate rules in insertion order
    pub fn rules(&self) -> std::slice::Iter<'_, AuthRule> {
        self.rules.iter()
    }

    /// Merge another config into this one, appending its rules
    pub fn merge(&mut self, other: AuthConfig) {
        self.rules.extend(other.rules);
    }

    /// The configured signature schemes, in order
    pub fn signature_schemes(&self) -> impl Iterator<Item = &SignatureParams> {
        self.rules.iter().filter_map(|rule| match rule {
            AuthRule::IkeSignatureScheme(params) => Some(params),
            _ => None,
        })
    }
}

/// Runtime policy settings for scheme selection
///
/// Injected at authenticator construction and read at selection time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Offer RSASSA-PSS schemes as default candidates for RSA keys
    ///
    /// Explicitly configured PSS schemes are honored regardless of this
    /// toggle; it only gates the automatic default set.
    pub rsa_pss: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HashAlgorithm, SignatureScheme};

    #[test]
    fn test_auth_config_merge() {
        let mut a = AuthConfig::new();
        a.add(AuthRule::AuthClass(AuthClass::PublicKey));

        let mut b = AuthConfig::new();
        b.add(AuthRule::CertValidationSuspended(true));

        a.merge(b);
        assert_eq!(a.rules().count(), 2);
    }

    #[test]
    fn test_signature_schemes_in_order() {
        let mut cfg = AuthConfig::new();
        cfg.add(AuthRule::IkeSignatureScheme(SignatureParams::new(
            SignatureScheme::EcdsaSha384,
        )));
        cfg.add(AuthRule::AuthClass(AuthClass::PublicKey));
        cfg.add(AuthRule::IkeSignatureScheme(SignatureParams::rsa_pss(
            HashAlgorithm::Sha256,
        )));

        let schemes: Vec<_> = cfg.signature_schemes().map(|p| p.scheme).collect();
        assert_eq!(
            schemes,
            vec![SignatureScheme::EcdsaSha384, SignatureScheme::RsaPss]
        );
    }
}
