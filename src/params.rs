//! Signature scheme and parameter types
//!
//! A [`SignatureParams`] value identifies a signature scheme plus the
//! algorithm-specific parameters one scheme family (RSASSA-PSS) carries.
//! Scheme lists built during negotiation are held in a [`CandidateList`],
//! most-preferred first.

use std::fmt;

/// Hash algorithms negotiable for IKEv2 signature authentication (RFC 7427)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// Identity hash (RFC 8420) - the signature algorithm hashes internally
    Identity,
}

impl HashAlgorithm {
    /// Digest size in bytes (0 for the identity hash)
    pub fn size(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Identity => 0,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Identity => "Identity",
        };
        write!(f, "{}", name)
    }
}

/// Type of an asymmetric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// RSA
    Rsa,
    /// ECDSA (NIST curves P-256/P-384/P-521)
    Ecdsa,
    /// Ed25519 (RFC 8420)
    Ed25519,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::Rsa => "RSA",
            KeyType::Ecdsa => "ECDSA",
            KeyType::Ed25519 => "Ed25519",
        };
        write!(f, "{}", name)
    }
}

/// Signature schemes supported for IKEv2 authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// RSASSA-PKCS1-v1_5 with SHA-1 (classic RSA auth method)
    RsaPkcs1Sha1,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RsaPkcs1Sha256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RsaPkcs1Sha384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RsaPkcs1Sha512,
    /// RSASSA-PSS (parameterized: hash, MGF1 hash, salt length)
    RsaPss,
    /// ECDSA with SHA-256
    EcdsaSha256,
    /// ECDSA with SHA-384
    EcdsaSha384,
    /// ECDSA with SHA-512
    EcdsaSha512,
    /// Ed25519 (PureEdDSA)
    Ed25519,
}

impl SignatureScheme {
    /// Key type this scheme operates on
    pub fn key_type(self) -> KeyType {
        match self {
            SignatureScheme::RsaPkcs1Sha1
            | SignatureScheme::RsaPkcs1Sha256
            | SignatureScheme::RsaPkcs1Sha384
            | SignatureScheme::RsaPkcs1Sha512
            | SignatureScheme::RsaPss => KeyType::Rsa,
            SignatureScheme::EcdsaSha256
            | SignatureScheme::EcdsaSha384
            | SignatureScheme::EcdsaSha512 => KeyType::Ecdsa,
            SignatureScheme::Ed25519 => KeyType::Ed25519,
        }
    }

    /// Hash algorithm implied by the scheme itself
    ///
    /// For RSASSA-PSS this is only a fallback; the actual hash lives in the
    /// attached [`RsaPssParams`] (see [`SignatureParams::hash_algorithm`]).
    pub fn default_hash(self) -> HashAlgorithm {
        match self {
            SignatureScheme::RsaPkcs1Sha1 => HashAlgorithm::Sha1,
            SignatureScheme::RsaPkcs1Sha256 | SignatureScheme::EcdsaSha256 => {
                HashAlgorithm::Sha256
            }
            SignatureScheme::RsaPkcs1Sha384 | SignatureScheme::EcdsaSha384 => {
                HashAlgorithm::Sha384
            }
            SignatureScheme::RsaPkcs1Sha512
            | SignatureScheme::EcdsaSha512
            | SignatureScheme::RsaPss => HashAlgorithm::Sha512,
            SignatureScheme::Ed25519 => HashAlgorithm::Identity,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureScheme::RsaPkcs1Sha1 => "RSA-PKCS1-SHA1",
            SignatureScheme::RsaPkcs1Sha256 => "RSA-PKCS1-SHA256",
            SignatureScheme::RsaPkcs1Sha384 => "RSA-PKCS1-SHA384",
            SignatureScheme::RsaPkcs1Sha512 => "RSA-PKCS1-SHA512",
            SignatureScheme::RsaPss => "RSASSA-PSS",
            SignatureScheme::EcdsaSha256 => "ECDSA-SHA256",
            SignatureScheme::EcdsaSha384 => "ECDSA-SHA384",
            SignatureScheme::EcdsaSha512 => "ECDSA-SHA512",
            SignatureScheme::Ed25519 => "Ed25519",
        };
        write!(f, "{}", name)
    }
}

/// Parameters for the RSASSA-PSS signature scheme (RFC 8017 Appendix A.2.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPssParams {
    /// Hash algorithm applied to the message
    pub hash: HashAlgorithm,
    /// Hash algorithm for the MGF1 mask generation function
    pub mgf1_hash: HashAlgorithm,
    /// Salt length in bytes
    pub salt_len: usize,
}

impl RsaPssParams {
    /// PSS parameters using the given hash for message and MGF1, with the
    /// salt length equal to the hash length (the conventional choice)
    pub fn with_hash(hash: HashAlgorithm) -> Self {
        RsaPssParams {
            hash,
            mgf1_hash: hash,
            salt_len: hash.size(),
        }
    }
}

impl Default for RsaPssParams {
    /// The DER DEFAULT values: SHA-1, MGF1 with SHA-1, 20-byte salt
    fn default() -> Self {
        RsaPssParams::with_hash(HashAlgorithm::Sha1)
    }
}

/// A signature scheme plus its optional algorithm-specific parameters
///
/// Only RSASSA-PSS carries parameters; every other scheme leaves `params`
/// empty. Cloning deep-copies the parameter payload.
///
/// Equality compares the **scheme only**: policy comparisons (e.g. "is this
/// scheme already in the candidate list") never inspect the embedded
/// parameters.
#[derive(Debug, Clone)]
pub struct SignatureParams {
    /// The signature scheme
    pub scheme: SignatureScheme,
    /// Algorithm-specific parameters (RSASSA-PSS only)
    pub params: Option<RsaPssParams>,
}

impl SignatureParams {
    /// Parameter-less signature params for the given scheme
    pub fn new(scheme: SignatureScheme) -> Self {
        SignatureParams {
            scheme,
            params: None,
        }
    }

    /// RSASSA-PSS params using the given hash for message digest and MGF1,
    /// salt length equal to the hash length
    pub fn rsa_pss(hash: HashAlgorithm) -> Self {
        SignatureParams {
            scheme: SignatureScheme::RsaPss,
            params: Some(RsaPssParams::with_hash(hash)),
        }
    }

    /// The hash algorithm this scheme/parameter combination uses
    ///
    /// For RSASSA-PSS the hash comes from the attached parameters; for all
    /// other schemes it is implied by the scheme.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        match (&self.scheme, &self.params) {
            (SignatureScheme::RsaPss, Some(pss)) => pss.hash,
            _ => self.scheme.default_hash(),
        }
    }
}

impl PartialEq for SignatureParams {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
    }
}

impl Eq for SignatureParams {}

impl fmt::Display for SignatureParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.scheme, &self.params) {
            (SignatureScheme::RsaPss, Some(pss)) => {
                write!(f, "{}-{}", self.scheme, pss.hash)
            }
            _ => write!(f, "{}", self.scheme),
        }
    }
}

/// Ordered list of candidate signature schemes, most-preferred first
///
/// Built incrementally during scheme selection and torn down as a unit.
/// Callers keep the schemes in a list distinct; [`CandidateList::contains_scheme`]
/// supports that check.
#[derive(Debug, Clone, Default)]
pub struct CandidateList(Vec<SignatureParams>);

impl CandidateList {
    /// Empty candidate list
    pub fn new() -> Self {
        CandidateList(Vec::new())
    }

    /// Append a candidate (takes ownership)
    pub fn push(&mut self, params: SignatureParams) {
        self.0.push(params);
    }

    /// Whether a candidate with the given scheme is already present
    pub fn contains_scheme(&self, scheme: SignatureScheme) -> bool {
        self.0.iter().any(|p| p.scheme == scheme)
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty ("no common algorithm" when returned by
    /// scheme selection)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate candidates in preference order
    pub fn iter(&self) -> std::slice::Iter<'_, SignatureParams> {
        self.0.iter()
    }

    /// Remove and return the first (most preferred) candidate
    pub fn take_first(&mut self) -> Option<SignatureParams> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }

    /// Keep only the candidates the predicate accepts, preserving order
    pub fn retain<F: FnMut(&SignatureParams) -> bool>(&mut self, f: F) {
        self.0.retain(f);
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a SignatureParams;
    type IntoIter = std::slice::Iter<'a, SignatureParams>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<SignatureParams> for CandidateList {
    fn from_iter<T: IntoIterator<Item = SignatureParams>>(iter: T) -> Self {
        CandidateList(iter.into_iter().collect())
    }
}
