//! RFC 7427 authentication data codec
//!
//! Wire format of the Digital Signature method's authentication data:
//!
//! ```text
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | ASN.1 Length  | AlgorithmIdentifier ASN.1 object
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                                               |
//! ~                Signature Value                ~
//! |                                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The length byte counts exactly the DER-encoded AlgorithmIdentifier
//! (including embedded RSASSA-PSS parameters where the scheme carries them);
//! everything after that span is the raw signature.

use der::asn1::{Any, AnyRef, ObjectIdentifier};
use der::{Decode, Encode, Sequence};
use spki::AlgorithmIdentifierOwned;

use crate::error::{Error, Result};
use crate::params::{HashAlgorithm, KeyType, RsaPssParams, SignatureParams, SignatureScheme};

const OID_RSA_PKCS1_SHA1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
const OID_RSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
const OID_RSA_PKCS1_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
const OID_RSA_PKCS1_SHA384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
const OID_RSA_PKCS1_SHA512: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
const OID_ECDSA_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const OID_ECDSA_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
const OID_ECDSA_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
const OID_MGF1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");

const OID_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
const OID_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const OID_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const OID_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

fn scheme_to_oid(scheme: SignatureScheme) -> ObjectIdentifier {
    match scheme {
        SignatureScheme::RsaPkcs1Sha1 => OID_RSA_PKCS1_SHA1,
        SignatureScheme::RsaPkcs1Sha256 => OID_RSA_PKCS1_SHA256,
        SignatureScheme::RsaPkcs1Sha384 => OID_RSA_PKCS1_SHA384,
        SignatureScheme::RsaPkcs1Sha512 => OID_RSA_PKCS1_SHA512,
        SignatureScheme::RsaPss => OID_RSA_PSS,
        SignatureScheme::EcdsaSha256 => OID_ECDSA_SHA256,
        SignatureScheme::EcdsaSha384 => OID_ECDSA_SHA384,
        SignatureScheme::EcdsaSha512 => OID_ECDSA_SHA512,
        SignatureScheme::Ed25519 => OID_ED25519,
    }
}

fn scheme_from_oid(oid: &ObjectIdentifier) -> Option<SignatureScheme> {
    if *oid == OID_RSA_PKCS1_SHA1 {
        Some(SignatureScheme::RsaPkcs1Sha1)
    } else if *oid == OID_RSA_PKCS1_SHA256 {
        Some(SignatureScheme::RsaPkcs1Sha256)
    } else if *oid == OID_RSA_PKCS1_SHA384 {
        Some(SignatureScheme::RsaPkcs1Sha384)
    } else if *oid == OID_RSA_PKCS1_SHA512 {
        Some(SignatureScheme::RsaPkcs1Sha512)
    } else if *oid == OID_RSA_PSS {
        Some(SignatureScheme::RsaPss)
    } else if *oid == OID_ECDSA_SHA256 {
        Some(SignatureScheme::EcdsaSha256)
    } else if *oid == OID_ECDSA_SHA384 {
        Some(SignatureScheme::EcdsaSha384)
    } else if *oid == OID_ECDSA_SHA512 {
        Some(SignatureScheme::EcdsaSha512)
    } else if *oid == OID_ED25519 {
        Some(SignatureScheme::Ed25519)
    } else {
        None
    }
}

fn hash_to_oid(hash: HashAlgorithm) -> Result<ObjectIdentifier> {
    match hash {
        HashAlgorithm::Sha1 => Ok(OID_SHA1),
        HashAlgorithm::Sha256 => Ok(OID_SHA256),
        HashAlgorithm::Sha384 => Ok(OID_SHA384),
        HashAlgorithm::Sha512 => Ok(OID_SHA512),
        HashAlgorithm::Identity => Err(Error::UnsupportedAlgorithm(
            "identity hash has no OID".to_string(),
        )),
    }
}

fn hash_from_oid(oid: &ObjectIdentifier) -> Option<HashAlgorithm> {
    if *oid == OID_SHA1 {
        Some(HashAlgorithm::Sha1)
    } else if *oid == OID_SHA256 {
        Some(HashAlgorithm::Sha256)
    } else if *oid == OID_SHA384 {
        Some(HashAlgorithm::Sha384)
    } else if *oid == OID_SHA512 {
        Some(HashAlgorithm::Sha512)
    } else {
        None
    }
}

/// RSASSA-PSS-params (RFC 8017 Appendix A.2.3)
///
/// ```text
/// RSASSA-PSS-params ::= SEQUENCE {
///     hashAlgorithm      [0] HashAlgorithm      DEFAULT sha1,
///     maskGenAlgorithm   [1] MaskGenAlgorithm   DEFAULT mgf1SHA1,
///     saltLength         [2] INTEGER            DEFAULT 20,
///     trailerField       [3] TrailerField       DEFAULT trailerFieldBC
/// }
/// ```
///
/// Fields equal to their DEFAULT must be omitted on the wire, so each is
/// modeled as OPTIONAL here and set to `None` when it matches the default.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct RsaPssParamsAsn1 {
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    hash_algorithm: Option<AlgorithmIdentifierOwned>,

    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    mask_gen_algorithm: Option<AlgorithmIdentifierOwned>,

    #[asn1(context_specific = "2", tag_mode = "EXPLICIT", optional = "true")]
    salt_length: Option<u8>,

    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", optional = "true")]
    trailer_field: Option<u8>,
}

impl RsaPssParamsAsn1 {
    fn from_params(pss: &RsaPssParams) -> Result<Self> {
        let hash_algorithm = if pss.hash != HashAlgorithm::Sha1 {
            Some(AlgorithmIdentifierOwned {
                oid: hash_to_oid(pss.hash)?,
                parameters: None,
            })
        } else {
            None
        };
        let mask_gen_algorithm = if pss.mgf1_hash != HashAlgorithm::Sha1 {
            let inner = AlgorithmIdentifierOwned {
                oid: hash_to_oid(pss.mgf1_hash)?,
                parameters: None,
            };
            Some(AlgorithmIdentifierOwned {
                oid: OID_MGF1,
                parameters: Some(Any::encode_from(&inner).map_err(|e| {
                    Error::Internal(format!("failed encoding MGF1 parameters: {}", e))
                })?),
            })
        } else {
            None
        };
        let salt_length = if pss.salt_len != 20 {
            let salt = u8::try_from(pss.salt_len).map_err(|_| {
                Error::UnsupportedAlgorithm(format!(
                    "RSASSA-PSS salt length {} out of range",
                    pss.salt_len
                ))
            })?;
            Some(salt)
        } else {
            None
        };
        Ok(RsaPssParamsAsn1 {
            hash_algorithm,
            mask_gen_algorithm,
            salt_length,
            trailer_field: None,
        })
    }

    fn to_params(&self) -> Result<RsaPssParams> {
        let hash = match &self.hash_algorithm {
            Some(alg) => hash_from_oid(&alg.oid).ok_or_else(|| {
                Error::UnsupportedAlgorithm(format!(
                    "unsupported hash in RSASSA-PSS parameters: {}",
                    alg.oid
                ))
            })?,
            None => HashAlgorithm::Sha1,
        };
        let mgf1_hash = match &self.mask_gen_algorithm {
            Some(alg) => {
                if alg.oid != OID_MGF1 {
                    return Err(Error::MalformedAuthData(format!(
                        "unexpected mask generation function: {}",
                        alg.oid
                    )));
                }
                let inner: AlgorithmIdentifierOwned = alg
                    .parameters
                    .as_ref()
                    .ok_or_else(|| {
                        Error::MalformedAuthData("MGF1 without hash parameter".to_string())
                    })?
                    .decode_as()
                    .map_err(|e| {
                        Error::MalformedAuthData(format!("failed parsing MGF1 hash: {}", e))
                    })?;
                hash_from_oid(&inner.oid).ok_or_else(|| {
                    Error::UnsupportedAlgorithm(format!(
                        "unsupported MGF1 hash in RSASSA-PSS parameters: {}",
                        inner.oid
                    ))
                })?
            }
            None => HashAlgorithm::Sha1,
        };
        if let Some(trailer) = self.trailer_field {
            if trailer != 1 {
                return Err(Error::MalformedAuthData(format!(
                    "unsupported RSASSA-PSS trailer field: {}",
                    trailer
                )));
            }
        }
        Ok(RsaPssParams {
            hash,
            mgf1_hash,
            salt_len: self.salt_length.map(usize::from).unwrap_or(20),
        })
    }
}

/// Result of decoding RFC 7427 authentication data
///
/// Carries everything the verification workflow needs: the key type derived
/// from the scheme, the scheme with its parameters, and the signature slice
/// following the algorithm identifier span.
#[derive(Debug)]
pub struct DecodedAuthData<'a> {
    /// Key type required to verify the signature
    pub key_type: KeyType,
    /// Decoded scheme and parameters
    pub params: SignatureParams,
    /// Raw signature bytes (the remainder after the identifier span)
    pub signature: &'a [u8],
}

/// Encode authentication data for the RFC 7427 Digital Signature method
///
/// # Errors
///
/// Fails if the scheme's parameters cannot be serialized
/// ([`Error::UnsupportedAlgorithm`] / [`Error::Internal`]) or the encoded
/// identifier exceeds the one-byte length prefix.
pub fn encode_auth_data(params: &SignatureParams, signature: &[u8]) -> Result<Vec<u8>> {
    let oid = scheme_to_oid(params.scheme);
    let parameters = match params.scheme {
        SignatureScheme::RsaPss => {
            let pss = params.params.as_ref().ok_or_else(|| {
                Error::Internal("RSASSA-PSS scheme without parameters".to_string())
            })?;
            let asn1 = RsaPssParamsAsn1::from_params(pss)?;
            Some(Any::encode_from(&asn1).map_err(|e| {
                Error::Internal(format!("failed encoding RSASSA-PSS parameters: {}", e))
            })?)
        }
        // RSASSA-PKCS1-v1_5 identifiers carry an explicit NULL parameter,
        // ECDSA and Ed25519 identifiers omit the field (RFC 7427 Annex A)
        SignatureScheme::RsaPkcs1Sha1
        | SignatureScheme::RsaPkcs1Sha256
        | SignatureScheme::RsaPkcs1Sha384
        | SignatureScheme::RsaPkcs1Sha512 => Some(AnyRef::NULL.into()),
        _ => None,
    };

    let identifier = AlgorithmIdentifierOwned { oid, parameters };
    let der = identifier.to_der().map_err(|e| {
        Error::Internal(format!("failed encoding algorithm identifier: {}", e))
    })?;
    let len = u8::try_from(der.len()).map_err(|_| {
        Error::Internal(format!("algorithm identifier too long: {} bytes", der.len()))
    })?;

    let mut out = Vec::with_capacity(1 + der.len() + signature.len());
    out.push(len);
    out.extend_from_slice(&der);
    out.extend_from_slice(signature);
    Ok(out)
}

/// Decode RFC 7427 authentication data into scheme, parameters and signature
///
/// # Errors
///
/// - [`Error::MalformedAuthData`] - truncated data, invalid DER, or invalid
///   RSASSA-PSS parameter structure
/// - [`Error::UnsupportedAlgorithm`] - well-formed identifier referencing an
///   algorithm or hash this implementation does not know
pub fn decode_auth_data(data: &[u8]) -> Result<DecodedAuthData<'_>> {
    let (&len, rest) = data.split_first().ok_or_else(|| {
        Error::MalformedAuthData("empty authentication data".to_string())
    })?;
    let len = usize::from(len);
    if rest.len() < len {
        return Err(Error::MalformedAuthData(format!(
            "algorithm identifier truncated: {} bytes declared, {} available",
            len,
            rest.len()
        )));
    }
    let (span, signature) = rest.split_at(len);

    let identifier = AlgorithmIdentifierOwned::from_der(span).map_err(|e| {
        Error::MalformedAuthData(format!("invalid algorithm identifier: {}", e))
    })?;
    let scheme = scheme_from_oid(&identifier.oid).ok_or_else(|| {
        Error::UnsupportedAlgorithm(format!(
            "unrecognized signature algorithm: {}",
            identifier.oid
        ))
    })?;

    let params = match scheme {
        SignatureScheme::RsaPss => {
            let any = identifier.parameters.as_ref().ok_or_else(|| {
                Error::MalformedAuthData("missing RSASSA-PSS parameters".to_string())
            })?;
            let asn1: RsaPssParamsAsn1 = any.decode_as().map_err(|e| {
                Error::MalformedAuthData(format!("failed parsing RSASSA-PSS parameters: {}", e))
            })?;
            Some(asn1.to_params()?)
        }
        _ => None,
    };

    Ok(DecodedAuthData {
        key_type: scheme.key_type(),
        params: SignatureParams { scheme, params },
        signature,
    })
}
