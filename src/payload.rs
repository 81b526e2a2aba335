//! IKEv2 Authentication payload (RFC 7296 Section 3.8)
//!
//! Only the payload body is handled here (auth method byte, reserved bytes
//! and opaque authentication data); the generic payload header belongs to
//! the message layer.

use crate::error::{Error, Result};

/// Authentication Method (RFC 7296 Section 3.8, RFC 7427)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AuthMethod {
    /// RSA Digital Signature (RSASSA-PKCS1-v1_5 with SHA-1)
    RsaSig = 1,
    /// Shared Key Message Integrity Code
    SharedKeyMic = 2,
    /// DSS Digital Signature
    DssSig = 3,
    /// ECDSA with SHA-256 on P-256 curve
    EcdsaSha256P256 = 9,
    /// ECDSA with SHA-384 on P-384 curve
    EcdsaSha384P384 = 10,
    /// ECDSA with SHA-512 on P-521 curve
    EcdsaSha512P521 = 11,
    /// Digital Signature (RFC 7427) - algorithm carried in the auth data
    DigitalSignature = 14,
}

impl AuthMethod {
    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(AuthMethod::RsaSig),
            2 => Some(AuthMethod::SharedKeyMic),
            3 => Some(AuthMethod::DssSig),
            9 => Some(AuthMethod::EcdsaSha256P256),
            10 => Some(AuthMethod::EcdsaSha384P384),
            11 => Some(AuthMethod::EcdsaSha512P521),
            14 => Some(AuthMethod::DigitalSignature),
            _ => None,
        }
    }

    /// Convert to u8
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Authentication Payload body (RFC 7296 Section 3.8)
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Auth Method   |                RESERVED                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// ~                      Authentication Data                      ~
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// For the classic methods the authentication data is the raw signature.
/// For [`AuthMethod::DigitalSignature`] it is the RFC 7427 structure
/// produced by [`crate::codec::encode_auth_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    /// Authentication method
    pub auth_method: AuthMethod,

    /// Authentication data
    pub auth_data: Vec<u8>,
}

impl AuthPayload {
    /// Create new AUTH payload
    pub fn new(auth_method: AuthMethod, auth_data: Vec<u8>) -> Self {
        AuthPayload {
            auth_method,
            auth_data,
        }
    }

    /// Parse AUTH payload from data (without generic payload header)
    pub fn from_payload_data(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::MalformedAuthData(format!(
                "AUTH payload too short: {} bytes",
                data.len()
            )));
        }

        let auth_method = AuthMethod::from_u8(data[0]).ok_or_else(|| {
            Error::UnsupportedAlgorithm(format!("unknown auth method: {}", data[0]))
        })?;

        // Bytes 1-3 are reserved; auth data starts at byte 4
        let auth_data = data[4..].to_vec();

        Ok(AuthPayload {
            auth_method,
            auth_data,
        })
    }

    /// Serialize AUTH payload to bytes (without generic payload header)
    pub fn to_payload_data(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.auth_data.len());

        bytes.push(self.auth_method.to_u8());

        // Reserved (3 bytes of zeros)
        bytes.extend_from_slice(&[0u8, 0u8, 0u8]);

        bytes.extend_from_slice(&self.auth_data);

        bytes
    }
}
