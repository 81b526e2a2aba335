//! Error types for IKEv2 public key authentication
//!
//! Authentication outcomes are reported as explicit values, not panics:
//! `Ok` is terminal success, and each error variant maps to one of the
//! failure classes the surrounding exchange logic distinguishes.

use std::fmt;

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, Error>;

/// Authentication errors
///
/// The variants group into three failure classes the caller reports
/// differently:
///
/// - **Not found**: [`Error::NotFound`] - no usable local private key when
///   signing, or zero candidate trust anchors when verifying
/// - **Failed**: [`Error::AuthenticationFailed`] - no common algorithm,
///   sign/verify rejected every candidate, or the signed octets could not
///   be derived
/// - **Invalid argument**: [`Error::MalformedAuthData`] and
///   [`Error::UnsupportedAlgorithm`] - the incoming payload is structurally
///   broken vs. well-formed but referencing an algorithm we do not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No usable key material (private key or trust anchor)
    NotFound(String),

    /// Authentication failed (negotiation or cryptographic failure)
    AuthenticationFailed(String),

    /// Incoming authentication data is structurally malformed
    MalformedAuthData(String),

    /// Well-formed data referencing an unrecognized or unsupported algorithm
    UnsupportedAlgorithm(String),

    /// Internal error (should not happen)
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            Error::MalformedAuthData(msg) => {
                write!(f, "Malformed authentication data: {}", msg)
            }
            Error::UnsupportedAlgorithm(msg) => {
                write!(f, "Unsupported algorithm: {}", msg)
            }
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
