//! Structured logging for authentication exchanges
//!
//! Contextual logging using the `tracing` framework. Message wording is
//! stable so operators can grep for it; context travels in structured
//! fields.

use tracing::{debug, info, trace, warn};

use crate::params::KeyType;

/// Log the outcome of authenticating ourselves to the peer
pub fn log_local_auth(id: &str, scheme: &str, success: bool) {
    info!(
        id = %id,
        scheme = %scheme,
        "authentication of myself {}",
        if success { "successful" } else { "failed" }
    );
}

/// Log successful verification of the peer's authentication
pub fn log_peer_auth_success(id: &str, scheme: &str) {
    info!(id = %id, scheme = %scheme, "authentication of peer successful");
}

/// Log a single trust anchor failing verification before trying the next one
pub fn log_verify_retry(id: &str) {
    debug!(id = %id, "signature validation failed, looking for another key");
}

/// Log that no trusted public key of the asserted type was found
pub fn log_no_trusted_key(key_type: KeyType, id: &str) {
    warn!(%key_type, id = %id, "no trusted public key found");
}

/// Log received or produced authentication data at trace level
pub fn log_auth_data(direction: &str, method: u8, data: &[u8]) {
    trace!(
        direction = %direction,
        auth_method = method,
        auth_data = %hex::encode(data),
        "authentication data"
    );
}
