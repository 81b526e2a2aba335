//! IKEv2 public key authentication.
//!
//! This crate implements mutual, signature-based authentication of the two
//! endpoints of an IKE security association:
//!
//! - **Classic auth methods** (RFC 7296 Section 3.8) - fixed method codes
//!   that imply one specific signature algorithm (RSA/SHA-1, ECDSA-256/384/521)
//! - **Digital Signature authentication** (RFC 7427) - a generic method code
//!   carrying a self-describing, DER-encoded algorithm identifier, allowing
//!   hash and padding negotiation between peers
//!
//! The crate decides which signature scheme to use (from local configuration,
//! key properties and the peer's advertised hash support), encodes and decodes
//! the RFC 7427 wire representation, and drives the signing and verification
//! workflow including trust anchor enumeration.
//!
//! # Architecture
//!
//! ```text
//! PubkeySigner / PubkeyVerifier (authenticator)
//!   ├── Scheme Selector        (generic path candidate list)
//!   ├── Classic Scheme Resolver (legacy path, fixed mapping)
//!   ├── Auth-Data Codec        (RFC 7427 length + AlgorithmIdentifier)
//!   └── Collaborators (traits) - IKE SA view, keymat, credential store,
//!                                private/public key handles
//! ```
//!
//! Key derivation ("signed octets"), credential resolution and the raw
//! cryptographic primitives are external collaborators, modeled as traits in
//! [`traits`]. The authenticator is invoked once per direction per IKE_AUTH
//! exchange, synchronously, on the session's own processing context.
//!
//! # Example
//!
//! ```no_run
//! use ikev2_pubkey_auth::{ExchangeAuthenticator, PubkeySigner, Settings};
//! # use ikev2_pubkey_auth::traits::{IkeSession, Keymat, CredentialStore};
//! # fn demo(session: &mut dyn IkeSession, keymat: &dyn Keymat,
//! #         creds: &dyn CredentialStore, nonce: &[u8], init: &[u8]) {
//! let mut signer = PubkeySigner::new(
//!     session, keymat, creds, Settings::default(),
//!     nonce,          // nonce received from the peer
//!     init,           // IKE_SA_INIT message we sent
//!     [0u8; 3],       // reserved bytes of our ID payload
//! );
//! match signer.build() {
//!     Ok(payload) => { /* attach payload to the outgoing IKE_AUTH message */ }
//!     Err(e) => eprintln!("authentication failed: {}", e),
//! }
//! # }
//! ```
//!
//! # References
//!
//! - [RFC 7296](https://datatracker.ietf.org/doc/html/rfc7296) - IKEv2
//! - [RFC 7427](https://datatracker.ietf.org/doc/html/rfc7427) - Signature
//!   Authentication in IKEv2
//! - [RFC 8017](https://datatracker.ietf.org/doc/html/rfc8017) - RSASSA-PSS
//! - [RFC 8420](https://datatracker.ietf.org/doc/html/rfc8420) - EdDSA in IKEv2

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod authenticator;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod params;
pub mod payload;
pub mod schemes;
pub mod select;
pub mod traits;

pub use authenticator::{ExchangeAuthenticator, PubkeySigner, PubkeyVerifier};
pub use codec::{decode_auth_data, encode_auth_data, DecodedAuthData};
pub use config::{AuthClass, AuthConfig, AuthRule, Settings};
pub use error::{Error, Result};
pub use params::{
    CandidateList, HashAlgorithm, KeyType, RsaPssParams, SignatureParams, SignatureScheme,
};
pub use payload::{AuthMethod, AuthPayload};
pub use schemes::{classic_scheme_for_key, default_schemes_for_key};
pub use select::select_signature_schemes;
pub use traits::{CredentialStore, IkeSession, Keymat, PrivateKey, PublicKey};
