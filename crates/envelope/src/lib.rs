//! Envelope encryption for structured records at rest.
//!
//! Each record is encrypted under a fresh per-record Data Encryption Key
//! (DEK), and the DEK is encrypted ("wrapped") under a long-lived master key.
//! The master key never touches bulk data.
//!
//! This crate is intentionally free of HTTP and storage dependencies. Callers
//! own the master key and the record store; they pass the key into every call.
//!
//! # Record format
//!
//! A flat JSON object; every binary field is lowercase hex:
//!
//! ```text
//! id, partyId, createdAt,
//! payload_nonce, payload_ct, payload_tag,      AES-256-GCM(DEK, payload)
//! dek_wrap_nonce, dek_wrapped, dek_wrap_tag,   AES-256-GCM(master key, DEK)
//! alg = "AES-256-GCM", mk_version = 1
//! ```
//!
//! `alg` and `mk_version` are checked on decrypt; unknown values are rejected
//! rather than assumed.

pub mod aead;
pub mod codec;
pub mod error;
pub mod key;
pub mod payload;
pub mod record;
pub mod validate;

pub use codec::EnvelopeCodec;
pub use error::EnvelopeError;
pub use key::{SecretKey, KEY_LEN};
pub use payload::{JsonCodec, PayloadCodec};
pub use record::{Opened, Record, ALG, MASTER_KEY_VERSION};
pub use validate::validate;

/// Encrypt `payload` with the default JSON payload codec.
///
/// See [`EnvelopeCodec::encrypt`].
pub fn encrypt(
    party_id: &str,
    payload: &serde_json::Value,
    master_key: &[u8],
) -> Result<Record, EnvelopeError> {
    EnvelopeCodec::new().encrypt(party_id, payload, master_key)
}

/// Decrypt `record` with the default JSON payload codec.
///
/// See [`EnvelopeCodec::decrypt`].
pub fn decrypt(record: &Record, master_key: &[u8]) -> Result<Opened, EnvelopeError> {
    EnvelopeCodec::new().decrypt(record, master_key)
}
