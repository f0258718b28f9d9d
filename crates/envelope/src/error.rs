//! Error type for the envelope codec.

use thiserror::Error;

use crate::key::KEY_LEN;

/// Errors produced by [`encrypt`](crate::encrypt) and [`decrypt`](crate::decrypt).
///
/// Every variant is deterministic for a given input; none is worth retrying.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The master key is not [`KEY_LEN`] bytes.
    #[error("invalid master key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Caller precondition violated (empty party id, payload not an object).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A binary record field failed hex or length validation.
    #[error("malformed record: `{field}` {reason}")]
    MalformedRecord {
        /// Wire name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The record names an algorithm this build does not implement.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The record was wrapped under a master key generation we do not hold.
    #[error("unsupported master key version: {0}")]
    UnsupportedKeyVersion(u32),

    /// The wrapped DEK did not authenticate under the master key.
    #[error("failed to unwrap data encryption key")]
    DekUnwrapFailure,

    /// The payload did not authenticate under the unwrapped DEK.
    #[error("failed to decrypt payload")]
    PayloadDecryptFailure,

    /// Authenticated data that cannot have come from [`encrypt`](crate::encrypt).
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl EnvelopeError {
    /// Returns `true` for either authentication failure layer.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            EnvelopeError::DekUnwrapFailure | EnvelopeError::PayloadDecryptFailure
        )
    }

    /// Short, stable name of the variant, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            EnvelopeError::InvalidKeyLength(_) => "invalid_key_length",
            EnvelopeError::InvalidInput(_) => "invalid_input",
            EnvelopeError::MalformedRecord { .. } => "malformed_record",
            EnvelopeError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            EnvelopeError::UnsupportedKeyVersion(_) => "unsupported_key_version",
            EnvelopeError::DekUnwrapFailure => "dek_unwrap_failure",
            EnvelopeError::PayloadDecryptFailure => "payload_decrypt_failure",
            EnvelopeError::InternalInconsistency(_) => "internal_inconsistency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_names_field() {
        let e = EnvelopeError::MalformedRecord {
            field: "payload_nonce",
            reason: "must decode to 12 bytes, got 11".into(),
        };
        assert!(e.to_string().contains("payload_nonce"));
        assert_eq!(e.kind(), "malformed_record");
    }

    #[test]
    fn authentication_failures_classified() {
        assert!(EnvelopeError::DekUnwrapFailure.is_authentication_failure());
        assert!(EnvelopeError::PayloadDecryptFailure.is_authentication_failure());
        assert!(!EnvelopeError::InvalidKeyLength(16).is_authentication_failure());
    }
}
