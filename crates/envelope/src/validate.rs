//! Validation gate run over a [`Record`] before any key material is touched.
//!
//! Corrupted or forged records are rejected here deterministically, without
//! handing attacker-controlled lengths to the AEAD primitive. The gate is a
//! pure function of the record's string fields.

use crate::aead::{NONCE_LEN, TAG_LEN};
use crate::error::EnvelopeError;
use crate::record::Record;

/// Decoded binary fields of a record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub payload_nonce: [u8; NONCE_LEN],
    pub payload_ct: Vec<u8>,
    pub payload_tag: [u8; TAG_LEN],
    pub dek_wrap_nonce: [u8; NONCE_LEN],
    pub dek_wrapped: Vec<u8>,
    pub dek_wrap_tag: [u8; TAG_LEN],
}

/// Check and decode the six binary fields of `record`.
///
/// Every field must be even-length hex (either case). Nonces must decode to
/// [`NONCE_LEN`] bytes and tags to [`TAG_LEN`] bytes. Ciphertexts may have any
/// length, including zero.
///
/// # Errors
///
/// Returns [`EnvelopeError::MalformedRecord`] naming the first offending field.
pub fn validate(record: &Record) -> Result<RecordFields, EnvelopeError> {
    let payload_nonce = decode_hex("payload_nonce", &record.payload_nonce)?;
    let payload_ct = decode_hex("payload_ct", &record.payload_ct)?;
    let payload_tag = decode_hex("payload_tag", &record.payload_tag)?;
    let dek_wrap_nonce = decode_hex("dek_wrap_nonce", &record.dek_wrap_nonce)?;
    let dek_wrapped = decode_hex("dek_wrapped", &record.dek_wrapped)?;
    let dek_wrap_tag = decode_hex("dek_wrap_tag", &record.dek_wrap_tag)?;

    Ok(RecordFields {
        payload_nonce: fixed("payload_nonce", &payload_nonce)?,
        dek_wrap_nonce: fixed("dek_wrap_nonce", &dek_wrap_nonce)?,
        payload_tag: fixed("payload_tag", &payload_tag)?,
        dek_wrap_tag: fixed("dek_wrap_tag", &dek_wrap_tag)?,
        payload_ct,
        dek_wrapped,
    })
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, EnvelopeError> {
    hex::decode(value).map_err(|e| {
        let reason = match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                format!("contains non-hex character {c:?} at {index}")
            }
            hex::FromHexError::OddLength => "has odd hex length".to_owned(),
            other => other.to_string(),
        };
        EnvelopeError::MalformedRecord { field, reason }
    })
}

fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], EnvelopeError> {
    bytes
        .try_into()
        .map_err(|_| EnvelopeError::MalformedRecord {
            field,
            reason: format!("must decode to {} bytes, got {}", N, bytes.len()),
        })
}
