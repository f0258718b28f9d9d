//! Envelope codec: two layered AEAD calls per record.
//!
//! ```text
//! payload --(PayloadCodec)--> bytes --seal(DEK)--------> payload_{nonce,ct,tag}
//! DEK ------------------------------seal(master key)--> dek_{wrap_nonce,wrapped,wrap_tag}
//! ```
//!
//! A fresh DEK is drawn for every record and never leaves the call that
//! created or unwrapped it.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::aead::{self, AeadError};
use crate::error::EnvelopeError;
use crate::key::{wipe, SecretKey, KEY_LEN};
use crate::payload::{JsonCodec, PayloadCodec};
use crate::record::{Opened, Record, ALG, MASTER_KEY_VERSION};
use crate::validate::validate;

/// Byte length of a record id before hex encoding (128 bits).
pub const RECORD_ID_LEN: usize = 16;

/// Encrypts payloads into [`Record`]s and opens them again.
///
/// Holds no key material and no mutable state; a single instance may be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCodec<C = JsonCodec> {
    payload_codec: C,
}

impl EnvelopeCodec<JsonCodec> {
    /// Create a codec that serialises payloads as JSON text.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: PayloadCodec> EnvelopeCodec<C> {
    /// Create a codec with a custom payload serialisation.
    pub fn with_payload_codec(payload_codec: C) -> Self {
        Self { payload_codec }
    }

    /// Encrypt `payload` for `party_id` under a fresh DEK wrapped by `master_key`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidKeyLength`] if `master_key` is not
    /// [`KEY_LEN`] bytes, and [`EnvelopeError::InvalidInput`] if `party_id` is
    /// empty or `payload` is not a JSON object.
    #[instrument(level = "debug", skip_all)]
    pub fn encrypt(
        &self,
        party_id: &str,
        payload: &Value,
        master_key: &[u8],
    ) -> Result<Record, EnvelopeError> {
        check_master_key(master_key)?;
        if party_id.is_empty() {
            return Err(EnvelopeError::InvalidInput("partyId must not be empty".into()));
        }
        let object = payload.as_object().ok_or_else(|| {
            EnvelopeError::InvalidInput("payload must be a JSON object".into())
        })?;

        let dek = SecretKey::generate();

        let mut plaintext = self.payload_codec.encode(object).map_err(|e| {
            EnvelopeError::InternalInconsistency(format!("payload encoding failed: {e}"))
        })?;
        let payload_layer = aead::seal(dek.as_bytes(), &plaintext);
        wipe(&mut plaintext);
        let payload_layer = payload_layer.map_err(seal_error)?;

        let wrap_layer = aead::seal(master_key, dek.as_bytes()).map_err(seal_error)?;
        drop(dek);

        let record = Record {
            id: new_record_id(),
            party_id: party_id.to_owned(),
            created_at: Utc::now(),
            payload_nonce: hex::encode(payload_layer.nonce),
            payload_ct: hex::encode(&payload_layer.ciphertext),
            payload_tag: hex::encode(payload_layer.tag),
            dek_wrap_nonce: hex::encode(wrap_layer.nonce),
            dek_wrapped: hex::encode(&wrap_layer.ciphertext),
            dek_wrap_tag: hex::encode(wrap_layer.tag),
            alg: ALG.to_owned(),
            mk_version: MASTER_KEY_VERSION,
        };
        debug!(record_id = %record.id, "record sealed");
        Ok(record)
    }

    /// Unwrap the DEK of `record` with `master_key` and decrypt its payload.
    ///
    /// The record is validated before any key is used and is never modified.
    ///
    /// # Errors
    ///
    /// - [`EnvelopeError::InvalidKeyLength`] if `master_key` is not [`KEY_LEN`] bytes.
    /// - [`EnvelopeError::UnsupportedAlgorithm`] / [`EnvelopeError::UnsupportedKeyVersion`]
    ///   if the record was produced by a scheme this build does not know.
    /// - [`EnvelopeError::MalformedRecord`] if a binary field fails validation.
    /// - [`EnvelopeError::DekUnwrapFailure`] on a wrong master key or corrupted wrap fields.
    /// - [`EnvelopeError::PayloadDecryptFailure`] on corrupted payload fields.
    /// - [`EnvelopeError::InternalInconsistency`] if authenticated data does not decode.
    #[instrument(level = "debug", skip_all, fields(record_id = %record.id))]
    pub fn decrypt(&self, record: &Record, master_key: &[u8]) -> Result<Opened, EnvelopeError> {
        check_master_key(master_key)?;
        check_scheme(record)?;
        let fields = validate(record)?;

        let mut dek_bytes = aead::open(
            master_key,
            &fields.dek_wrap_nonce,
            &fields.dek_wrapped,
            &fields.dek_wrap_tag,
        )
        .map_err(|e| open_error(e, EnvelopeError::DekUnwrapFailure))?;
        let dek = SecretKey::from_slice(&dek_bytes);
        wipe(&mut dek_bytes);
        let dek = dek.map_err(|_| {
            error!(got = dek_bytes.len(), "authenticated DEK has wrong length");
            EnvelopeError::InternalInconsistency("unwrapped DEK has wrong length".into())
        })?;

        let mut plaintext = aead::open(
            dek.as_bytes(),
            &fields.payload_nonce,
            &fields.payload_ct,
            &fields.payload_tag,
        )
        .map_err(|e| open_error(e, EnvelopeError::PayloadDecryptFailure))?;
        drop(dek);

        let decoded = self.payload_codec.decode(&plaintext);
        wipe(&mut plaintext);
        let payload = match decoded {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => {
                error!("authenticated payload is not a JSON object");
                return Err(EnvelopeError::InternalInconsistency(
                    "decrypted payload is not a JSON object".into(),
                ));
            }
            Err(e) => {
                error!(error = %e, "authenticated payload failed to decode");
                return Err(EnvelopeError::InternalInconsistency(format!(
                    "decrypted payload failed to decode: {e}"
                )));
            }
        };

        Ok(Opened {
            id: record.id.clone(),
            party_id: record.party_id.clone(),
            payload,
        })
    }
}

fn check_master_key(master_key: &[u8]) -> Result<(), EnvelopeError> {
    if master_key.len() != KEY_LEN {
        return Err(EnvelopeError::InvalidKeyLength(master_key.len()));
    }
    Ok(())
}

fn check_scheme(record: &Record) -> Result<(), EnvelopeError> {
    if record.alg != ALG {
        return Err(EnvelopeError::UnsupportedAlgorithm(record.alg.clone()));
    }
    if record.mk_version != MASTER_KEY_VERSION {
        return Err(EnvelopeError::UnsupportedKeyVersion(record.mk_version));
    }
    Ok(())
}

fn seal_error(e: AeadError) -> EnvelopeError {
    match e {
        AeadError::InvalidKeyLength(len) => EnvelopeError::InvalidKeyLength(len),
        AeadError::AuthenticationFailure => {
            EnvelopeError::InternalInconsistency("aead seal failed".into())
        }
    }
}

fn open_error(e: AeadError, on_auth_failure: EnvelopeError) -> EnvelopeError {
    match e {
        AeadError::InvalidKeyLength(len) => EnvelopeError::InvalidKeyLength(len),
        AeadError::AuthenticationFailure => on_auth_failure,
    }
}

fn new_record_id() -> String {
    let mut id = [0u8; RECORD_ID_LEN];
    OsRng.fill_bytes(&mut id);
    hex::encode(id)
}
