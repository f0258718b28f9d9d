//! AES-256-GCM seal/open with a detached authentication tag.
//!
//! Every call to [`seal`] draws a fresh 96-bit nonce from the OS CSPRNG.
//! **Never derive the nonce from the input or reuse one under the same key.**
//! GCM nonce reuse is catastrophic: it breaks both confidentiality and
//! authentication.
//!
//! Associated data is always empty; the tag covers the key, nonce and
//! ciphertext only.

use aes_gcm::{
    aead::{AeadCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Nonce, Tag,
};
use thiserror::Error;

use crate::key::{wipe, KEY_LEN};

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Output of a single [`seal`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Random nonce used for this call.
    pub nonce: [u8; NONCE_LEN],
    /// Detached authentication tag.
    pub tag: [u8; TAG_LEN],
}

/// Errors produced by the AEAD layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AeadError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The tag did not verify against the key, nonce and ciphertext.
    #[error("authentication failed")]
    AuthenticationFailure,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
///
/// # Errors
///
/// Returns [`AeadError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Sealed, AeadError> {
    let cipher = build_cipher(key)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        // Only reachable for plaintexts beyond the GCM length limit (~64 GiB).
        .map_err(|_| AeadError::AuthenticationFailure)?;

    Ok(Sealed {
        ciphertext: buffer,
        nonce: nonce.into(),
        tag: tag.into(),
    })
}

/// Decrypt and authenticate `ciphertext`.
///
/// Nothing is returned unless the tag verifies; on failure the working buffer
/// is wiped before it is dropped.
///
/// # Errors
///
/// Returns [`AeadError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`AeadError::AuthenticationFailure`] on a wrong key or tampered input.
pub fn open(
    key: &[u8],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>, AeadError> {
    let cipher = build_cipher(key)?;

    let mut buffer = ciphertext.to_vec();
    match cipher.decrypt_in_place_detached(
        Nonce::from_slice(nonce),
        b"",
        &mut buffer,
        Tag::from_slice(tag),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            wipe(&mut buffer);
            Err(AeadError::AuthenticationFailure)
        }
    }
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, AeadError> {
    if key.len() != KEY_LEN {
        return Err(AeadError::InvalidKeyLength(key.len()));
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| AeadError::InvalidKeyLength(key.len()))
}
