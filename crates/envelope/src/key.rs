//! [`SecretKey`]: fixed-size key buffer for master keys and DEKs.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

use crate::error::EnvelopeError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
#[derive(Clone)]
pub struct SecretKey(Box<[u8; KEY_LEN]>);

impl SecretKey {
    /// Draw a fresh key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut buf[..]);
        Self(buf)
    }

    /// Copy key material out of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidKeyLength`] if the slice has the wrong length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        if bytes.len() != KEY_LEN {
            return Err(EnvelopeError::InvalidKeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Parse a 64-character hex string.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::InvalidInput`] if `s` is not valid hex, or
    /// [`EnvelopeError::InvalidKeyLength`] if it does not decode to [`KEY_LEN`] bytes.
    pub fn from_hex(s: &str) -> Result<Self, EnvelopeError> {
        let mut bytes = hex::decode(s.trim())
            .map_err(|_| EnvelopeError::InvalidInput("key is not valid hex".into()))?;
        let key = Self::from_slice(&bytes);
        wipe(&mut bytes);
        key
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        wipe(&mut self.0[..]);
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Overwrite a buffer holding secret material with zeroes.
pub(crate) fn wipe(buf: &mut [u8]) {
    buf.iter_mut().for_each(|b| *b = 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        assert!(matches!(
            SecretKey::from_slice(&[0u8; 16]),
            Err(EnvelopeError::InvalidKeyLength(16))
        ));
        assert!(SecretKey::from_slice(&[0u8; 33]).is_err());
        assert!(SecretKey::from_slice(&[0u8; KEY_LEN]).is_ok());
    }

    #[test]
    fn from_hex_parses_mixed_case() {
        let key = SecretKey::from_hex(&"aB".repeat(KEY_LEN)).unwrap();
        assert!(key.as_bytes().iter().all(|b| *b == 0xAB));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            SecretKey::from_hex("zz"),
            Err(EnvelopeError::InvalidInput(_))
        ));
        assert!(matches!(
            SecretKey::from_hex("abcd"),
            Err(EnvelopeError::InvalidKeyLength(2))
        ));
    }

    #[test]
    fn redacted_in_debug() {
        let key = SecretKey::from_slice(&[0xFF; KEY_LEN]).unwrap();
        let shown = format!("{key:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("255"));
    }
}
