//! The persisted/transmitted [`Record`] and the decrypted [`Opened`] view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Algorithm tag written into every record.
pub const ALG: &str = "AES-256-GCM";

/// Master key generation written into every record.
pub const MASTER_KEY_VERSION: u32 = 1;

/// An envelope-encrypted record.
///
/// Serialises to a flat JSON object; all binary fields are lowercase hex.
/// Records are only produced by [`encrypt`](crate::encrypt) and are never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 128-bit random identifier, 32 hex characters.
    pub id: String,
    /// Caller-supplied party tag, echoed back on decrypt.
    #[serde(rename = "partyId")]
    pub party_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    pub payload_nonce: String,
    pub payload_ct: String,
    pub payload_tag: String,

    pub dek_wrap_nonce: String,
    pub dek_wrapped: String,
    pub dek_wrap_tag: String,

    pub alg: String,
    pub mk_version: u32,
}

/// Result of a successful [`decrypt`](crate::decrypt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opened {
    pub id: String,
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub payload: serde_json::Value,
}
