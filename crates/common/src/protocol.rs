//! Request and response types exchanged over the public HTTP API.
//!
//! Records themselves and the decrypted view are defined by the `envelope`
//! crate; this module only carries the envelope around them.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /records`.
///
/// Both fields are optional at the wire level so that a missing field turns
/// into a `400 bad_request` with a clear message instead of a generic
/// deserialisation rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Opaque party / tenant tag stored alongside the record.
    #[serde(rename = "partyId", default)]
    pub party_id: Option<String>,
    /// Arbitrary JSON object to encrypt.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"`.
    pub status: String,
    /// Number of records currently held by the store.
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use serde_json::json;

    #[test]
    fn create_request_reads_camel_case_party_id() {
        let req: CreateRecordRequest = serde_json::from_value(json!({
            "partyId": "party_123",
            "payload": {"amount": 100}
        }))
        .unwrap();
        assert_eq!(req.party_id.as_deref(), Some("party_123"));
        assert_eq!(req.payload.unwrap()["amount"], 100);
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateRecordRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.party_id.is_none());
        assert!(req.payload.is_none());
    }

    #[test]
    fn error_response_from_service_error() {
        let e = ErrorResponse::from(&ServiceError::NotFound("record abc".into()));
        assert_eq!(e.code, "not_found");
        assert!(e.message.contains("record abc"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            records: 3,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.records, 3);
    }
}
