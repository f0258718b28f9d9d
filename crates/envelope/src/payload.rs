//! Serialisation boundary between JSON payloads and plaintext bytes.

use serde_json::{Map, Value};

/// Encodes a payload object to bytes before sealing and decodes it after opening.
///
/// `decode(encode(x))` must equal `x` for every JSON object; exact byte output
/// is not otherwise constrained.
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, payload: &Map<String, Value>) -> Result<Vec<u8>, serde_json::Error>;

    fn decode(&self, bytes: &[u8]) -> Result<Value, serde_json::Error>;
}

/// Compact JSON text via `serde_json`. Object key order is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn encode(&self, payload: &Map<String, Value>) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(payload)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
