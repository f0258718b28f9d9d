//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use envelope::{EnvelopeCodec, SecretKey};

use crate::store::{MemoryStore, RecordStore};

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or zero-sized) so that
/// Axum can clone the state for each request without copying key material.
#[derive(Clone)]
pub struct AppState {
    /// Record store shared by every handler.
    pub store: Arc<dyn RecordStore>,
    /// Master key passed explicitly into every envelope call.
    pub master_key: Arc<SecretKey>,
    /// Stateless envelope codec.
    pub codec: EnvelopeCodec,
}

impl AppState {
    /// Create a new [`AppState`] from a store and the master key.
    pub fn new(store: Arc<dyn RecordStore>, master_key: SecretKey) -> Self {
        Self {
            store,
            master_key: Arc::new(master_key),
            codec: EnvelopeCodec::new(),
        }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with an empty [`MemoryStore`] and a random
    /// master key, suitable for tests.
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()), SecretKey::generate())
    }
}
