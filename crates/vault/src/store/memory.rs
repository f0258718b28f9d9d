//! [`MemoryStore`]: process-local record map with no eviction or persistence.

use std::{collections::HashMap, sync::Arc};

use envelope::Record;
use parking_lot::RwLock;

use super::RecordStore;

/// Thread-safe in-memory [`RecordStore`].
///
/// Cloning is cheap and every clone shares the same map, so handlers see
/// each other's writes immediately.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Record>>>,
}

impl MemoryStore {
    /// Create a new, empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn put(&self, record: Record) {
        self.inner.write().insert(record.id.clone(), record);
    }

    fn get(&self, id: &str) -> Option<Record> {
        self.inner.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}
