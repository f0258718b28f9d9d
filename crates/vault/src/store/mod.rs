//! Record storage capability injected into the HTTP layer.
//!
//! The envelope codec never touches storage; handlers `put` what
//! [`envelope::encrypt`] returns and `get` what [`envelope::decrypt`] consumes.

pub mod memory;

pub use memory::MemoryStore;

use envelope::Record;

/// Key → record map owned by the service.
///
/// Implementations must be safe to share across request handlers. Records
/// are immutable once stored; `put` with an existing id replaces the entry.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Store `record` under its id.
    fn put(&self, record: Record);

    /// Look up a record by id.
    fn get(&self, id: &str) -> Option<Record>;

    /// Number of records held.
    fn len(&self) -> usize;
}
