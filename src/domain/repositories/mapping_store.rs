//! Store contract for short-code mappings.

use crate::domain::entities::Mapping;
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// Name of the uniqueness constraint on `urls.code`.
///
/// Every store reports code collisions under this name so callers can tell
/// them apart from other constraint failures.
pub const CODE_UNIQUE_CONSTRAINT: &str = "urls_code_key";

/// Durable storage of mappings with code uniqueness.
///
/// Creation goes through [`MappingStore::begin`]: the returned transaction
/// allocates the id, finalizes the code, and commits both together. Reads and
/// deletes are single-shot operations with read-committed visibility.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryMappingStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Opens a write transaction for creating one mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if no connection can be acquired.
    async fn begin(&self) -> Result<Box<dyn MappingTransaction>, StoreError>;

    /// Looks up a committed mapping by its code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Mapping))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError>;

    /// Returns every committed mapping ordered by id.
    async fn list_all(&self) -> Result<Vec<Mapping>, StoreError>;

    /// Removes the mapping with this code in its own transaction.
    ///
    /// Returns `Ok(true)` if a row was removed and `Ok(false)` if none matched.
    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// An open write transaction on a [`MappingStore`].
///
/// Nothing written through the handle is visible to other readers until
/// [`MappingTransaction::commit`] succeeds. Dropping the handle without
/// committing discards every write, which makes cancellation safe.
#[async_trait]
pub trait MappingTransaction: Send {
    /// Inserts a row carrying a temporary code and returns its assigned id.
    ///
    /// Ids come from a sequence that never hands out the same value twice,
    /// even if this transaction later rolls back.
    async fn insert(&mut self, original_url: &str, placeholder_code: &str)
    -> Result<i64, StoreError>;

    /// Replaces the temporary code of row `id` and returns the row as it will
    /// be committed.
    async fn finalize_code(&mut self, id: i64, code: &str) -> Result<Mapping, StoreError>;

    /// Makes every write of this transaction visible atomically.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    /// Discards every write of this transaction.
    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
