//! In-process implementation of the mapping store.
//!
//! Mirrors the PostgreSQL store's contract: a monotonic id sequence that
//! advances even for rolled-back transactions, writes buffered per
//! transaction until commit, and a uniqueness check on `code` at commit time.
//! Data lives only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::Mapping;
use crate::domain::error::StoreError;
use crate::domain::repositories::{CODE_UNIQUE_CONSTRAINT, MappingStore, MappingTransaction};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Mapping>,
    ids_by_code: HashMap<String, i64>,
}

/// In-memory mapping store.
///
/// Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryMappingStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryMappingStore {
    /// Creates an empty store whose first id will be 1.
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }

    /// Number of committed mappings.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// Whether no mapping has been committed yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn begin(&self) -> Result<Box<dyn MappingTransaction>, StoreError> {
        Ok(Box::new(MemoryMappingTransaction {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .ids_by_code
            .get(code)
            .and_then(|id| state.rows.get(id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        match state.ids_by_code.remove(code) {
            Some(id) => {
                state.rows.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Buffered writes of one in-memory transaction.
///
/// Dropping it without [`MappingTransaction::commit`] discards the buffer.
pub struct MemoryMappingTransaction {
    state: Arc<Mutex<MemoryState>>,
    pending: Vec<Mapping>,
}

#[async_trait]
impl MappingTransaction for MemoryMappingTransaction {
    async fn insert(
        &mut self,
        original_url: &str,
        placeholder_code: &str,
    ) -> Result<i64, StoreError> {
        let id = {
            let mut state = self.state.lock().await;
            state.last_id += 1;
            state.last_id
        };

        self.pending.push(Mapping::new(
            id,
            original_url.to_string(),
            placeholder_code.to_string(),
            Utc::now(),
        ));

        Ok(id)
    }

    async fn finalize_code(&mut self, id: i64, code: &str) -> Result<Mapping, StoreError> {
        let row = self
            .pending
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::MissingRow { id })?;

        row.code = code.to_string();
        Ok(row.clone())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let Self { state, pending } = *self;
        let mut state = state.lock().await;

        let mut seen = HashMap::with_capacity(pending.len());
        for row in &pending {
            if state.ids_by_code.contains_key(&row.code) || seen.insert(&row.code, row.id).is_some()
            {
                return Err(StoreError::UniqueViolation {
                    constraint: CODE_UNIQUE_CONSTRAINT.to_string(),
                });
            }
        }
        drop(seen);

        for row in pending {
            state.ids_by_code.insert(row.code.clone(), row.id);
            state.rows.insert(row.id, row);
        }

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
