//! Short-code creation, resolution, and deletion.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::domain::entities::Mapping;
use crate::domain::error::{MappingError, StoreError};
use crate::domain::repositories::{MappingStore, MappingTransaction};
use crate::utils::base62;

/// Progress of a create-mapping operation.
///
/// `Started -> IdAllocated -> CodeAssigned -> Committed`. A failure at any
/// stage before `Committed` rolls the transaction back; the stage reached is
/// reported in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStage {
    Started,
    IdAllocated,
    CodeAssigned,
    Committed,
}

/// Orchestrates the mapping store and the base-62 encoder.
///
/// Holds no mutable state of its own: id uniqueness comes from the store's
/// sequence, code uniqueness from the encoder being injective, and atomicity
/// from the store's transactions.
pub struct MappingService {
    store: Arc<dyn MappingStore>,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Creates a mapping for an already validated URL.
    ///
    /// Inserts a row under a temporary code to obtain its id, replaces the
    /// code with `base62(id)`, and commits both in one transaction. The
    /// mapping is visible to readers only once the commit succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Persistence`] if the store fails at any step;
    /// the transaction is rolled back and no part of the mapping is visible.
    ///
    /// Returns [`MappingError::InvariantViolation`] if the store assigns a
    /// negative id, loses the inserted row, or rejects the derived code as a
    /// duplicate.
    pub async fn create_mapping(&self, original_url: &str) -> Result<Mapping, MappingError> {
        let mut tx = self.store.begin().await.map_err(|e| {
            error!(stage = ?CreationStage::Started, error = %e, "Failed to open creation transaction");
            MappingError::Persistence(e)
        })?;

        let mut stage = CreationStage::Started;
        let assigned = assign_code(tx.as_mut(), original_url, &mut stage).await;
        let mapping = match assigned {
            Ok(mapping) => mapping,
            Err(err) => {
                if let Err(e) = tx.rollback().await {
                    warn!(error = %e, "Rollback of aborted creation failed");
                }
                return Err(log_abort(stage, err));
            }
        };

        // a failed commit leaves nothing behind
        if let Err(e) = tx.commit().await {
            return Err(log_abort(stage, classify_write_error(e)));
        }
        stage = CreationStage::Committed;

        info!(id = mapping.id, code = %mapping.code, ?stage, "Mapping created");
        Ok(mapping)
    }

    /// Resolves a short code to its mapping.
    ///
    /// Codes that are not canonical base-62 can never have been issued and
    /// resolve to `NotFound` without touching the store.
    ///
    /// # Errors
    ///
    /// - [`MappingError::NotFound`] if no committed mapping has this code
    /// - [`MappingError::Persistence`] if the lookup fails
    /// - [`MappingError::InvariantViolation`] if the stored code is not the
    ///   encoding of the stored id
    pub async fn resolve_code(&self, code: &str) -> Result<Mapping, MappingError> {
        if let Err(reason) = base62::decode(code) {
            debug!(code, %reason, "Rejected non-canonical code");
            return Err(MappingError::not_found(code));
        }

        let mapping = self
            .store
            .find_by_code(code)
            .await
            .map_err(|e| {
                error!(code, error = %e, "Failed to resolve code");
                MappingError::Persistence(e)
            })?
            .ok_or_else(|| {
                debug!(code, "Code not found");
                MappingError::not_found(code)
            })?;

        if !mapping.has_canonical_code() {
            error!(
                invariant_violation = true,
                id = mapping.id,
                code = %mapping.code,
                "Stored code does not encode its id"
            );
            return Err(MappingError::invariant(format!(
                "mapping {} carries code '{}'",
                mapping.id, mapping.code
            )));
        }

        Ok(mapping)
    }

    /// Lists every committed mapping ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Persistence`] on store errors.
    pub async fn list_mappings(&self) -> Result<Vec<Mapping>, MappingError> {
        self.store.list_all().await.map_err(|e| {
            error!(error = %e, "Failed to list mappings");
            MappingError::Persistence(e)
        })
    }

    /// Deletes the mapping with this code.
    ///
    /// Deleting a code that is already gone is `NotFound`, not an error, so
    /// repeating a delete is harmless.
    ///
    /// # Errors
    ///
    /// - [`MappingError::NotFound`] if no mapping has this code
    /// - [`MappingError::Persistence`] if the delete fails
    pub async fn delete_mapping(&self, code: &str) -> Result<(), MappingError> {
        if !base62::is_canonical(code) {
            return Err(MappingError::not_found(code));
        }

        let deleted = self.store.delete_by_code(code).await.map_err(|e| {
            error!(code, error = %e, "Failed to delete mapping");
            MappingError::Persistence(e)
        })?;

        if !deleted {
            debug!(code, "Nothing to delete");
            return Err(MappingError::not_found(code));
        }

        info!(code, "Mapping deleted");
        Ok(())
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Persistence`] if the store does not answer.
    pub async fn health_check(&self) -> Result<(), MappingError> {
        self.store.ping().await.map_err(MappingError::Persistence)
    }
}

/// Runs the `Started -> IdAllocated -> CodeAssigned` part of a creation
/// inside an open transaction.
async fn assign_code(
    tx: &mut dyn MappingTransaction,
    original_url: &str,
    stage: &mut CreationStage,
) -> Result<Mapping, MappingError> {
    let id = tx
        .insert(original_url, &placeholder_code())
        .await
        .map_err(MappingError::Persistence)?;
    *stage = CreationStage::IdAllocated;

    let code = u64::try_from(id)
        .map(base62::encode)
        .map_err(|_| MappingError::invariant(format!("store assigned negative id {id}")))?;

    let mapping = tx
        .finalize_code(id, &code)
        .await
        .map_err(classify_write_error)?;
    *stage = CreationStage::CodeAssigned;

    if mapping.id != id || mapping.code != code {
        return Err(MappingError::invariant(format!(
            "finalized row {} carries code '{}', expected {id} with '{code}'",
            mapping.id, mapping.code
        )));
    }

    Ok(mapping)
}

/// Maps a store error raised once the real code is in play.
///
/// Encoding is injective and ids are unique, so a code collision or a lost
/// row at this point is a bug rather than a transient failure.
fn classify_write_error(e: StoreError) -> MappingError {
    if e.is_code_collision() {
        return MappingError::invariant(format!("derived code collided: {e}"));
    }

    match e {
        StoreError::MissingRow { id } => {
            MappingError::invariant(format!("row {id} vanished before commit"))
        }
        other => MappingError::Persistence(other),
    }
}

fn log_abort(stage: CreationStage, err: MappingError) -> MappingError {
    match &err {
        MappingError::InvariantViolation(detail) => {
            error!(invariant_violation = true, ?stage, %detail, "Mapping creation aborted");
        }
        other => {
            error!(?stage, error = %other, "Mapping creation aborted");
        }
    }
    err
}

/// Temporary code held by a row between insert and finalize.
///
/// Starts with `~`, which is outside the base-62 alphabet, so it can neither
/// collide with a real code nor be resolved. The random suffix keeps
/// concurrent creations from contending on the code constraint.
fn placeholder_code() -> String {
    format!("~{:016x}", rand::rng().random::<u64>())
}
