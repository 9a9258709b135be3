#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use sqlx::PgPool;
use std::sync::Arc;
use url_shortener::api::handlers::{health_handler, redirect_handler};
use url_shortener::api::routes::url_routes;
use url_shortener::domain::entities::Mapping;
use url_shortener::domain::error::StoreError;
use url_shortener::domain::repositories::{MappingStore, MappingTransaction};
use url_shortener::infrastructure::persistence::{MemoryMappingStore, PgMappingStore};
use url_shortener::state::AppState;

/// State backed by a fresh in-memory store; the store handle is returned for
/// direct inspection.
pub fn create_memory_state() -> (AppState, MemoryMappingStore) {
    let store = MemoryMappingStore::new();
    (AppState::new(Arc::new(store.clone())), store)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(PgMappingStore::new(Arc::new(pool))))
}

/// All public routes, without the path-normalization wrapper.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .merge(url_routes())
        .route("/u/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Seeds a committed mapping through the store, bypassing the service.
pub async fn insert_raw(store: &dyn MappingStore, url: &str, code: &str) -> i64 {
    let mut tx = store.begin().await.unwrap();
    let id = tx.insert(url, "~seed").await.unwrap();
    tx.finalize_code(id, code).await.unwrap();
    tx.commit().await.unwrap();
    id
}

/// Store whose every operation fails as if the database were down.
pub struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn begin(&self) -> Result<Box<dyn MappingTransaction>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Mapping>, StoreError> {
        Err(unavailable())
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, StoreError> {
        Err(unavailable())
    }

    async fn delete_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

pub fn create_unavailable_state() -> AppState {
    AppState::new(Arc::new(UnavailableStore))
}
