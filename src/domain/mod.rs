//! Domain layer containing the mapping entity, store contracts, and errors.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Mapping`] record
//! - [`repositories`] - [`repositories::MappingStore`] and its transaction handle
//! - [`error`] - [`error::StoreError`] and [`error::MappingError`]
//!
//! Uniqueness and atomicity are delegated entirely to the store's
//! transactions. Nothing in this layer holds shared mutable state.

pub mod entities;
pub mod error;
pub mod repositories;
