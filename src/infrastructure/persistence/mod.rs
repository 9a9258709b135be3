//! Mapping store implementations.
//!
//! - [`PgMappingStore`] - PostgreSQL via SQLx, the production backend
//! - [`MemoryMappingStore`] - In-process store with the same transactional contract

pub mod db_error;
pub mod memory_mapping_store;
pub mod pg_mapping_store;

pub use memory_mapping_store::{MemoryMappingStore, MemoryMappingTransaction};
pub use pg_mapping_store::{PgMappingStore, PgMappingTransaction};
