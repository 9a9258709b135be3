//! Store trait definitions for the domain layer.
//!
//! Traits define the contract; implementations live in
//! `crate::infrastructure::persistence`. A `mockall` mock of
//! [`MappingStore`] is generated for unit tests.

pub mod mapping_store;

pub use mapping_store::{CODE_UNIQUE_CONSTRAINT, MappingStore, MappingTransaction};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
