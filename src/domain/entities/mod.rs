//! Core domain entities.
//!
//! The service has a single entity, [`Mapping`], created by
//! [`crate::application::services::MappingService::create_mapping`] and never
//! updated afterwards.

pub mod mapping;

pub use mapping::Mapping;
