//! Application layer services.
//!
//! Services compose the store traits and the encoder into the externally
//! visible operations, and are what HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Create, resolve, list, and delete mappings

pub mod services;
