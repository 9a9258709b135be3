//! Helper functions used across the application.
//!
//! - [`base62`] - Short code encoding and decoding
//! - [`url_validation`] - Checks on URLs submitted for shortening

pub mod base62;
pub mod url_validation;
