//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into mapping operations and maps their outcomes
//! to status codes. URL validation happens here, before the core is called.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
