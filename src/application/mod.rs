//! Application layer services implementing business logic.
//!
//! This layer orchestrates the key generator and both stores. Services
//! consume traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Short key creation and resolution

pub mod services;
