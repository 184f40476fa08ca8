//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - Durable mapping record

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, StorageError};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
