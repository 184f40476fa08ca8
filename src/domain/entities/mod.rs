//! Core domain entities.
//!
//! - [`Mapping`] - A short key paired with its original URL

pub mod mapping;

pub use mapping::Mapping;
