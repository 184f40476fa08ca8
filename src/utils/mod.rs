//! Utility functions shared across layers.
//!
//! - [`key_generator`] - Random short key generation
//! - [`db_error`] - Classification of database errors

pub mod db_error;
pub mod key_generator;
