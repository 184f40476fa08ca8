//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::application::services::MappingService;

/// Application state cloned into each handler.
///
/// Holds the only shared, process-wide dependencies: the mapping service and,
/// through it, the store connections and the key generator.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>) -> Self {
        Self { mapping_service }
    }
}
