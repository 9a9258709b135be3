//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::domain::repositories::MappingStore;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    /// Builds the state around a mapping store.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self {
            mapping_service: Arc::new(MappingService::new(store)),
        }
    }
}
