use std::sync::Arc;

use crate::services::DescriptionGenerator;
use crate::store::EventStore;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    pub generator: Arc<dyn DescriptionGenerator>,
}

impl AppState {
    pub fn new(store: EventStore, generator: Arc<dyn DescriptionGenerator>) -> Self {
        Self {
            store: Arc::new(store),
            generator,
        }
    }
}
