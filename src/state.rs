use std::sync::Arc;

use crate::store::EventStore;

/// Shared handler state. The store is opened once at startup and lives for
/// the whole process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }
}
