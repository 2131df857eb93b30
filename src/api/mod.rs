pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::manager::FilterManager;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub managers: Arc<IndexMap<String, Arc<FilterManager>>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(managers: IndexMap<String, Arc<FilterManager>>) -> Self {
        Self {
            managers: Arc::new(managers),
            started_at: Instant::now(),
        }
    }

    /// Look up a manager by name
    pub fn manager(&self, name: &str) -> Option<&Arc<FilterManager>> {
        self.managers.get(name)
    }
}
