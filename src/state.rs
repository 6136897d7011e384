use std::sync::Arc;

use crate::observability::metrics::Metrics;
use crate::store::OrderStore;

pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            metrics: Metrics::new(),
        }
    }
}
