use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Largest `limit` a client may request
    pub max_limit: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, max_limit: usize) -> Self {
        Self {
            recommender: Arc::new(recommender),
            max_limit,
        }
    }
}
