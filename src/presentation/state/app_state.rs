use std::sync::Arc;

use crate::application::services::SearchJobManager;

#[derive(Clone)]
pub struct AppState {
    pub search_jobs: Arc<SearchJobManager>,
}

impl AppState {
    pub fn new(search_jobs: Arc<SearchJobManager>) -> Self {
        Self { search_jobs }
    }
}
