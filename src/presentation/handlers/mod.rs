mod health;
mod responses;
mod search_results;
mod submit_search;

pub use health::health_handler;
pub use responses::{ErrorResponse, SearchStatusResponse};
pub use search_results::search_results_handler;
pub use submit_search::submit_search_handler;
