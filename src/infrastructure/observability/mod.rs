mod init_tracing;
mod query_sanitizer;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use query_sanitizer::sanitize_query;
pub use tracing_config::TracingConfig;
