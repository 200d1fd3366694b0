/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub const DEFAULT_FILTER: &'static str = "info,reelsearch=debug,tower_http=debug";
}
