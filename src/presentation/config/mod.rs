mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CatalogSettings, JobSettings, LoggingSettings, PoolSettings, SaturationPolicySetting,
    ServerSettings, Settings,
};
