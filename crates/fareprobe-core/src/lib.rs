mod app_config;
mod axes;
mod config;
mod grid;
mod record;
mod search;

use thiserror::Error;

pub use app_config::AppConfig;
pub use axes::{load_search_axes, MonthYear, Party, SearchAxes};
pub use config::{load_app_config, load_app_config_from_env};
pub use grid::{GridIter, ParameterGrid};
pub use record::{FieldValue, Record, UNAVAILABLE};
pub use search::{ResourceKind, SearchRequest};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read search axes file {path}: {source}")]
    AxesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search axes file: {0}")]
    AxesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
