pub mod app_config;
pub mod config;
pub mod job;
pub mod transport;

pub use app_config::{AppConfig, Mode, ShortPagePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use job::{load_job_config, parse_date_arg, JobConfig, JobOverrides};
pub use transport::{build_http_client, TransportConfig, TransportError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("missing {param}: set {env_var} or pass it as an argument")]
    MissingParameter {
        param: &'static str,
        env_var: &'static str,
    },

    #[error("unsupported mode \"{0}\": expected search, comments, or channel-videos")]
    UnsupportedMode(String),
}
