use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemotrackError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
