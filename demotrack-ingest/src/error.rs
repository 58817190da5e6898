use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field} {value:?} on record {id}")]
    InvalidDate {
        field: &'static str,
        id: String,
        value: String,
    },
}
