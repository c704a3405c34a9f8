use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("student with email {0} already exists")]
    DuplicateEmail(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("malformed storage document: {0}")]
    Serialization(#[from] serde_json::Error),
}
