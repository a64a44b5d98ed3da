use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid resource name: {0:?}")]
    InvalidName(String),

    #[error("unknown provider type: {0}")]
    UnknownProviderType(String),
}
