use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("malformed payload for action {kind}: {source}")]
    MalformedPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
