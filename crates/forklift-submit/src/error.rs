use forklift_core::CoreError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("draft is not ready: {0}")]
    NotReady(String),

    #[error("no target provider selected")]
    MissingTargetProvider,

    #[error("{kind} {label:?} is not in the inventory")]
    UnknownLabel { kind: &'static str, label: String },

    #[error("{kind} {name} came back without a uid")]
    MissingUid { kind: &'static str, name: String },

    #[error("failed to create {kind} {name}")]
    Create {
        kind: &'static str,
        name: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to set owner of {kind} {name}")]
    Link {
        kind: &'static str,
        name: String,
        #[source]
        source: ApiError,
    },

    #[error("provider creation failed, secret {secret} was removed")]
    RolledBack {
        secret: String,
        #[source]
        source: ApiError,
    },

    #[error("provider creation failed and secret {secret} could not be removed: {rollback}")]
    RollbackFailed {
        secret: String,
        rollback: ApiError,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SubmitError {
    pub(crate) fn create(
        kind: &'static str,
        name: &str,
    ) -> impl FnOnce(ApiError) -> Self + use<> {
        let name = name.to_string();
        move |source| Self::Create { kind, name, source }
    }

    pub(crate) fn link(
        kind: &'static str,
        name: &str,
    ) -> impl FnOnce(ApiError) -> Self + use<> {
        let name = name.to_string();
        move |source| Self::Link { kind, name, source }
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// API errors carry the server's message in the source chain while the
/// outer error only names the step that failed.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
