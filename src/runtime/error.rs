use serde::Serialize;
use thiserror::Error;

/// Errors raised while serving a request through generated code.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is malformed; rendered as a 400 with a [`BadRequestError`] body.
    #[error(transparent)]
    BadRequest(#[from] BadRequestError),

    /// A second response was attempted on the same request.
    #[error("response already written with status {0}")]
    AlreadyWritten(u16),

    #[error("invalid response status {0}")]
    InvalidStatus(u16),

    #[error("failed to encode response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid route {method} {path}: {reason}")]
    InvalidRoute {
        method: String,
        path: String,
        reason: String,
    },

    /// The request carries no API version and no default mux is registered.
    #[error("request carries no API version and no default mux is registered")]
    NoDefaultMux,

    #[error("unknown API version {0:?}")]
    UnknownVersion(String),

    /// The version mux serves a single unversioned API.
    #[error("versioned routing is not supported by this mux")]
    VersionedMuxUnsupported,

    /// Application failure reported by a controller.
    #[error("{0}")]
    Handler(String),
}

impl Error {
    pub fn handler(message: impl Into<String>) -> Self {
        Error::Handler(message.into())
    }
}

/// Body of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{id}: {message}")]
pub struct BadRequestError {
    /// Machine readable error kind, e.g. `missing_param`
    pub id: String,
    pub message: String,
}

impl BadRequestError {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn missing_param(name: &str) -> Self {
        Self::new("missing_param", format!("missing required parameter {name:?}"))
    }

    pub fn invalid_param(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::new("invalid_param", format!("invalid parameter {name:?}: {reason}"))
    }

    pub fn missing_header(name: &str) -> Self {
        Self::new("missing_header", format!("missing required header {name:?}"))
    }

    pub fn invalid_payload(reason: impl std::fmt::Display) -> Self {
        Self::new("invalid_payload", format!("invalid request payload: {reason}"))
    }
}
