//! Error types for the mock server.
//!
//! Every request failure maps to an HTTP status and a small JSON body; no
//! error is fatal to the process.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MockError {
    #[error("Track {track} not found")]
    TrackNotFound { track: i64 },

    #[error("FX {fx} not found on track {track}")]
    FxNotFound { track: i64, fx: i64 },

    #[error("Parameter {param_index} not found on FX {fx}")]
    ParamIndexNotFound { fx: i64, param_index: i64 },

    #[error("Parameter '{param}' not found on FX {fx}")]
    ParamNotFound { fx: i64, param: String },

    #[error("plugin required")]
    PluginRequired,

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("Unknown endpoint: {path}")]
    UnknownEndpoint { path: String },
}

pub type MockResult<T> = Result<T, MockError>;

impl MockError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            MockError::TrackNotFound { .. }
            | MockError::FxNotFound { .. }
            | MockError::ParamIndexNotFound { .. }
            | MockError::ParamNotFound { .. }
            | MockError::UnknownEndpoint { .. } => 404,
            MockError::PluginRequired | MockError::InvalidBody { .. } => 400,
        }
    }

    /// JSON body sent over the wire. Index lookups collapse to one generic
    /// message; callers branch on the status code, not the text.
    pub fn body(&self) -> Value {
        match self {
            MockError::TrackNotFound { .. }
            | MockError::FxNotFound { .. }
            | MockError::ParamIndexNotFound { .. } => json!({ "error": "Not found" }),
            MockError::ParamNotFound { .. } => json!({ "error": "Parameter not found" }),
            MockError::PluginRequired => json!({ "error": "plugin required" }),
            MockError::InvalidBody { message } => json!({ "error": message }),
            MockError::UnknownEndpoint { path } => {
                json!({ "error": "Unknown endpoint", "path": path })
            }
        }
    }
}
