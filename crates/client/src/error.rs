//! Error type shared by every layer of the client

use std::io;
use thiserror::Error;

/// Errors raised by the catalog client, the CAD host and the orchestrator
#[derive(Debug, Error)]
pub enum PlmError {
    /// The transport returned an in-band `{"error": ...}` value
    #[error("{0}")]
    Remote(String),

    /// Response body was not valid JSON
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Response lacks a key the operation depends on
    #[error("Response is missing `{0}`")]
    MissingField(&'static str),

    /// Failure reported by the CAD host
    #[error("CAD host error: {0}")]
    Host(String),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Nothing is selected")]
    NoSelection,

    /// Neither the selection nor the active document carries a catalog id
    #[error("No catalog object is open")]
    NoCurrentObject,

    /// Exporting geometry from the native object failed
    #[error("Failed to export geometry of `{label}`: {reason}")]
    GeometryExport { label: String, reason: String },

    #[error("Please enter a part name!")]
    EmptySearch,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PlmError {
    pub fn host(msg: impl Into<String>) -> Self {
        PlmError::Host(msg.into())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, PlmError>;
