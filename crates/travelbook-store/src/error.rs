//! Storage error taxonomy.
//!
//! The resolver leans on the distinctions made here: `Remote` failures are
//! transient and recoverable by fallback on the listing path, while
//! `RootFolderMissing` is a fixable configuration problem that must reach
//! the user verbatim, and write-path failures always surface.

use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or infrastructure failure talking to the remote backend,
    /// including malformed (non-JSON) responses.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// The well-known root container is missing. Includes the service
    /// identity the user must grant access to.
    #[error("Root folder not found; share the root folder with {service_identity}")]
    RootFolderMissing { service_identity: String },

    /// Requested file does not exist in the backend that owns its id.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Local fallback store failure.
    #[error("Local store error: {0}")]
    Local(String),

    /// Itinerary (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a remote error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Create a local error.
    pub fn local(message: impl Into<String>) -> Self {
        Self::Local(message.into())
    }

    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Remote(_) => "Unable to reach the cloud. Please try again.",
            StoreError::RootFolderMissing { .. } => {
                "The cloud folder is not set up. Share the root folder with the service account."
            }
            StoreError::FileNotFound(_) => "That itinerary file no longer exists.",
            StoreError::Local(_) => "Unable to access on-device data. Try restarting the app.",
            StoreError::Serialization(_) => "Itinerary data could not be processed.",
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Remote(e.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Local(e.to_string())
    }
}
