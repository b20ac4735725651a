//! Error types for itinerary operations.

use thiserror::Error;

/// Errors raised by in-memory itinerary operations and import.
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// Referenced day does not exist (or is the reserved settings sentinel).
    #[error("Day not found: {0}")]
    DayNotFound(u32),

    /// Validation error (empty title, malformed time, bad date).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Imported document was rejected; the in-memory state is untouched.
    #[error("Import rejected: {0}")]
    Import(String),

    /// Serialization failure during export.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ItineraryError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an import error.
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import(message.into())
    }

    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            ItineraryError::DayNotFound(_) => "That day no longer exists.",
            ItineraryError::Validation(_) => "Please check the entered values.",
            ItineraryError::Import(_) => {
                "The selected file is not a valid itinerary. Nothing was changed."
            }
            ItineraryError::Serialization(_) => "Failed to prepare itinerary data.",
        }
    }
}
