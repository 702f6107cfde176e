//! Error types and handling for `SportSpot`

use thiserror::Error;

/// Main error type for the `SportSpot` library
#[derive(Error, Debug)]
pub enum SportSpotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Place-search provider errors (network, quota, parse)
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Reverse geocoding errors
    #[error("Geocoding error: {message}")]
    Geocode { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl SportSpotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocode<S: Into<String>>(message: S) -> Self {
        Self::Geocode {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SportSpotError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SportSpotError::Provider { .. } => {
                "Unable to reach the place-search service. Please check your internet connection."
                    .to_string()
            }
            SportSpotError::Geocode { .. } => {
                "Unable to resolve the location name. Venue results are unaffected.".to_string()
            }
            SportSpotError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SportSpotError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            SportSpotError::General { message } => message.clone(),
        }
    }
}
