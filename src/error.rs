//! Error types and handling for the Yatra application

use thiserror::Error;

/// Main error type for the Yatra application
#[derive(Error, Debug)]
pub enum YatraError {
    /// Invalid or inconsistent settings
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Content catalog loading or lookup errors
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Trip store operation errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Missing or expired session
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Requested resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl YatraError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            YatraError::Config { .. } => "config",
            YatraError::Validation { .. } => "validation",
            YatraError::Catalog { .. } => "catalog",
            YatraError::Store { .. } => "store",
            YatraError::Unauthorized { .. } => "unauthorized",
            YatraError::NotFound { .. } => "not_found",
            YatraError::Io { .. } => "io",
        }
    }

    /// Message safe to show to end users; internal details stay in the logs
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            YatraError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            YatraError::Validation { message } => format!("Invalid input: {message}"),
            YatraError::Catalog { .. } => {
                "Travel content is unavailable right now. Please try again later.".to_string()
            }
            YatraError::Store { .. } => {
                "Your trips could not be saved or loaded. Please try again.".to_string()
            }
            YatraError::Unauthorized { .. } => "Please sign in to continue.".to_string(),
            YatraError::NotFound { message } => message.clone(),
            YatraError::Io { .. } => {
                "A file could not be read or written. Please check its path and permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = YatraError::config("bad port");
        assert!(matches!(config_err, YatraError::Config { .. }));

        let validation_err = YatraError::validation("budget must be positive");
        assert!(matches!(validation_err, YatraError::Validation { .. }));

        let store_err = YatraError::store("disk full");
        assert!(matches!(store_err, YatraError::Store { .. }));
    }

    #[test]
    fn test_user_messages() {
        let validation_err = YatraError::validation("budget must be positive");
        assert!(validation_err.user_message().contains("budget must be positive"));

        let auth_err = YatraError::unauthorized("no token");
        assert_eq!(auth_err.user_message(), "Please sign in to continue.");

        let not_found = YatraError::not_found("Unknown city: Atlantis");
        assert_eq!(not_found.user_message(), "Unknown city: Atlantis");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: YatraError = io_err.into();
        assert!(matches!(err, YatraError::Io { .. }));
        assert_eq!(err.kind(), "io");
    }
}
