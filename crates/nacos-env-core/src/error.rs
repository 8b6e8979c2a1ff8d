//! Error types for the property environment.
//!
//! All errors implement `std::error::Error` via `thiserror`. Functions that
//! can fail return [`Result<T>`], an alias over [`EnvError`].
//!
//! # Example
//!
//! ```
//! use nacos_env_core::{EnvError, Result};
//!
//! fn port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| EnvError::parse_error("server.port", format!("'{}' is not a port", raw)))
//! }
//!
//! assert!(port("8080").is_ok());
//! assert!(port("http").unwrap_err().is_parse_error());
//! ```

use thiserror::Error;

/// Main error type for environment operations.
#[derive(Debug, Error)]
pub enum EnvError {
    /// A required property was not found in any layer.
    #[error("Property '{key}' not found in environment")]
    PropertyNotFound {
        /// The key that was requested
        key: String,
    },

    /// Content could not be parsed in its declared format.
    #[error("Failed to parse configuration from '{source_name}': {message}")]
    ParseError {
        /// Format or document the content came from
        source_name: String,
        /// Description of the parse error
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The named format is not one of properties, yaml or json.
    #[error("Unsupported configuration format '{0}'")]
    UnsupportedFormat(String),
}

impl EnvError {
    /// Creates a PropertyNotFound error.
    pub fn property_not_found(key: impl Into<String>) -> Self {
        Self::PropertyNotFound { key: key.into() }
    }

    /// Creates a ParseError without a cause.
    pub fn parse_error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a ParseError with a cause.
    pub fn parse_error_with_cause<E>(
        source: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

/// Type alias for Results with EnvError.
pub type Result<T> = std::result::Result<T, EnvError>;
