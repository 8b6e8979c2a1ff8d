//! Error types for loading remote configuration.

use nacos_env_core::{DataId, EnvError, Group};

/// Errors reported by a config-service client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server has no document for the given coordinates.
    #[error("config not found: data-id '{data_id}', group '{group}'")]
    NotFound { data_id: String, group: String },

    /// The server could not be reached or answered with a server error.
    #[error("network error: {0}")]
    Network(String),

    /// Credentials were rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request did not complete within the client's timeout.
    #[error("request timed out after {millis}ms")]
    Timeout { millis: u64 },
}

impl ClientError {
    /// Creates a NotFound error.
    pub fn not_found(data_id: impl Into<String>, group: impl Into<String>) -> Self {
        Self::NotFound {
            data_id: data_id.into(),
            group: group.into(),
        }
    }

    /// Creates a Network error.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network(reason.into())
    }

    /// Creates an Auth error.
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// Retrying is the client's business; the loader only reports it.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }
}

/// Malformed or missing connection settings.
///
/// Always raised before the first document is requested.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A setting has a value that cannot be used.
    #[error("invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A required setting is absent.
    #[error("missing required setting: {0}")]
    Missing(String),

    /// The settings sources could not be read or deserialized.
    #[error("failed to read settings: {0}")]
    Settings(#[from] config::ConfigError),
}

impl ConfigurationError {
    /// Creates an InvalidValue error.
    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// A document could not be retrieved.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch config data-id '{data_id}', group '{group}': {cause}")]
pub struct ConfigFetchError {
    pub data_id: DataId,
    pub group: Group,
    #[source]
    pub cause: ClientError,
}

impl ConfigFetchError {
    pub fn new(data_id: DataId, group: Group, cause: ClientError) -> Self {
        Self {
            data_id,
            group,
            cause,
        }
    }
}

/// A change listener could not be attached to a document.
///
/// Never fatal: the document simply stays static.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to register refresh listener for '{source_name}': {reason}")]
pub struct RefreshRegistrationError {
    pub source_name: String,
    pub reason: String,
}

impl RefreshRegistrationError {
    pub fn new(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a load cycle.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Fetch(#[from] ConfigFetchError),

    /// The document was retrieved but is not valid in its declared format.
    #[error("config data-id '{data_id}', group '{group}' is not valid: {source}")]
    Parse {
        data_id: DataId,
        group: Group,
        #[source]
        source: EnvError,
    },
}

impl LoadError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
