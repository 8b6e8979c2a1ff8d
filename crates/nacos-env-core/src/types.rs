//! Identifier newtypes for remote configuration documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a remote configuration document.
///
/// Together with a [`Group`] it addresses exactly one document on the
/// config server.
///
/// # Example
///
/// ```
/// use nacos_env_core::DataId;
///
/// let id = DataId::new("application.yaml");
/// assert_eq!(id.as_str(), "application.yaml");
/// assert!(!id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataId(String);

impl DataId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DataId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Group a document belongs to.
///
/// Defaults to `DEFAULT_GROUP`, the group documents land in when none is
/// given on publish.
///
/// # Example
///
/// ```
/// use nacos_env_core::Group;
///
/// assert_eq!(Group::default().as_str(), "DEFAULT_GROUP");
/// assert_eq!(Group::new("payments").as_str(), "payments");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(String);

impl Group {
    pub const DEFAULT: &'static str = "DEFAULT_GROUP";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns this group, or the default group if the name is blank.
    pub fn or_default(self) -> Self {
        if self.0.trim().is_empty() {
            Self::default()
        } else {
            self
        }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Group {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Group {
    fn from(s: String) -> Self {
        Self(s)
    }
}
