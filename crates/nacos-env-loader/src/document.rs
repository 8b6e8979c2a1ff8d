//! A document fetched from the config server.

use nacos_env_core::{ConfigFormat, ConfigMap, DataId, EnvError, Group, PropertySource};

use crate::connection::ConnectionProperties;
use crate::error::LoadError;

/// One fetched and parsed configuration document.
///
/// Immutable once built. A refreshed document is a new value with the same
/// derived name.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedDocument {
    data_id: DataId,
    group: Group,
    format: ConfigFormat,
    derived_name: String,
    raw_content: String,
    config: ConfigMap,
    auto_refreshed: bool,
}

impl FetchedDocument {
    /// Parses `raw_content` in `format` and wraps it.
    ///
    /// # Errors
    ///
    /// `LoadError::Parse` if the content is not valid in its declared format.
    pub fn parse(
        data_id: DataId,
        group: Group,
        format: ConfigFormat,
        raw_content: String,
        connection: &ConnectionProperties,
        auto_refreshed: bool,
    ) -> Result<Self, LoadError> {
        let config = match format.parse(&raw_content) {
            Ok(config) => config,
            Err(source) => {
                return Err(LoadError::Parse {
                    data_id,
                    group,
                    source,
                });
            },
        };

        let derived_name = derived_name(&data_id, &group, connection);
        Ok(Self {
            data_id,
            group,
            format,
            derived_name,
            raw_content,
            config,
            auto_refreshed,
        })
    }

    /// Returns a copy carrying `raw_content`, parsed in this document's format.
    pub fn with_content(&self, raw_content: String) -> Result<Self, EnvError> {
        let config = self.format.parse(&raw_content)?;
        Ok(Self {
            raw_content,
            config,
            ..self.clone()
        })
    }

    pub fn data_id(&self) -> &DataId {
        &self.data_id
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Name of the layer this document becomes.
    pub fn derived_name(&self) -> &str {
        &self.derived_name
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    pub fn auto_refreshed(&self) -> bool {
        self.auto_refreshed
    }

    /// The property layer for this document.
    pub fn to_property_source(&self) -> PropertySource {
        PropertySource::new(self.derived_name.clone(), self.config.clone())
            .with_origin(format!("nacos:{}@{}", self.data_id, self.group))
    }
}

/// `{data_id}|{group}|{connection identity}`.
///
/// Stable for the same document on the same connection, so a refresh can
/// find the layer it replaces.
pub fn derived_name(data_id: &DataId, group: &Group, connection: &ConnectionProperties) -> String {
    format!("{}|{}|{}", data_id, group, connection.identity())
}
