//! Loader settings.
//!
//! Settings are read with the `config` crate: an optional file (format from
//! its extension) overlaid by `NACOS_CONFIG_*` environment variables, where
//! `__` separates nested keys.
//!
//! ```toml
//! server_addr = "127.0.0.1:8848"
//! namespace = "prod"
//! data_id = "app.properties"
//! auto_refresh = true
//!
//! [[ext_config]]
//! data_ids = "db.yaml,pool.yaml"
//! group = "db"
//! format = "yaml"
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use config::{Config, Environment, File};
use nacos_env_core::{ConfigFormat, DataId, Group};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;

use crate::connection::ConnectionProperties;
use crate::error::ConfigurationError;

/// Prefix of environment variables read by [`NacosConfigProperties::load`].
pub const ENV_PREFIX: &str = "NACOS_CONFIG";

/// Connection overrides as written in settings.
///
/// Numbers may be given as numbers or as text; they are validated when the
/// connection is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    #[serde(deserialize_with = "optional_text")]
    pub server_addr: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub namespace: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub endpoint: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub access_key: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub secret_key: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub ram_role_name: Option<String>,
    /// Milliseconds.
    #[serde(deserialize_with = "optional_text")]
    pub config_long_poll_timeout: Option<String>,
    /// Milliseconds.
    #[serde(deserialize_with = "optional_text")]
    pub config_retry_time: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub max_retry: Option<String>,
    pub enable_remote_sync_config: Option<bool>,
}

impl ConnectionSettings {
    /// Builds connection properties from these settings alone.
    pub fn to_connection(&self) -> Result<ConnectionProperties, ConfigurationError> {
        let mut builder = ConnectionProperties::builder();

        if let Some(v) = &self.server_addr {
            builder = builder.server_addr(v);
        }
        if let Some(v) = &self.namespace {
            builder = builder.namespace(v);
        }
        if let Some(v) = &self.endpoint {
            builder = builder.endpoint(v);
        }
        if let Some(v) = &self.access_key {
            builder = builder.access_key(v);
        }
        if let Some(v) = &self.secret_key {
            builder = builder.secret_key(v);
        }
        if let Some(v) = &self.ram_role_name {
            builder = builder.ram_role_name(v);
        }
        if let Some(v) = &self.config_long_poll_timeout {
            builder = builder.long_poll_timeout(v);
        }
        if let Some(v) = &self.config_retry_time {
            builder = builder.retry_time(v);
        }
        if let Some(v) = &self.max_retry {
            builder = builder.max_retry(v);
        }

        builder
            .maybe_enable_remote_sync(self.enable_remote_sync_config)
            .build()
    }
}

/// One set of documents to load: ids, group, format and connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    /// A single id. Takes precedence over `data_ids` when non-empty.
    #[serde(deserialize_with = "optional_text")]
    pub data_id: Option<String>,
    /// A list of ids, or one comma-separated string.
    #[serde(deserialize_with = "string_or_list")]
    pub data_ids: Vec<String>,
    pub group: Group,
    #[serde(alias = "type")]
    pub format: ConfigFormat,
    /// Whether these documents hot-refresh. Unset means "follow the global flag".
    pub auto_refresh: Option<bool>,
    #[serde(flatten)]
    pub connection: ConnectionSettings,
}

impl TargetSpec {
    /// Creates a target for the given ids in the default group.
    pub fn new<I, S>(data_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data_ids: data_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The ids to fetch, in order.
    ///
    /// `[data_id]` when `data_id` is non-empty, otherwise the non-empty
    /// entries of `data_ids`.
    pub fn effective_data_ids(&self) -> Vec<DataId> {
        if let Some(id) = self.data_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            return vec![DataId::new(id)];
        }

        self.data_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(DataId::new)
            .collect()
    }

    /// The group, falling back to `DEFAULT_GROUP` when blank.
    pub fn group(&self) -> Group {
        self.group.clone().or_default()
    }

    /// Whether documents of this target refresh, given the global flag.
    pub fn auto_refreshed(&self, global_auto_refresh: bool) -> bool {
        self.auto_refresh.unwrap_or(global_auto_refresh)
    }

    /// Resolves the connection for an extra target.
    ///
    /// See [`ConnectionProperties::for_sub_target`].
    pub fn sub_connection(
        &self,
        global: &Arc<ConnectionProperties>,
    ) -> Result<Arc<ConnectionProperties>, ConfigurationError> {
        let sub = self.connection.to_connection()?;
        Ok(ConnectionProperties::for_sub_target(global, sub))
    }
}

/// Top-level settings: the global target, flags and extra targets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NacosConfigProperties {
    /// Global hot-refresh switch. When off, no listener is ever attached.
    pub auto_refresh: bool,
    /// Put the remote layer ahead of every local layer instead of behind.
    pub remote_first: bool,
    /// Extra targets, loaded after the global one in this order.
    pub ext_config: Vec<TargetSpec>,
    #[serde(flatten)]
    pub target: TargetSpec,
}

impl NacosConfigProperties {
    /// Deserializes settings from an already-built `config::Config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        Ok(config.clone().try_deserialize()?)
    }

    /// Reads settings from an optional file overlaid by `NACOS_CONFIG_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            tracing::debug!("Reading nacos settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(&config)
    }

    /// Builds the global connection.
    ///
    /// An address is not required here: only a connection that documents
    /// are fetched with must be addressable, which the loader checks.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidValue` for malformed numbers.
    pub fn global_connection(&self) -> Result<Arc<ConnectionProperties>, ConfigurationError> {
        Ok(Arc::new(self.target.connection.to_connection()?))
    }
}

/// Accepts any scalar and keeps its text form. Empty text is `None`.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(TextVisitor)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            Ok((!v.is_empty()).then(|| v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            self.visit_str(&v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Accepts a sequence of ids or a single comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdsVisitor;

    impl<'de> Visitor<'de> for IdsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of data ids or a comma-separated string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(IdsVisitor)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            self.visit_str(&v)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut ids = Vec::new();
            while let Some(id) = seq.next_element::<String>()? {
                ids.push(id);
            }
            Ok(ids)
        }
    }

    deserializer.deserialize_any(IdsVisitor)
}
