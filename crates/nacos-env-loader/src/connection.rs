//! Connection properties for a config-service target.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigurationError;

/// Everything a config-service client needs to reach one server.
///
/// Every field is optional; an absent field is "unset" and may be filled in
/// from another set of properties with [`merge`](Self::merge). Once built the
/// properties are immutable and are usually shared behind an `Arc`. They are
/// `Hash + Eq` so they can key a client cache.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ConnectionProperties {
    server_addr: Option<String>,
    namespace: Option<String>,
    endpoint: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    ram_role_name: Option<String>,
    long_poll_timeout: Option<Duration>,
    retry_time: Option<Duration>,
    max_retry: Option<u32>,
    enable_remote_sync: Option<bool>,
}

impl ConnectionProperties {
    /// Creates a new builder for ConnectionProperties.
    pub fn builder() -> ConnectionPropertiesBuilder {
        ConnectionPropertiesBuilder::default()
    }

    /// Comma-separated server addresses (`host:port[,host:port]`).
    pub fn server_addr(&self) -> Option<&str> {
        self.server_addr.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Address server used to discover the server list.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    pub fn ram_role_name(&self) -> Option<&str> {
        self.ram_role_name.as_deref()
    }

    pub fn long_poll_timeout(&self) -> Option<Duration> {
        self.long_poll_timeout
    }

    pub fn retry_time(&self) -> Option<Duration> {
        self.retry_time
    }

    pub fn max_retry(&self) -> Option<u32> {
        self.max_retry
    }

    pub fn enable_remote_sync(&self) -> Option<bool> {
        self.enable_remote_sync
    }

    /// Fills every unset field of `self` from `base`. Set fields are kept.
    pub fn merge(&mut self, base: &ConnectionProperties) {
        fn fill<T: Clone>(field: &mut Option<T>, base: &Option<T>) {
            if field.is_none() {
                field.clone_from(base);
            }
        }

        fill(&mut self.server_addr, &base.server_addr);
        fill(&mut self.namespace, &base.namespace);
        fill(&mut self.endpoint, &base.endpoint);
        fill(&mut self.access_key, &base.access_key);
        fill(&mut self.secret_key, &base.secret_key);
        fill(&mut self.ram_role_name, &base.ram_role_name);
        fill(&mut self.long_poll_timeout, &base.long_poll_timeout);
        fill(&mut self.retry_time, &base.retry_time);
        fill(&mut self.max_retry, &base.max_retry);
        fill(&mut self.enable_remote_sync, &base.enable_remote_sync);
    }

    /// Resolves the properties an extra target connects with.
    ///
    /// A target that names no server address uses the global properties
    /// as-is (the same `Arc`). Otherwise its own fields win and the gaps are
    /// filled from global.
    pub fn for_sub_target(
        global: &Arc<ConnectionProperties>,
        mut sub: ConnectionProperties,
    ) -> Arc<Self> {
        if sub.server_addr.is_none() {
            return Arc::clone(global);
        }
        sub.merge(global);
        Arc::new(sub)
    }

    /// True if a server can be located, either directly or via an endpoint.
    pub fn is_addressable(&self) -> bool {
        self.server_addr.is_some() || self.endpoint.is_some()
    }

    /// A stable identity string, safe to log (no secret key).
    ///
    /// Two properties pointing at the same namespace on the same server
    /// with the same credentials share an identity.
    pub fn identity(&self) -> String {
        [
            self.namespace.as_deref(),
            self.server_addr.as_deref(),
            self.endpoint.as_deref(),
            self.access_key.as_deref(),
        ]
        .iter()
        .map(|part| part.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
    }
}

impl fmt::Debug for ConnectionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProperties")
            .field("server_addr", &self.server_addr)
            .field("namespace", &self.namespace)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "****"))
            .field("ram_role_name", &self.ram_role_name)
            .field("long_poll_timeout", &self.long_poll_timeout)
            .field("retry_time", &self.retry_time)
            .field("max_retry", &self.max_retry)
            .field("enable_remote_sync", &self.enable_remote_sync)
            .finish()
    }
}

/// Builder for ConnectionProperties.
///
/// Text fields that are blank count as unset. Numeric fields are taken as
/// text, the way they arrive from property files and environment variables,
/// and are validated by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ConnectionPropertiesBuilder {
    server_addr: Option<String>,
    namespace: Option<String>,
    endpoint: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    ram_role_name: Option<String>,
    long_poll_timeout: Option<String>,
    retry_time: Option<String>,
    max_retry: Option<String>,
    enable_remote_sync: Option<bool>,
}

impl ConnectionPropertiesBuilder {
    pub fn server_addr(mut self, value: impl Into<String>) -> Self {
        self.server_addr = Some(value.into());
        self
    }

    pub fn namespace(mut self, value: impl Into<String>) -> Self {
        self.namespace = Some(value.into());
        self
    }

    pub fn endpoint(mut self, value: impl Into<String>) -> Self {
        self.endpoint = Some(value.into());
        self
    }

    /// Sets the access/secret key pair.
    pub fn credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn access_key(mut self, value: impl Into<String>) -> Self {
        self.access_key = Some(value.into());
        self
    }

    pub fn secret_key(mut self, value: impl Into<String>) -> Self {
        self.secret_key = Some(value.into());
        self
    }

    pub fn ram_role_name(mut self, value: impl Into<String>) -> Self {
        self.ram_role_name = Some(value.into());
        self
    }

    /// Long-poll timeout in milliseconds.
    pub fn long_poll_timeout(mut self, millis: impl Into<String>) -> Self {
        self.long_poll_timeout = Some(millis.into());
        self
    }

    /// Delay between retries in milliseconds.
    pub fn retry_time(mut self, millis: impl Into<String>) -> Self {
        self.retry_time = Some(millis.into());
        self
    }

    pub fn max_retry(mut self, count: impl Into<String>) -> Self {
        self.max_retry = Some(count.into());
        self
    }

    pub fn enable_remote_sync(mut self, enabled: bool) -> Self {
        self.enable_remote_sync = Some(enabled);
        self
    }

    /// Sets `enable_remote_sync` only if a value is given.
    pub fn maybe_enable_remote_sync(mut self, enabled: Option<bool>) -> Self {
        if enabled.is_some() {
            self.enable_remote_sync = enabled;
        }
        self
    }

    /// Builds the properties.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if a numeric field is not a
    /// non-negative integer.
    pub fn build(self) -> Result<ConnectionProperties, ConfigurationError> {
        Ok(ConnectionProperties {
            server_addr: non_blank(self.server_addr),
            namespace: non_blank(self.namespace),
            endpoint: non_blank(self.endpoint),
            access_key: non_blank(self.access_key),
            secret_key: non_blank(self.secret_key),
            ram_role_name: non_blank(self.ram_role_name),
            long_poll_timeout: parse_number::<u64>("long_poll_timeout", self.long_poll_timeout)?
                .map(Duration::from_millis),
            retry_time: parse_number::<u64>("retry_time", self.retry_time)?
                .map(Duration::from_millis),
            max_retry: parse_number::<u32>("max_retry", self.max_retry)?,
            enable_remote_sync: self.enable_remote_sync,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T>(field: &str, raw: Option<String>) -> Result<Option<T>, ConfigurationError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match non_blank(raw) {
        None => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigurationError::invalid(field, text.as_str(), e.to_string())),
    }
}
