//! Change notifications delivered by a config-service client.

use nacos_env_core::{DataId, Group};

/// New content of a document, as pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResponse {
    pub data_id: DataId,
    pub group: Group,
    pub content: String,
}

impl ConfigResponse {
    pub fn new(data_id: DataId, group: Group, content: impl Into<String>) -> Self {
        Self {
            data_id,
            group,
            content: content.into(),
        }
    }
}

/// Receives document changes.
///
/// Called from the client's notification task, so implementations must not
/// block for long.
pub trait ConfigChangeListener: Send + Sync + 'static {
    /// Called when the document content has changed.
    fn receive_config_info(&self, config_info: ConfigResponse);
}

/// A listener that invokes a closure.
pub struct FnConfigChangeListener<F>
where
    F: Fn(ConfigResponse) + Send + Sync + 'static,
{
    f: F,
}

impl<F> FnConfigChangeListener<F>
where
    F: Fn(ConfigResponse) + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ConfigChangeListener for FnConfigChangeListener<F>
where
    F: Fn(ConfigResponse) + Send + Sync + 'static,
{
    fn receive_config_info(&self, config_info: ConfigResponse) {
        (self.f)(config_info);
    }
}
