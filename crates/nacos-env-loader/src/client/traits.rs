use std::sync::Arc;

use async_trait::async_trait;
use nacos_env_core::{DataId, Group};

use crate::client::listener::ConfigChangeListener;
use crate::connection::ConnectionProperties;
use crate::error::ClientError;

/// The narrow slice of a Nacos config-service client the loader needs.
///
/// Transport, long polling and local snapshots are the client's business.
#[async_trait]
pub trait ConfigServiceClient: Send + Sync {
    /// Returns the current content of a document.
    async fn get_content(&self, data_id: &DataId, group: &Group) -> Result<String, ClientError>;

    /// Attaches a listener notified on every later change of the document.
    async fn add_listener(
        &self,
        data_id: &DataId,
        group: &Group,
        listener: Arc<dyn ConfigChangeListener>,
    ) -> Result<(), ClientError>;
}

/// Creates clients for a set of connection properties.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn create_client(
        &self,
        properties: &ConnectionProperties,
    ) -> Result<Arc<dyn ConfigServiceClient>, ClientError>;
}
