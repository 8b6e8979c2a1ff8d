//! Fetches documents through cached config-service clients.

use std::collections::HashMap;
use std::sync::Arc;

use nacos_env_core::{ConfigFormat, DataId, Group};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::{ClientFactory, ConfigServiceClient};
use crate::connection::ConnectionProperties;
use crate::document::FetchedDocument;
use crate::error::{ClientError, ConfigFetchError, LoadError};

/// Fetches documents, one client per distinct set of connection properties.
///
/// Clients are created lazily through the [`ClientFactory`] and reused for
/// every later fetch and listener registration on the same connection.
pub struct DocumentFetcher {
    factory: Arc<dyn ClientFactory>,
    clients: Mutex<HashMap<ConnectionProperties, Arc<dyn ConfigServiceClient>>>,
}

impl DocumentFetcher {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client for `connection`, creating it on first use.
    pub async fn client_for(
        &self,
        connection: &ConnectionProperties,
    ) -> Result<Arc<dyn ConfigServiceClient>, ClientError> {
        let mut clients = self.clients.lock().await;

        if let Some(client) = clients.get(connection) {
            debug!("Reusing config client for {}", connection.identity());
            return Ok(Arc::clone(client));
        }

        debug!("Creating config client for {}", connection.identity());
        let client = self.factory.create_client(connection).await?;
        clients.insert(connection.clone(), Arc::clone(&client));
        Ok(client)
    }

    /// Number of clients created so far.
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Fetches `data_ids` from one group, in order.
    ///
    /// The result has one document per id, in the same order. The first
    /// failure aborts the whole call; nothing is retried.
    pub async fn fetch(
        &self,
        connection: &ConnectionProperties,
        data_ids: &[DataId],
        group: &Group,
        format: ConfigFormat,
        auto_refreshed: bool,
    ) -> Result<Vec<FetchedDocument>, LoadError> {
        let mut documents = Vec::with_capacity(data_ids.len());

        for data_id in data_ids {
            let content = self
                .get_content(connection, data_id, group)
                .await
                .map_err(|cause| ConfigFetchError::new(data_id.clone(), group.clone(), cause))?;

            let document = FetchedDocument::parse(
                data_id.clone(),
                group.clone(),
                format,
                content,
                connection,
                auto_refreshed,
            )?;

            info!(
                "load config from nacos, data-id: {}, group: {}",
                document.data_id(),
                document.group()
            );
            documents.push(document);
        }

        Ok(documents)
    }

    async fn get_content(
        &self,
        connection: &ConnectionProperties,
        data_id: &DataId,
        group: &Group,
    ) -> Result<String, ClientError> {
        let client = self.client_for(connection).await?;
        client.get_content(data_id, group).await
    }
}

impl std::fmt::Debug for DocumentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentFetcher").finish_non_exhaustive()
    }
}
