#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use nacos_env_core::{DataId, Group};
use nacos_env_loader::{
    ClientError, ClientFactory, ConfigChangeListener, ConfigResponse, ConfigServiceClient,
    ConnectionProperties, NacosConfigProperties,
};
use parking_lot::Mutex;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nacos_env_loader=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// An in-memory config server for one connection.
#[derive(Default)]
pub struct InMemoryClient {
    documents: Mutex<HashMap<(String, String), String>>,
    listeners: Mutex<Vec<(DataId, Group, Arc<dyn ConfigChangeListener>)>>,
    requests: Mutex<Vec<String>>,
    rejected_listeners: Mutex<HashSet<String>>,
}

impl InMemoryClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Stores a document without notifying anyone.
    pub fn put(&self, data_id: &str, group: &str, content: &str) -> &Self {
        self.documents
            .lock()
            .insert((data_id.to_string(), group.to_string()), content.to_string());
        self
    }

    /// Stores a document and notifies its listeners.
    pub fn publish(&self, data_id: &str, group: &str, content: &str) {
        self.put(data_id, group, content);
        let listeners: Vec<_> = self
            .listeners
            .lock()
            .iter()
            .filter(|(d, g, _)| d.as_str() == data_id && g.as_str() == group)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener.receive_config_info(ConfigResponse::new(
                DataId::new(data_id),
                Group::new(group),
                content,
            ));
        }
    }

    /// Makes `add_listener` fail for the given data id.
    pub fn reject_listener(&self, data_id: &str) {
        self.rejected_listeners.lock().insert(data_id.to_string());
    }

    /// `data_id@group` of every content request, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// `data_id@group` of every attached listener, in order.
    pub fn listened(&self) -> Vec<String> {
        self.listeners
            .lock()
            .iter()
            .map(|(d, g, _)| format!("{d}@{g}"))
            .collect()
    }
}

#[async_trait]
impl ConfigServiceClient for InMemoryClient {
    async fn get_content(&self, data_id: &DataId, group: &Group) -> Result<String, ClientError> {
        self.requests.lock().push(format!("{data_id}@{group}"));
        self.documents
            .lock()
            .get(&(data_id.to_string(), group.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::not_found(data_id.as_str(), group.as_str()))
    }

    async fn add_listener(
        &self,
        data_id: &DataId,
        group: &Group,
        listener: Arc<dyn ConfigChangeListener>,
    ) -> Result<(), ClientError> {
        if self.rejected_listeners.lock().contains(data_id.as_str()) {
            return Err(ClientError::network("listener channel closed"));
        }
        self.listeners
            .lock()
            .push((data_id.clone(), group.clone(), listener));
        Ok(())
    }
}

/// Hands out one in-memory client per server address and records every
/// connection it was asked for.
#[derive(Default)]
pub struct RecordingFactory {
    servers: Mutex<HashMap<String, Arc<InMemoryClient>>>,
    created: Mutex<Vec<ConnectionProperties>>,
}

impl RecordingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers (or returns) the server at `addr`.
    pub fn server(&self, addr: &str) -> Arc<InMemoryClient> {
        Arc::clone(
            self.servers
                .lock()
                .entry(addr.to_string())
                .or_insert_with(InMemoryClient::new),
        )
    }

    /// Connections clients were created for, in order.
    pub fn created(&self) -> Vec<ConnectionProperties> {
        self.created.lock().clone()
    }
}

#[async_trait]
impl ClientFactory for RecordingFactory {
    async fn create_client(
        &self,
        properties: &ConnectionProperties,
    ) -> Result<Arc<dyn ConfigServiceClient>, ClientError> {
        self.created.lock().push(properties.clone());

        let addr = properties.server_addr().unwrap_or_default();
        let client = self
            .servers
            .lock()
            .get(addr)
            .cloned()
            .ok_or_else(|| ClientError::network(format!("no server at '{addr}'")))?;
        Ok(client)
    }
}

/// Settings parsed from TOML, the way they would be read from a file.
pub fn settings(toml: &str) -> NacosConfigProperties {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .expect("Failed to build test settings");
    NacosConfigProperties::from_config(&config).expect("Failed to deserialize test settings")
}

pub const GLOBAL_SERVER: &str = "10.0.0.1:8848";
pub const DB_SERVER: &str = "10.0.0.2:8848";
