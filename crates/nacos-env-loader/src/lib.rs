//! # nacos-env loader
//!
//! Pulls configuration documents from a Nacos config server and layers them
//! into an [`Environment`](nacos_env_core::Environment).
//!
//! ## Features
//!
//! - A global target plus extra targets that inherit unset connection fields
//! - One client per distinct connection, created lazily and cached
//! - Properties, YAML and JSON documents
//! - All documents merged, in declared order, into one composite layer
//! - Hot refresh through change listeners, attached once the host is ready
//!
//! The Nacos wire protocol itself is out of scope: plug a client in through
//! [`ClientFactory`] and [`ConfigServiceClient`].
//!
//! ## Example
//!
//! ```ignore
//! use nacos_env_loader::{CompositeLoader, NacosConfigProperties};
//!
//! let properties = NacosConfigProperties::load(Some(Path::new("nacos.toml")))?;
//! let loader = CompositeLoader::new(properties, Arc::new(MyClientFactory));
//!
//! let pending = loader.load_config(&env).await?;
//! // after startup
//! loader.refresh_registrar().register_all(pending).await;
//! ```

pub mod client;
pub mod connection;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod refresh;
pub mod settings;

// Re-exports
pub use client::{
    ClientFactory, ConfigChangeListener, ConfigResponse, ConfigServiceClient,
    FnConfigChangeListener,
};
pub use connection::{ConnectionProperties, ConnectionPropertiesBuilder};
pub use document::FetchedDocument;
pub use error::{
    ClientError, ConfigFetchError, ConfigurationError, LoadError, RefreshRegistrationError,
};
pub use fetcher::DocumentFetcher;
pub use loader::{COMPOSITE_SOURCE_NAME, CompositeLoader, LoadedDocuments};
pub use refresh::{
    ClientListenerRegistrar, DeferredRefreshRegistrar, PendingRefresh, PendingRefreshEntry,
    RefreshListenerRegistrar, RefreshSummary,
};
pub use settings::{ConnectionSettings, NacosConfigProperties, TargetSpec};

// Re-export nacos_env_core for consumers
pub use nacos_env_core;
