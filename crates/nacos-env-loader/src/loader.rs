//! Loads every configured document into one composite layer.

use std::collections::HashSet;
use std::sync::Arc;

use nacos_env_core::{CompositePropertySource, DataId, Environment};
use tracing::{debug, info, warn};

use crate::client::ClientFactory;
use crate::connection::ConnectionProperties;
use crate::document::FetchedDocument;
use crate::error::{ConfigurationError, LoadError};
use crate::fetcher::DocumentFetcher;
use crate::refresh::{
    ClientListenerRegistrar, DeferredRefreshRegistrar, PendingRefresh, PendingRefreshEntry,
};
use crate::settings::{NacosConfigProperties, TargetSpec};

/// Name of the layer holding every fetched document.
pub const COMPOSITE_SOURCE_NAME: &str = "nacosCompositePropertySource";

/// Documents of one load cycle, in precedence order, and their pending
/// refresh registrations.
#[derive(Debug)]
pub struct LoadedDocuments {
    pub documents: Vec<Arc<FetchedDocument>>,
    pub pending: PendingRefresh,
}

impl LoadedDocuments {
    /// Wraps the documents in a single composite layer.
    ///
    /// When two documents share a derived name the first one is kept.
    pub fn to_composite(&self) -> CompositePropertySource {
        let mut composite = CompositePropertySource::new(COMPOSITE_SOURCE_NAME);
        for document in &self.documents {
            if !composite.add_property_source(document.to_property_source()) {
                warn!(
                    "Duplicate nacos property source {}, keeping the first one",
                    document.derived_name()
                );
            }
        }
        composite
    }
}

/// Loads the global target and every extra target into an environment.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use nacos_env_core::Environment;
/// # use nacos_env_loader::{ClientFactory, CompositeLoader, NacosConfigProperties};
/// # async fn run(factory: Arc<dyn ClientFactory>) -> Result<(), Box<dyn std::error::Error>> {
/// let properties = NacosConfigProperties::load(None)?;
/// let loader = CompositeLoader::new(properties, factory);
///
/// let env = Environment::new();
/// let pending = loader.load_config(&env).await?;
///
/// // ... once the application is ready:
/// loader.refresh_registrar().register_all(pending).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CompositeLoader {
    properties: NacosConfigProperties,
    fetcher: Arc<DocumentFetcher>,
}

impl CompositeLoader {
    pub fn new(properties: NacosConfigProperties, factory: Arc<dyn ClientFactory>) -> Self {
        Self::with_fetcher(properties, Arc::new(DocumentFetcher::new(factory)))
    }

    /// Creates a loader sharing an existing fetcher and its client cache.
    pub fn with_fetcher(
        properties: NacosConfigProperties,
        fetcher: Arc<DocumentFetcher>,
    ) -> Self {
        Self {
            properties,
            fetcher,
        }
    }

    pub fn properties(&self) -> &NacosConfigProperties {
        &self.properties
    }

    pub fn fetcher(&self) -> &Arc<DocumentFetcher> {
        &self.fetcher
    }

    /// Fetches every document: the global target first, then each extra
    /// target in declared order.
    ///
    /// All connections are resolved before the first request, so a
    /// configuration error never leaves a cycle half-fetched. A target with
    /// data ids needs a server address or an endpoint; one without ids is
    /// skipped. Every document is recorded in the returned [`PendingRefresh`]
    /// with the connection it was fetched with and `environment`, except a
    /// document shadowed by an earlier one with the same derived name.
    pub async fn load_all(
        &self,
        environment: &Environment,
    ) -> Result<LoadedDocuments, LoadError> {
        let global = self.properties.global_connection()?;

        let mut targets = Vec::with_capacity(self.properties.ext_config.len() + 1);
        targets.push(resolve_target(&self.properties.target, Arc::clone(&global))?);
        for spec in &self.properties.ext_config {
            targets.push(resolve_target(spec, spec.sub_connection(&global)?)?);
        }

        let mut documents = Vec::new();
        let mut pending = PendingRefresh::new();
        let mut names = HashSet::new();

        for (spec, data_ids, connection) in targets.into_iter().flatten() {
            let fetched = self
                .fetcher
                .fetch(
                    &connection,
                    &data_ids,
                    &spec.group(),
                    spec.format,
                    spec.auto_refreshed(self.properties.auto_refresh),
                )
                .await?;

            for document in fetched {
                let document = Arc::new(document);
                if names.insert(document.derived_name().to_string()) {
                    pending.push(PendingRefreshEntry::new(
                        Arc::clone(&document),
                        Arc::clone(&connection),
                        environment.clone(),
                    ));
                } else {
                    debug!(
                        "No refresh listener for shadowed document {}",
                        document.derived_name()
                    );
                }
                documents.push(document);
            }
        }

        Ok(LoadedDocuments { documents, pending })
    }

    /// Loads every document and adds them to `environment` as one composite
    /// layer named [`COMPOSITE_SOURCE_NAME`].
    ///
    /// The layer goes last, behind every local layer, unless `remote_first`
    /// is set. On error the environment is left untouched.
    pub async fn load_config(
        &self,
        environment: &Environment,
    ) -> Result<PendingRefresh, LoadError> {
        let loaded = self.load_all(environment).await?;
        let composite = loaded.to_composite();

        info!(
            "Loaded {} nacos config documents into {}",
            composite.len(),
            COMPOSITE_SOURCE_NAME
        );

        if self.properties.remote_first {
            environment.add_first(composite);
        } else {
            environment.add_last(composite);
        }

        Ok(loaded.pending)
    }

    /// A registrar that attaches listeners through this loader's clients.
    pub fn refresh_registrar(&self) -> DeferredRefreshRegistrar {
        DeferredRefreshRegistrar::new(
            self.properties.auto_refresh,
            Arc::new(ClientListenerRegistrar::new(Arc::clone(&self.fetcher))),
        )
    }
}

type ResolvedTarget<'a> = (&'a TargetSpec, Vec<DataId>, Arc<ConnectionProperties>);

/// Pairs a target with its ids and connection; `None` when it has no ids.
fn resolve_target(
    spec: &TargetSpec,
    connection: Arc<ConnectionProperties>,
) -> Result<Option<ResolvedTarget<'_>>, ConfigurationError> {
    let data_ids = spec.effective_data_ids();
    if data_ids.is_empty() {
        debug!("No data ids configured for target on {}", connection.identity());
        return Ok(None);
    }

    if !connection.is_addressable() {
        return Err(ConfigurationError::Missing(format!(
            "server_addr or endpoint for data-id '{}'",
            data_ids[0]
        )));
    }

    Ok(Some((spec, data_ids, connection)))
}
