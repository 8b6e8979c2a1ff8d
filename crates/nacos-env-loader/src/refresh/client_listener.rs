use std::sync::Arc;

use async_trait::async_trait;
use nacos_env_core::Environment;
use tracing::{debug, info, warn};

use super::pending::PendingRefreshEntry;
use super::registrar::RefreshListenerRegistrar;
use crate::client::{ConfigChangeListener, ConfigResponse, FnConfigChangeListener};
use crate::document::FetchedDocument;
use crate::error::RefreshRegistrationError;
use crate::fetcher::DocumentFetcher;

/// Attaches listeners through the same cached clients the documents were
/// fetched with.
///
/// On every change the new content is parsed in the document's format and
/// replaces the document's layer in the environment. Content that does not
/// parse is logged and the previous layer stays in place.
#[derive(Debug, Clone)]
pub struct ClientListenerRegistrar {
    fetcher: Arc<DocumentFetcher>,
}

impl ClientListenerRegistrar {
    pub fn new(fetcher: Arc<DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    fn listener_for(entry: &PendingRefreshEntry) -> Arc<dyn ConfigChangeListener> {
        let document = Arc::clone(entry.document());
        let environment = entry.environment().clone();

        Arc::new(FnConfigChangeListener::new(move |response: ConfigResponse| {
            apply_change(&document, &environment, response);
        }))
    }
}

#[async_trait]
impl RefreshListenerRegistrar for ClientListenerRegistrar {
    async fn add_listener_if_auto_refreshed(
        &self,
        entry: &PendingRefreshEntry,
    ) -> Result<(), RefreshRegistrationError> {
        let document = entry.document();
        let to_error = |e: crate::error::ClientError| {
            RefreshRegistrationError::new(document.derived_name(), e.to_string())
        };

        let client = self
            .fetcher
            .client_for(entry.connection())
            .await
            .map_err(to_error)?;

        client
            .add_listener(document.data_id(), document.group(), Self::listener_for(entry))
            .await
            .map_err(to_error)?;

        debug!("Refresh listener attached for {}", document.derived_name());
        Ok(())
    }
}

fn apply_change(document: &FetchedDocument, environment: &Environment, response: ConfigResponse) {
    let updated = match document.with_content(response.content) {
        Ok(updated) => updated,
        Err(e) => {
            warn!(
                "Ignoring unparsable update of data-id: {}, group: {}: {}",
                document.data_id(),
                document.group(),
                e
            );
            return;
        },
    };

    match environment.replace_source(updated.to_property_source()) {
        Some(_) => info!(
            "Refreshed config from nacos, data-id: {}, group: {}",
            document.data_id(),
            document.group()
        ),
        None => warn!(
            "No property source named {} to refresh",
            document.derived_name()
        ),
    }
}
