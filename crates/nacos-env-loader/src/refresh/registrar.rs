use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::pending::{PendingRefresh, PendingRefreshEntry};
use crate::error::RefreshRegistrationError;

/// Attaches a change listener for one loaded document.
#[async_trait]
pub trait RefreshListenerRegistrar: Send + Sync {
    async fn add_listener_if_auto_refreshed(
        &self,
        entry: &PendingRefreshEntry,
    ) -> Result<(), RefreshRegistrationError>;
}

/// Outcome of one registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Listeners attached.
    pub registered: usize,
    /// Documents that do not refresh.
    pub skipped: usize,
    /// Attachments that failed and were logged.
    pub failed: usize,
}

/// Attaches listeners for the documents of a finished load cycle.
pub struct DeferredRefreshRegistrar {
    auto_refresh: bool,
    registrar: Arc<dyn RefreshListenerRegistrar>,
}

impl DeferredRefreshRegistrar {
    /// `auto_refresh` is the global switch; when false nothing is attached.
    pub fn new(auto_refresh: bool, registrar: Arc<dyn RefreshListenerRegistrar>) -> Self {
        Self {
            auto_refresh,
            registrar,
        }
    }

    /// Registers listeners for every auto-refreshed document, in load order.
    ///
    /// A failed registration is logged and the pass continues; the document
    /// just stays static.
    pub async fn register_all(&self, pending: PendingRefresh) -> RefreshSummary {
        let mut summary = RefreshSummary::default();

        if !self.auto_refresh {
            debug!("Auto refresh disabled, {} documents stay static", pending.len());
            summary.skipped = pending.len();
            return summary;
        }

        for entry in pending {
            let document = entry.document();
            if !document.auto_refreshed() {
                debug!("Skipping refresh listener for {}", document.derived_name());
                summary.skipped += 1;
                continue;
            }

            match self.registrar.add_listener_if_auto_refreshed(&entry).await {
                Ok(()) => summary.registered += 1,
                Err(e) => {
                    warn!("{}", e);
                    summary.failed += 1;
                },
            }
        }

        info!(
            "Refresh listeners registered: {}, skipped: {}, failed: {}",
            summary.registered, summary.skipped, summary.failed
        );
        summary
    }
}

impl std::fmt::Debug for DeferredRefreshRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredRefreshRegistrar")
            .field("auto_refresh", &self.auto_refresh)
            .finish_non_exhaustive()
    }
}
