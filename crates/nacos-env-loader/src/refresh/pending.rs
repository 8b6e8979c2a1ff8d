use std::sync::Arc;

use nacos_env_core::Environment;

use crate::connection::ConnectionProperties;
use crate::document::FetchedDocument;

/// A loaded document together with what a listener needs to refresh it.
#[derive(Debug, Clone)]
pub struct PendingRefreshEntry {
    document: Arc<FetchedDocument>,
    connection: Arc<ConnectionProperties>,
    environment: Environment,
}

impl PendingRefreshEntry {
    pub fn new(
        document: Arc<FetchedDocument>,
        connection: Arc<ConnectionProperties>,
        environment: Environment,
    ) -> Self {
        Self {
            document,
            connection,
            environment,
        }
    }

    pub fn document(&self) -> &Arc<FetchedDocument> {
        &self.document
    }

    /// The connection the document was fetched with.
    pub fn connection(&self) -> &Arc<ConnectionProperties> {
        &self.connection
    }

    /// The environment the document's layer lives in.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

/// Documents of one load cycle awaiting listener registration, in fetch order.
///
/// Not `Clone`: registration consumes it, so it runs at most once per cycle.
#[derive(Debug, Default)]
pub struct PendingRefresh {
    entries: Vec<PendingRefreshEntry>,
}

impl PendingRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PendingRefreshEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PendingRefreshEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for PendingRefresh {
    type Item = PendingRefreshEntry;
    type IntoIter = std::vec::IntoIter<PendingRefreshEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PendingRefresh {
    type Item = &'a PendingRefreshEntry;
    type IntoIter = std::slice::Iter<'a, PendingRefreshEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
