//! Deferred hot-refresh registration.
//!
//! Loading records which documents may refresh; listeners are attached only
//! later, once the host is ready, by handing the recorded [`PendingRefresh`]
//! to a [`DeferredRefreshRegistrar`].

mod client_listener;
mod pending;
mod registrar;

pub use client_listener::ClientListenerRegistrar;
pub use pending::{PendingRefresh, PendingRefreshEntry};
pub use registrar::{DeferredRefreshRegistrar, RefreshListenerRegistrar, RefreshSummary};
