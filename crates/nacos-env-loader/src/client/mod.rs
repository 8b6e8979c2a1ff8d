//! Config-service client seam.

mod listener;
mod traits;

pub use listener::{ConfigChangeListener, ConfigResponse, FnConfigChangeListener};
pub use traits::{ClientFactory, ConfigServiceClient};
