//! HTTP surface of the relay

pub mod assets;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::lifecycle::Lifecycle;

pub use error::ApiError;
pub use router::{build_router, run_server};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<Lifecycle>,
    pub auth: AuthConfig,
}
