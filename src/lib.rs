pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod session;
pub mod tree;
pub mod utils;

pub use client::ApiClient;
pub use session::SessionStore;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use config::Config;

/// Shared handles for one CLI invocation.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub client: ApiClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let session = Arc::new(SessionStore::open(config.session_file()));
        let client = ApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
            session.clone(),
        )?;
        Ok(Self {
            config,
            session,
            client,
        })
    }
}
