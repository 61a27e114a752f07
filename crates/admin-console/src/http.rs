// crates/admin-console/src/http.rs
// Shared HTTP client for all API calls

use crate::{ConsoleError, Result};

/// Idle connections kept per host
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Create the shared HTTP client.
///
/// Calls are fire-once: no request timeout and no retries are configured, a
/// call runs until the exchange completes or the transport fails.
/// `accept_invalid_certs` exists for the self-signed certificate of a local
/// development API and must stay off elsewhere.
pub fn create_shared_client(accept_invalid_certs: bool) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConsoleError::Config(format!("failed to build HTTP client: {}", e)))
}
