// crates/admin-console/src/session.rs
// Who is logged in and with which roles, backed by client storage

use crate::api::{ApiError, ApiGateway, RequestOptions};
use crate::storage::{ClientStorage, USER_ROLES_KEY, USERNAME_KEY};
use admin_types::{LoginRequest, LoginResponse};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Endpoint performing the credential exchange
pub const LOGIN_PATH: &str = "/auth/login";

/// Role that unlocks the user administration screens
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Default)]
struct SessionState {
    authenticated: bool,
    roles: Vec<String>,
}

/// Session context for one running client.
///
/// Built explicitly at startup with [`Session::hydrate`] and handed to every
/// consumer; `logout` is its teardown. The flags here are local: nothing is
/// re-validated against the server, so a token that expired server-side
/// still reads as logged in until a call comes back 401 and
/// [`Session::expire_on_unauthorized`] runs.
pub struct Session {
    api: Arc<ApiGateway>,
    storage: Arc<dyn ClientStorage>,
    state: RwLock<SessionState>,
}

impl Session {
    /// Restore session state from what the gateway and storage already hold.
    ///
    /// Logged-in means "the gateway holds a token". The role cache is read
    /// from storage and fails closed to empty when it is missing or corrupt.
    pub async fn hydrate(api: Arc<ApiGateway>, storage: Arc<dyn ClientStorage>) -> Self {
        let authenticated = api.has_token().await;
        let roles = load_roles(storage.as_ref());
        debug!(authenticated, roles = roles.len(), "Session hydrated");

        Self {
            api,
            storage,
            state: RwLock::new(SessionState {
                authenticated,
                roles,
            }),
        }
    }

    /// Gateway shared with this session, already carrying its token
    pub fn api(&self) -> &Arc<ApiGateway> {
        &self.api
    }

    /// Storage the session persists to; the route guard reads it directly
    pub fn storage(&self) -> &dyn ClientStorage {
        self.storage.as_ref()
    }

    /// Exchange credentials for a token and cache the identity.
    ///
    /// On failure the session is marked logged out and the gateway error is
    /// returned as-is.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = match self
            .api
            .post::<LoginResponse, _>(LOGIN_PATH, credentials, RequestOptions::new())
            .await
        {
            Ok(response) => response.data,
            Err(e) => {
                self.state.write().await.authenticated = false;
                warn!(username = %credentials.username, status = e.status, "Login failed");
                return Err(e);
            }
        };

        self.api.set_token(Some(&response.token)).await;

        if let Err(e) = self.storage.set_item(USERNAME_KEY, &response.username) {
            warn!(error = %e, "Failed to persist username");
        }
        match serde_json::to_string(&response.roles) {
            Ok(encoded) => {
                if let Err(e) = self.storage.set_item(USER_ROLES_KEY, &encoded) {
                    warn!(error = %e, "Failed to persist roles");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode roles"),
        }

        {
            let mut state = self.state.write().await;
            state.roles = response.roles.clone();
            state.authenticated = true;
        }

        info!(username = %response.username, roles = ?response.roles, "Logged in");
        Ok(response)
    }

    /// Forget the token and the cached identity. Never fails, never calls
    /// the server.
    pub async fn logout(&self) {
        self.api.set_token(None).await;

        for key in [USERNAME_KEY, USER_ROLES_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!(key, error = %e, "Failed to clear session key");
            }
        }

        let mut state = self.state.write().await;
        state.roles.clear();
        state.authenticated = false;
        info!("Logged out");
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.authenticated
    }

    /// Persisted username, if any
    pub fn username(&self) -> Option<String> {
        self.storage.get_item(USERNAME_KEY)
    }

    /// Cached roles in the order the server reported them
    pub async fn roles(&self) -> Vec<String> {
        self.state.read().await.roles.clone()
    }

    /// Exact, case-sensitive role membership
    pub async fn has_role(&self, role: &str) -> bool {
        self.state.read().await.roles.iter().any(|r| r == role)
    }

    pub async fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE).await
    }

    /// Log out if `err` says the token is no longer accepted.
    ///
    /// Returns true when the session was torn down.
    pub async fn expire_on_unauthorized(&self, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        info!("Server rejected the session token, logging out");
        self.logout().await;
        true
    }
}

fn load_roles(storage: &dyn ClientStorage) -> Vec<String> {
    let Some(raw) = storage.get_item(USER_ROLES_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(roles) => roles,
        Err(e) => {
            warn!(error = %e, "Persisted roles are malformed, ignoring them");
            Vec::new()
        }
    }
}
