// crates/admin-console/src/console.rs
// Role-gated console operations on top of the session and the API services

use crate::api::{ApiError, ApiGateway};
use crate::config::ConsoleConfig;
use crate::error::{Action, ConsoleError, Result};
use crate::http::create_shared_client;
use crate::services::{self, UserEditor};
use crate::session::Session;
use crate::storage::{ClientStorage, FileStorage};
use crate::validation::{FormErrors, NewUserForm, UserChanges};
use admin_types::{
    CreateUserRequest, DashboardResponse, LoginRequest, LoginResponse, RoleDto,
    UpdateUserRequest, UserDto,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// The console as its screens see it: one session plus the rules about who
/// may do what.
pub struct AdminConsole {
    session: Arc<Session>,
}

impl AdminConsole {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Wire up storage, HTTP client, gateway and session from configuration
    pub async fn bootstrap(config: &ConsoleConfig) -> Result<Self> {
        let storage: Arc<dyn ClientStorage> = Arc::new(FileStorage::open(&config.state_file));
        Self::with_storage(config, storage).await
    }

    /// Same as [`AdminConsole::bootstrap`] over caller-provided storage
    pub async fn with_storage(
        config: &ConsoleConfig,
        storage: Arc<dyn ClientStorage>,
    ) -> Result<Self> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConsoleError::Config(validation.error_summary()));
        }

        let client = create_shared_client(config.accept_invalid_certs)?;
        let api = Arc::new(ApiGateway::new(&config.api_url, client, storage.clone()));
        let session = Session::hydrate(api, storage).await;
        Ok(Self::new(Arc::new(session)))
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn api(&self) -> &ApiGateway {
        self.session.api()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let credentials = LoginRequest::new(username, password);
        self.session
            .login(&credentials)
            .await
            .map_err(|e| ConsoleError::api(Action::Login, e))
    }

    pub async fn logout(&self) {
        self.session.logout().await;
    }

    /// Landing data for any logged-in user
    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        self.require_login().await?;
        match services::fetch_dashboard(self.api()).await {
            Ok(dashboard) => Ok(dashboard),
            Err(e) => Err(self.fail(Action::ViewDashboard, e).await),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserDto>> {
        self.require_admin().await?;
        match services::list_users(self.api()).await {
            Ok(users) => Ok(users),
            Err(e) => Err(self.fail(Action::ListUsers, e).await),
        }
    }

    pub async fn get_user(&self, id: i64) -> Result<UserDto> {
        self.require_admin().await?;
        match services::get_user(self.api(), id).await {
            Ok(user) => Ok(user),
            Err(e) => Err(self.fail(Action::LoadUser, e).await),
        }
    }

    pub async fn list_roles(&self) -> Result<Vec<RoleDto>> {
        self.require_admin().await?;
        match services::list_roles(self.api()).await {
            Ok(roles) => Ok(roles),
            Err(e) => Err(self.fail(Action::ListRoles, e).await),
        }
    }

    /// User plus role catalogue for editing; refuses your own account
    pub async fn edit_user(&self, id: i64) -> Result<UserEditor> {
        self.require_admin().await?;
        let editor = match services::load_user_editor(self.api(), id).await {
            Ok(editor) => editor,
            Err(e) => return Err(self.fail(Action::LoadUser, e).await),
        };
        self.refuse_self(&editor.user, "edit")?;
        Ok(editor)
    }

    /// Validate the form, resolve role names to ids and create the account
    pub async fn create_user(&self, form: &NewUserForm) -> Result<()> {
        self.require_admin().await?;
        form.validate()?;

        let roles = match services::list_roles(self.api()).await {
            Ok(roles) => roles,
            Err(e) => return Err(self.fail(Action::ListRoles, e).await),
        };
        check_role_names(&roles, &form.roles)?;
        let request = CreateUserRequest {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            role_ids: services::resolve_role_ids(&roles, &form.roles),
        };

        match services::create_user(self.api(), &request).await {
            Ok(status) => {
                info!(username = %request.username, status, "User created");
                Ok(())
            }
            Err(e) => Err(self.fail(Action::CreateUser, e).await),
        }
    }

    pub async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<()> {
        self.require_admin().await?;
        changes.validate()?;
        if changes.is_empty() {
            debug!(id, "No changes requested, skipping update");
            return Ok(());
        }

        let editor = match services::load_user_editor(self.api(), id).await {
            Ok(editor) => editor,
            Err(e) => return Err(self.fail(Action::LoadUser, e).await),
        };
        self.refuse_self(&editor.user, "edit")?;
        if let Some(names) = &changes.roles {
            check_role_names(&editor.roles, names)?;
        }

        let request = UpdateUserRequest {
            id,
            username: changes.username.clone(),
            email: changes.email.clone(),
            password: changes.password.clone(),
            role_ids: changes
                .roles
                .as_ref()
                .map(|names| services::resolve_role_ids(&editor.roles, names)),
        };

        match services::update_user(self.api(), id, &request).await {
            Ok(status) => {
                info!(id, status, "User updated");
                Ok(())
            }
            Err(e) => Err(self.fail(Action::UpdateUser, e).await),
        }
    }

    /// Delete an account other than your own; returns the deleted user
    pub async fn delete_user(&self, id: i64) -> Result<UserDto> {
        self.require_admin().await?;

        let user = match services::get_user(self.api(), id).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(Action::LoadUser, e).await),
        };
        self.refuse_self(&user, "delete")?;

        match services::delete_user(self.api(), id).await {
            Ok(status) => {
                info!(id, username = %user.username, status, "User deleted");
                Ok(user)
            }
            Err(e) => Err(self.fail(Action::DeleteUser, e).await),
        }
    }

    async fn require_login(&self) -> Result<()> {
        if self.session.is_logged_in().await {
            Ok(())
        } else {
            Err(ConsoleError::AccessDenied("not logged in".to_string()))
        }
    }

    async fn require_admin(&self) -> Result<()> {
        self.require_login().await?;
        if self.session.is_admin().await {
            Ok(())
        } else {
            Err(ConsoleError::AccessDenied(
                "the Admin role is required".to_string(),
            ))
        }
    }

    fn refuse_self(&self, user: &UserDto, verb: &'static str) -> Result<()> {
        match self.session.username() {
            Some(current) if current == user.username => {
                Err(ConsoleError::SelfModification(verb))
            }
            _ => Ok(()),
        }
    }

    /// Log a failed call, expire the session on 401, and wrap the error
    async fn fail(&self, action: Action, err: ApiError) -> ConsoleError {
        error!(action = %action, status = err.status, kind = ?err.kind, message = %err.message, "Console call failed");
        self.session.expire_on_unauthorized(&err).await;
        ConsoleError::api(action, err)
    }
}

/// Reject role names the server does not know instead of silently dropping them
fn check_role_names(roles: &[RoleDto], names: &[String]) -> Result<()> {
    let unknown = services::unknown_role_names(roles, names);
    if unknown.is_empty() {
        return Ok(());
    }
    let mut errors = FormErrors::default();
    errors.add("roles", &format!("Unknown role: {}", unknown.join(", ")));
    Err(ConsoleError::Validation(errors))
}
