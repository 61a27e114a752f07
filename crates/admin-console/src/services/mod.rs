// crates/admin-console/src/services/mod.rs
// Typed calls for the admin API endpoints

pub mod roles;
pub mod users;

use crate::api::{ApiError, ApiGateway, RequestOptions};
use admin_types::DashboardResponse;

pub use roles::{ROLES_PATH, list_roles, resolve_role_ids, unknown_role_names};
pub use users::{
    USERS_PATH, UserEditor, create_user, delete_user, get_user, list_users, load_user_editor,
    update_user, user_path,
};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Role-scoped landing data for the logged-in user
pub async fn fetch_dashboard(api: &ApiGateway) -> Result<DashboardResponse, ApiError> {
    Ok(api.get::<DashboardResponse>(DASHBOARD_PATH, RequestOptions::new()).await?.data)
}
