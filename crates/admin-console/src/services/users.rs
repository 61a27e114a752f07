// crates/admin-console/src/services/users.rs
// User account endpoints

use super::roles::list_roles;
use crate::api::{ApiError, ApiGateway, RequestOptions};
use admin_types::{CreateUserRequest, RoleDto, UpdateUserRequest, UserDto};

pub const USERS_PATH: &str = "/User";

pub fn user_path(id: i64) -> String {
    format!("{}/{}", USERS_PATH, id)
}

pub async fn list_users(api: &ApiGateway) -> Result<Vec<UserDto>, ApiError> {
    Ok(api.get::<Vec<UserDto>>(USERS_PATH, RequestOptions::new()).await?.data)
}

pub async fn get_user(api: &ApiGateway, id: i64) -> Result<UserDto, ApiError> {
    Ok(api.get::<UserDto>(&user_path(id), RequestOptions::new()).await?.data)
}

/// Create an account. The response body is not relied on; the server may
/// answer with the new user, an id, or nothing at all.
pub async fn create_user(api: &ApiGateway, request: &CreateUserRequest) -> Result<u16, ApiError> {
    let response = api
        .post::<serde_json::Value, _>(USERS_PATH, request, RequestOptions::new())
        .await?;
    Ok(response.status)
}

pub async fn update_user(
    api: &ApiGateway,
    id: i64,
    request: &UpdateUserRequest,
) -> Result<u16, ApiError> {
    let response = api
        .put::<serde_json::Value, _>(&user_path(id), request, RequestOptions::new())
        .await?;
    Ok(response.status)
}

/// Delete an account. Any success body is accepted and ignored.
pub async fn delete_user(api: &ApiGateway, id: i64) -> Result<u16, ApiError> {
    let response = api.delete::<serde_json::Value>(&user_path(id), RequestOptions::new()).await?;
    Ok(response.status)
}

/// Everything the edit screen needs, fetched concurrently
#[derive(Debug, Clone)]
pub struct UserEditor {
    pub user: UserDto,
    pub roles: Vec<RoleDto>,
}

/// Fetch one user and the role catalogue in parallel; fails if either does
pub async fn load_user_editor(api: &ApiGateway, id: i64) -> Result<UserEditor, ApiError> {
    let (user, roles) = futures::future::try_join(get_user(api, id), list_roles(api)).await?;
    Ok(UserEditor { user, roles })
}
