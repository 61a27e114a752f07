// crates/admin-console/src/services/roles.rs
// Role catalogue

use crate::api::{ApiError, ApiGateway, RequestOptions};
use admin_types::RoleDto;

pub const ROLES_PATH: &str = "/Role";

pub async fn list_roles(api: &ApiGateway) -> Result<Vec<RoleDto>, ApiError> {
    Ok(api.get::<Vec<RoleDto>>(ROLES_PATH, RequestOptions::new()).await?.data)
}

/// Map selected role names to ids. Names with no matching role are dropped,
/// duplicates are kept once, and the order of `names` is preserved.
pub fn resolve_role_ids(roles: &[RoleDto], names: &[String]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        if let Some(role) = roles.iter().find(|r| &r.name == name)
            && !ids.contains(&role.id)
        {
            ids.push(role.id);
        }
    }
    ids
}

/// Names in `names` that match no role
pub fn unknown_role_names<'a>(roles: &[RoleDto], names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|n| !roles.iter().any(|r| &r.name == *n))
        .map(String::as_str)
        .collect()
}
