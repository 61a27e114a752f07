// crates/admin-console/src/guard.rs
// Navigation guard keyed only on the persisted token

use crate::storage::{ClientStorage, TOKEN_KEY};

/// Login screen
pub const LOGIN_ROUTE: &str = "/";
/// Landing screen after login
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide whether navigating to `path` may proceed.
///
/// Only the login route and the dashboard subtree are guarded. Without a
/// token a guarded route sends you to login; with one, the login route sends
/// you to the dashboard.
pub fn check_route(path: &str, has_token: bool) -> GuardDecision {
    if !is_guarded(path) {
        return GuardDecision::Allow;
    }

    let is_login = path == LOGIN_ROUTE;
    match (has_token, is_login) {
        (false, false) => GuardDecision::Redirect(LOGIN_ROUTE),
        (true, true) => GuardDecision::Redirect(DASHBOARD_ROUTE),
        _ => GuardDecision::Allow,
    }
}

/// [`check_route`] reading token presence from storage
pub fn check_route_with(storage: &dyn ClientStorage, path: &str) -> GuardDecision {
    let has_token = storage
        .get_item(TOKEN_KEY)
        .is_some_and(|t| !t.is_empty());
    check_route(path, has_token)
}

fn is_guarded(path: &str) -> bool {
    path == LOGIN_ROUTE
        || path == DASHBOARD_ROUTE
        || path
            .strip_prefix(DASHBOARD_ROUTE)
            .is_some_and(|rest| rest.starts_with('/'))
}
