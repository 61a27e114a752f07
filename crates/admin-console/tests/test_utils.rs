//! Test utilities for admin console integration tests
//!
//! Runs an in-process mock of the admin API on an ephemeral loopback port.

#![allow(dead_code)]

use admin_console::AdminConsole;
use admin_console::api::ApiGateway;
use admin_console::config::ConsoleConfig;
use admin_console::http::create_shared_client;
use admin_console::storage::ClientStorage;
use admin_types::{CreateUserRequest, LoginRequest, RoleDto, UpdateUserRequest, UserDto};
use axum::extract::{Path, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const ADMIN_PASSWORD: &str = "admin123";
pub const USER_PASSWORD: &str = "user123";

/// What the mock saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
}

/// Mutable state behind the mock API
#[derive(Default)]
pub struct MockState {
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub users: Mutex<Vec<UserDto>>,
    pub roles: Vec<RoleDto>,
    /// username -> (password, roles as returned by login)
    credentials: HashMap<String, (String, Vec<String>)>,
    /// issued token -> roles
    tokens: Mutex<HashMap<String, Vec<String>>>,
    pub last_create: Mutex<Option<CreateUserRequest>>,
    pub last_update: Mutex<Option<UpdateUserRequest>>,
    /// When set, a successful DELETE answers 200 with this body instead of 204
    pub delete_reply: Mutex<Option<serde_json::Value>>,
}

impl MockState {
    fn seeded() -> Self {
        let role = |id: i64, name: &str| RoleDto {
            id,
            name: name.to_string(),
            description: Some(format!("{} role", name)),
        };
        let user = |id: i64, name: &str, roles: &[&str]| UserDto {
            id,
            username: name.to_string(),
            email: format!("{}@example.com", name),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: None,
        };

        let mut credentials = HashMap::new();
        credentials.insert(
            "alice".to_string(),
            (
                ADMIN_PASSWORD.to_string(),
                vec!["User".to_string(), "Admin".to_string()],
            ),
        );
        credentials.insert(
            "bob".to_string(),
            (USER_PASSWORD.to_string(), vec!["User".to_string()]),
        );

        Self {
            users: Mutex::new(vec![
                user(1, "alice", &["Admin", "User"]),
                user(2, "bob", &["User"]),
                user(3, "carol", &["User", "Editor"]),
            ]),
            roles: vec![role(1, "Admin"), role(2, "User"), role(3, "Editor")],
            credentials,
            ..Default::default()
        }
    }

    fn roles_for(&self, headers: &HeaderMap) -> Option<Vec<String>> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.tokens.lock().unwrap().get(token).cloned()
    }

    /// 401 without a known token, 403 without the Admin role
    fn require_admin(&self, headers: &HeaderMap) -> Result<(), Response> {
        match self.roles_for(headers) {
            None => Err(message(StatusCode::UNAUTHORIZED, "Unauthorized")),
            Some(roles) if !roles.iter().any(|r| r == "Admin") => {
                Err(message(StatusCode::FORBIDDEN, "Forbidden"))
            }
            Some(_) => Ok(()),
        }
    }

    /// Invalidate every issued token, as if they expired server-side
    pub fn revoke_all(&self) {
        self.tokens.lock().unwrap().clear();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

type Shared = State<Arc<MockState>>;

async fn record(State(state): Shared, req: Request, next: Next) -> Response {
    let recorded = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            authorization: header(AUTHORIZATION.as_str()),
            content_type: header(CONTENT_TYPE.as_str()),
            request_id: header("x-request-id"),
        }
    };
    state.requests.lock().unwrap().push(recorded);
    next.run(req).await
}

async fn login(State(state): Shared, Json(body): Json<LoginRequest>) -> Response {
    match state.credentials.get(&body.username) {
        Some((password, roles)) if *password == body.password => {
            let token = format!("tok-{}", body.username);
            state.tokens.lock().unwrap().insert(token.clone(), roles.clone());
            Json(json!({ "token": token, "username": body.username, "roles": roles }))
                .into_response()
        }
        _ => message(StatusCode::UNAUTHORIZED, "Invalid username or password"),
    }
}

async fn dashboard(State(state): Shared, headers: HeaderMap) -> Response {
    match state.roles_for(&headers) {
        None => message(StatusCode::UNAUTHORIZED, "Unauthorized"),
        Some(roles) => {
            let role = if roles.iter().any(|r| r == "Admin") {
                "Admin"
            } else {
                "User"
            };
            Json(json!({ "message": format!("Welcome to the {} dashboard", role), "role": role }))
                .into_response()
        }
    }
}

async fn list_users(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    Json(state.users.lock().unwrap().clone()).into_response()
}

async fn create_user(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequest>,
) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    let mut users = state.users.lock().unwrap();
    if users.iter().any(|u| u.username == body.username) {
        return message(StatusCode::CONFLICT, "Username already exists");
    }
    let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    let roles = state
        .roles
        .iter()
        .filter(|r| body.role_ids.contains(&r.id))
        .map(|r| r.name.clone())
        .collect();
    let user = UserDto {
        id,
        username: body.username.clone(),
        email: body.email.clone(),
        roles,
        created_at: "2024-06-01T00:00:00Z".to_string(),
        updated_at: None,
    };
    users.push(user.clone());
    *state.last_create.lock().unwrap() = Some(body);
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn get_user(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    match state.users.lock().unwrap().iter().find(|u| u.id == id) {
        Some(user) => Json(user.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_user(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    let mut users = state.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|u| u.id == id) else {
        return message(StatusCode::NOT_FOUND, "User not found");
    };
    if let Some(username) = &body.username {
        user.username = username.clone();
    }
    if let Some(email) = &body.email {
        user.email = email.clone();
    }
    if let Some(ids) = &body.role_ids {
        user.roles = state
            .roles
            .iter()
            .filter(|r| ids.contains(&r.id))
            .map(|r| r.name.clone())
            .collect();
    }
    user.updated_at = Some("2024-06-02T00:00:00Z".to_string());
    *state.last_update.lock().unwrap() = Some(body);
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_user(State(state): Shared, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    let mut users = state.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return message(StatusCode::NOT_FOUND, "User not found");
    }
    match state.delete_reply.lock().unwrap().clone() {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn list_roles(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(resp) = state.require_admin(&headers) {
        return resp;
    }
    Json(state.roles.clone()).into_response()
}

fn fixture_routes() -> Router<Arc<MockState>> {
    Router::new()
        .route(
            "/api/fixture/no-content",
            get(|| async { (StatusCode::NO_CONTENT, "ignored") }),
        )
        .route("/api/fixture/empty-ok", get(|| async { StatusCode::OK }))
        .route(
            "/api/fixture/forbidden",
            get(|| async { message(StatusCode::FORBIDDEN, "Forbidden") }),
        )
        .route(
            "/api/fixture/no-message",
            get(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad" }))) }),
        )
        .route(
            "/api/fixture/plain-error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/fixture/not-json", get(|| async { "hello" }))
        .route(
            "/api/fixture/echo",
            get(|| async { Json(json!({ "ok": true })) }).post(|Json(body): Json<serde_json::Value>| async move {
                (StatusCode::CREATED, Json(body))
            }),
        )
}

/// In-process admin API bound to 127.0.0.1 on an ephemeral port
pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::seeded());

        let app = Router::new()
            .route("/api/auth/login", axum::routing::post(login))
            .route("/api/dashboard", get(dashboard))
            .route("/api/User", get(list_users).post(create_user))
            .route(
                "/api/User/{id}",
                get(get_user).put(update_user).delete(delete_user),
            )
            .route("/api/Role", get(list_roles))
            .merge(fixture_routes())
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("mock API address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            api_url: self.base_url.clone(),
            state_file: PathBuf::from("unused.json"),
            accept_invalid_certs: false,
        }
    }

    pub fn gateway(&self, storage: Arc<dyn ClientStorage>) -> ApiGateway {
        let client = create_shared_client(false).expect("Failed to build HTTP client");
        ApiGateway::new(&self.base_url, client, storage)
    }

    pub async fn console(&self, storage: Arc<dyn ClientStorage>) -> AdminConsole {
        AdminConsole::with_storage(&self.config(), storage)
            .await
            .expect("Failed to build console")
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL nothing is listening on
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
