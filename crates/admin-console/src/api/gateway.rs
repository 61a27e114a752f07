// crates/admin-console/src/api/gateway.rs
// Single choke point for outbound API calls: auth header, error normalization

use super::error::ApiError;
use crate::storage::{ClientStorage, TOKEN_KEY};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Successful call: parsed body plus the HTTP status it came with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

/// Per-call extras. Headers given here override `Content-Type` but never
/// the `Authorization` header derived from the held token.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP access layer for the admin API.
///
/// Owns the base URL and the bearer token. The token is hydrated from
/// storage on construction and written back on every `set_token`.
pub struct ApiGateway {
    base_url: String,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
    storage: Arc<dyn ClientStorage>,
}

impl ApiGateway {
    pub fn new(
        base_url: impl Into<String>,
        client: reqwest::Client,
        storage: Arc<dyn ClientStorage>,
    ) -> Self {
        let base_url = base_url.into();
        let token = storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty());
        debug!(base_url = %base_url, has_token = token.is_some(), "API gateway ready");

        Self {
            base_url,
            client,
            token: RwLock::new(token),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Replace the token used by all later calls and persist it.
    ///
    /// `None` (or an empty token) clears both the held and the persisted
    /// value. A storage failure is logged; the in-memory token still changes.
    pub async fn set_token(&self, token: Option<&str>) {
        let token = token.filter(|t| !t.is_empty()).map(str::to_string);

        let persisted = match &token {
            Some(t) => self.storage.set_item(TOKEN_KEY, t),
            None => self.storage.remove_item(TOKEN_KEY),
        };
        if let Err(e) = persisted {
            warn!(error = %e, "Failed to persist token");
        }

        *self.token.write().await = token;
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::GET, path, None, options).await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::DELETE, path, None, options).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.build_headers(&options).await?;

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %method, path, error = %e, "API request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let code = status.as_u16();
        debug!(method = %method, path, status = code, "API response");

        if status == StatusCode::NO_CONTENT
            || (status == StatusCode::OK && declares_empty_body(response.headers()))
        {
            let data = serde_json::from_value(serde_json::Value::Object(Default::default()))?;
            return Ok(ApiResponse { data, status: code });
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_response_body(code, &bytes);
            debug!(method = %method, path, status = code, message = %err.message, "API call rejected");
            return Err(err);
        }

        let data = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(method = %method, path, error = %e, "Unparsable API response body");
            ApiError::from(e)
        })?;

        Ok(ApiResponse { data, status: code })
    }

    async fn build_headers(&self, options: &RequestOptions) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::transport(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::transport(format!("invalid value for header '{}': {}", name.as_str(), e)))?;
            headers.insert(name, value);
        }

        if let Some(token) = self.token.read().await.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::transport(format!("token is not a valid header value: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

/// True when the response announces `Content-Length: 0`
fn declares_empty_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
