//! HTTP client for the StudentHub backend.
//!
//! This module provides the `ApiClient` transport core and the auth
//! resource wrappers. Student and admin resource wrappers live in
//! sibling modules and share the same request plumbing.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Profile;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default backend base URL when no environment override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Wire types
// ============================================================================

/// Generic `{success, message}` acknowledgement used by most POST routes.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerAck {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Response body of `POST /auth/login`. The body also carries a
/// `success` flag, but token presence is what decides the outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Minimal identity returned by the login route.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Response body of `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<MeUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

// ============================================================================
// Client
// ============================================================================

/// API client for the StudentHub backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token used for authenticated requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token; subsequent protected calls fail fast.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid token bytes: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Precondition for endpoints that can never succeed without a token:
    /// fail with `NotAuthenticated` before touching the network.
    pub(super) fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::NotAuthenticated);
        }
        Ok(())
    }

    /// Check a response, mapping non-success statuses to `ApiError`.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Coerce a JSON value into a typed list. Non-array payloads from a
    /// misbehaving backend become an empty collection rather than an error.
    fn coerce_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse list: {}", e))),
            other => {
                warn!(kind = %json_kind(&other), "Expected a JSON array, coercing to empty list");
                Ok(Vec::new())
            }
        }
    }

    // ===== Request plumbing shared by the resource wrappers =====

    pub(super) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .headers(self.bearer_headers()?)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }

    pub(super) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let value: Value = self.get_json(path).await?;
        Self::coerce_list(value)
    }

    pub(super) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .headers(self.bearer_headers()?)
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }

    pub(super) async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .put(self.endpoint(path))
            .headers(self.bearer_headers()?)
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }

    pub(super) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .delete(self.endpoint(path))
            .headers(self.bearer_headers()?)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }

    pub(super) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .headers(self.bearer_headers()?)
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }

    // ===== Auth resource =====

    /// `POST /auth/login`. The payload is prepared by the session store
    /// (email-vs-username routing); this wrapper owns status handling.
    ///
    /// Login is a public endpoint: a 401 here means bad credentials, not a
    /// rejected session, so the body's message is surfaced instead of the
    /// forced-logout error.
    pub async fn login(&self, payload: &Value) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        debug!(status = %status, "Login response received");

        let parsed: LoginResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(ApiError::InvalidResponse(
                    "Invalid response from server. Please check if the backend is running."
                        .to_string(),
                ))
            }
        };

        if !status.is_success() {
            let message = parsed
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Api(message));
        }

        Ok(parsed)
    }

    /// `POST /auth/signup`. Public; registration stays pending until an
    /// admin approves the account.
    pub async fn signup(&self, payload: &Value) -> Result<ServerAck, ApiError> {
        self.post_json("/auth/signup", payload).await
    }

    /// `GET /auth/me`. Requires bearer auth; a 401 surfaces as
    /// `NotAuthenticated` so the session store can discard its tokens.
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.require_token()?;
        self.get_json("/auth/me").await
    }

    /// `POST /auth/change-password`.
    pub async fn change_password(&self, new_password: &str) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.post_json(
            "/auth/change-password",
            &serde_json::json!({ "newPassword": new_password }),
        )
        .await
    }

    /// `POST /auth/forgot-username`.
    pub async fn forgot_username(&self, email: &str) -> Result<ServerAck, ApiError> {
        self.post_json("/auth/forgot-username", &serde_json::json!({ "email": email }))
            .await
    }

    /// `POST /auth/forgot-password`.
    pub async fn forgot_password(&self, email: &str) -> Result<ServerAck, ApiError> {
        self.post_json("/auth/forgot-password", &serde_json::json!({ "email": email }))
            .await
    }

    /// `POST /auth/reset-password`.
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<ServerAck, ApiError> {
        self.post_json(
            "/auth/reset-password",
            &serde_json::json!({ "email": email, "otp": otp, "newPassword": new_password }),
        )
        .await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:5001/").expect("client");
        assert_eq!(client.endpoint("/auth/me"), "http://localhost:5001/auth/me");
    }

    #[test]
    fn test_require_token_fails_fast_without_token() {
        let client = ApiClient::new(DEFAULT_BASE_URL).expect("client");
        let err = client.require_token().unwrap_err();
        assert!(err.is_not_authenticated());
    }

    #[test]
    fn test_coerce_list_accepts_array() {
        let value = serde_json::json!([{"id": "u-1", "file_name": "a.pdf"}]);
        let list: Vec<crate::models::DailyUpload> =
            ApiClient::coerce_list(value).expect("coerce array");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_coerce_list_turns_object_into_empty_list() {
        let value = serde_json::json!({"success": false, "message": "boom"});
        let list: Vec<crate::models::DailyUpload> =
            ApiClient::coerce_list(value).expect("coerce object");
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{
            "success": true,
            "access_token": "t1",
            "refresh_token": "t2",
            "user": {"id": "1", "email": "jane@x.com", "username": "jane", "role": "student"}
        }"#;
        let parsed: LoginResponse = serde_json::from_str(json).expect("Failed to parse login response");
        assert_eq!(parsed.access_token.as_deref(), Some("t1"));
        assert_eq!(parsed.user.as_ref().and_then(|u| u.role.as_deref()), Some("student"));
    }

    #[test]
    fn test_parse_me_response_with_trimmed_profile() {
        let json = r#"{
            "success": true,
            "user": {"id": "1", "email": "jane@x.com", "role": "admin", "profile": {
                "id": "p-1", "username": "jane", "full_name": "Jane Doe", "status": "active"
            }}
        }"#;
        let parsed: MeResponse = serde_json::from_str(json).expect("Failed to parse me response");
        let user = parsed.user.expect("user present");
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_eq!(
            user.profile.and_then(|p| p.full_name),
            Some("Jane Doe".to_string())
        );
    }
}
