//! The session store: single source of truth for "who is logged in".
//!
//! One `Session` exists per process, owned by the application. Every
//! operation that mutates tokens does so through the [`TokenStore`];
//! every operation that talks to the backend borrows the [`ApiClient`].
//! Callers never see a panic or a stray `Err` from the sign-in path -
//! failures become outcome values with human-readable messages.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, MeUser, ServerAck};
use crate::models::Profile;

use super::TokenStore;

// ============================================================================
// Role
// ============================================================================

/// The two roles the portal knows. The backend sends a free-form string;
/// [`Role::parse`] closes it into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    /// Parse the backend's role string. Only a case-insensitive `"admin"`
    /// maps to `Admin`; anything unrecognized or missing is a student.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(v) if v.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Student,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

// ============================================================================
// Session data
// ============================================================================

/// The authenticated user held in memory for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    /// Full profile when the `me` fetch succeeded; `None` when the session
    /// was established from the login response's minimal identity.
    pub profile: Option<Profile>,
}

impl AuthUser {
    fn from_me(user: MeUser) -> Self {
        let role = Role::parse(user.role.as_deref());
        Self {
            id: user.id.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            role,
            profile: user.profile,
        }
    }
}

/// Result of a sign-in attempt. Sign-in never returns `Err`; every
/// failure mode is folded into `Failure` with a displayable message.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    Success { role: Role },
    Failure { message: String },
}

impl SignInOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SignInOutcome::Success { .. })
    }
}

/// Result of the public account operations (sign-up, recovery flows).
#[derive(Debug, Clone)]
pub struct OpOutcome {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Session store
// ============================================================================

pub struct Session {
    tokens: TokenStore,
    user: Option<AuthUser>,
}

impl Session {
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens, user: None }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Restore the session from the stored access token, once at boot.
    ///
    /// No stored token: the session stays empty and the network is never
    /// touched. A rejected token (non-OK from `/auth/me`) removes both
    /// stored tokens silently. Transport or parse failures are logged and
    /// leave the stored tokens alone - they run unsupervised at boot and
    /// have no user to report to.
    pub async fn restore(&mut self, api: &mut ApiClient) {
        let Some(token) = self.tokens.access_token() else {
            debug!("No stored access token, starting logged out");
            return;
        };
        api.set_token(token);

        match api.me().await {
            Ok(me) if me.success => match me.user {
                Some(user) => {
                    let user = AuthUser::from_me(user);
                    info!(user_id = %user.id, role = %user.role, "Session restored");
                    self.user = Some(user);
                }
                None => warn!("Restore response missing user, starting logged out"),
            },
            Ok(_) => {
                warn!("Restore response not successful, starting logged out");
            }
            Err(ApiError::NotAuthenticated) | Err(ApiError::Api(_)) => {
                // Token invalidated; drop it so the next boot skips the call
                debug!("Stored token rejected, clearing it");
                let _ = self.tokens.clear();
                api.clear_token();
            }
            Err(e) => {
                warn!(error = %e, "Restore failed, starting logged out");
                api.clear_token();
            }
        }
    }

    /// Authenticate with the backend and establish the session.
    ///
    /// Token persistence strictly precedes the profile fetch, and the
    /// session is queryable before a `Success` outcome is returned. If
    /// the follow-up profile fetch fails the session is still established
    /// from the login response's minimal identity with a null profile.
    pub async fn sign_in(
        &mut self,
        api: &mut ApiClient,
        identifier: &str,
        password: &str,
    ) -> SignInOutcome {
        let payload = login_payload(identifier, password);

        let response = match api.login(&payload).await {
            Ok(response) => response,
            Err(e) => {
                return SignInOutcome::Failure { message: e.to_string() };
            }
        };

        // An OK response without a token is still a failed login
        let Some(access_token) = response.access_token.filter(|t| !t.is_empty()) else {
            return SignInOutcome::Failure {
                message: "Server response missing authentication token".to_string(),
            };
        };
        let refresh_token = response.refresh_token.unwrap_or_default();

        if let Err(e) = self.tokens.save(&access_token, &refresh_token) {
            return SignInOutcome::Failure {
                message: format!("Failed to persist session tokens: {}", e),
            };
        }
        api.set_token(access_token);

        // Role from the login response, used if the profile fetch fails
        let login_user = response.user;
        let login_role = Role::parse(login_user.as_ref().and_then(|u| u.role.as_deref()));

        match api.me().await {
            Ok(me) if me.success => {
                if let Some(user) = me.user {
                    let user = AuthUser::from_me(user);
                    let role = user.role;
                    info!(user_id = %user.id, role = %role, "Signed in");
                    self.user = Some(user);
                    return SignInOutcome::Success { role };
                }
            }
            Ok(_) => warn!("Profile fetch after login not successful, using login identity"),
            Err(e) => warn!(error = %e, "Profile fetch after login failed, using login identity"),
        }

        // Minimal identity fallback - sign-in does not fail just because
        // the follow-up profile fetch did
        let user = AuthUser {
            id: login_user.as_ref().and_then(|u| u.id.clone()).unwrap_or_default(),
            email: login_user.and_then(|u| u.email).unwrap_or_default(),
            role: login_role,
            profile: None,
        };
        info!(user_id = %user.id, role = %login_role, "Signed in with minimal identity");
        self.user = Some(user);
        SignInOutcome::Success { role: login_role }
    }

    /// Remove both tokens and clear the session. Never contacts the
    /// network, always succeeds.
    pub fn sign_out(&mut self, api: &mut ApiClient) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to remove token file on sign-out");
        }
        api.clear_token();
        self.user = None;
        info!("Signed out");
    }

    /// Re-run the `me` fetch and replace the session on success; used
    /// after profile-mutating operations to resynchronize. Errors
    /// propagate so the caller can special-case `NotAuthenticated`.
    pub async fn refresh_profile(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let me = api.me().await?;
        if me.success {
            if let Some(user) = me.user {
                self.user = Some(AuthUser::from_me(user));
            }
        }
        Ok(())
    }

    /// Register a new account. Does not authenticate - first login only
    /// becomes possible after admin approval.
    pub async fn sign_up(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
        metadata: &serde_json::Map<String, Value>,
    ) -> OpOutcome {
        let mut payload = serde_json::Map::new();
        payload.insert("email".to_string(), json!(email));
        payload.insert("password".to_string(), json!(password));
        for (key, value) in metadata {
            payload.insert(key.clone(), value.clone());
        }

        match api.signup(&Value::Object(payload)).await {
            Ok(ack) => OpOutcome {
                success: ack.success,
                message: ack.message_or(if ack.success { "Signup successful" } else { "Signup failed" }),
            },
            Err(e) => OpOutcome {
                success: false,
                message: e.to_string(),
            },
        }
    }

    /// Bearer-authenticated password change. Errors propagate so the
    /// caller can force logout on `NotAuthenticated`.
    pub async fn change_password(
        &self,
        api: &ApiClient,
        new_password: &str,
    ) -> Result<ServerAck, ApiError> {
        api.change_password(new_password).await
    }

    // ===== Public recovery flows - server messages pass through verbatim =====

    pub async fn forgot_username(&self, api: &ApiClient, email: &str) -> OpOutcome {
        ack_to_outcome(api.forgot_username(email).await)
    }

    pub async fn forgot_password(&self, api: &ApiClient, email: &str) -> OpOutcome {
        ack_to_outcome(api.forgot_password(email).await)
    }

    pub async fn reset_password(
        &self,
        api: &ApiClient,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> OpOutcome {
        ack_to_outcome(api.reset_password(email, otp, new_password).await)
    }
}

fn ack_to_outcome(result: Result<ServerAck, ApiError>) -> OpOutcome {
    match result {
        Ok(ack) => OpOutcome {
            success: ack.success,
            message: ack.message_or("Request completed"),
        },
        Err(e) => OpOutcome {
            success: false,
            message: e.to_string(),
        },
    }
}

/// Route the identifier as `email` when it contains `@`, else as
/// `username`. This is the sole username/email disambiguation rule.
fn login_payload(identifier: &str, password: &str) -> Value {
    if identifier.contains('@') {
        json!({ "email": identifier, "password": password })
    } else {
        json!({ "username": identifier, "password": password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use tempfile::TempDir;

    #[test]
    fn test_role_parse_defaults_to_student() {
        assert_eq!(Role::parse(Some("admin")), Role::Admin);
        assert_eq!(Role::parse(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::parse(Some("Admin")), Role::Admin);
        assert_eq!(Role::parse(Some("student")), Role::Student);
        assert_eq!(Role::parse(Some("superuser")), Role::Student);
        assert_eq!(Role::parse(None), Role::Student);
    }

    #[test]
    fn test_login_payload_routes_email_by_at_sign() {
        let payload = login_payload("jane@x.com", "pw");
        assert_eq!(payload["email"], "jane@x.com");
        assert!(payload.get("username").is_none());

        let payload = login_payload("jane", "pw");
        assert_eq!(payload["username"], "jane");
        assert!(payload.get("email").is_none());
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_network() {
        let dir = TempDir::new().expect("tempdir");
        let mut session = Session::new(TokenStore::new(dir.path().to_path_buf()));
        // The base URL is unroutable; restore must return before any request
        let mut api = ApiClient::new("http://127.0.0.1:9").expect("client");

        session.restore(&mut api).await;

        assert!(!session.is_authenticated());
        // No token was found, so none was installed on the client
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_sign_out_clears_tokens_and_session() {
        let dir = TempDir::new().expect("tempdir");
        let tokens = TokenStore::new(dir.path().to_path_buf());
        tokens.save("t1", "t2").expect("save");

        let mut session = Session::new(tokens);
        session.user = Some(AuthUser {
            id: "1".to_string(),
            email: "jane@x.com".to_string(),
            role: Role::Student,
            profile: None,
        });
        let mut api = ApiClient::new("http://127.0.0.1:9").expect("client");
        api.set_token("t1".to_string());

        session.sign_out(&mut api);

        assert!(!session.is_authenticated());
        assert!(!api.has_token());
        assert!(session.tokens.access_token().is_none());
        assert!(session.tokens.refresh_token().is_none());
    }
}
