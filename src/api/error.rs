use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid, or expired token. Callers special-case this
    /// variant to force logout and return to the login screen.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Server-reported business error; carries the response body's
    /// `message` verbatim.
    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length of a response body echoed into an error message.
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid dragging large payloads into
    /// error messages and logs.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Map a non-success HTTP response to an error. 401 is always
    /// `NotAuthenticated`; anything else tries the body's `message`
    /// field and falls back to a generic status line.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        if status.as_u16() == 401 {
            return ApiError::NotAuthenticated;
        }

        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
                return ApiError::Api(message);
            }
        }

        ApiError::Api(format!(
            "Request failed with status {}: {}",
            status,
            Self::truncate_body(body)
        ))
    }

    /// True when the error means the session's token was rejected.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_401_maps_to_not_authenticated() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"msg": "Token has expired"}"#);
        assert!(err.is_not_authenticated());
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_message_body_passed_through_verbatim() {
        let body = r#"{"success": false, "message": "Your account is pending approval. Please wait for admin verification."}"#;
        let err = ApiError::from_status(StatusCode::FORBIDDEN, body);
        assert_eq!(
            err.to_string(),
            "Your account is pending approval. Please wait for admin verification."
        );
    }

    #[test]
    fn test_unparsable_body_falls_back_to_generic_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2_000);
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, &body);
        assert!(err.to_string().contains("truncated"));
        assert!(err.to_string().len() < 700);
    }
}
