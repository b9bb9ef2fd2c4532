// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Account lifecycle state as managed by the admin workflow.
/// Registration creates a pending account; approval activates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Pending,
    Active,
    Suspended,
}

impl AccountStatus {
    /// Parse the backend's status string. Unknown or missing input is
    /// treated as pending, the state every account starts in.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(v) if v.eq_ignore_ascii_case("active") => AccountStatus::Active,
            Some(v) if v.eq_ignore_ascii_case("suspended") => AccountStatus::Suspended,
            _ => AccountStatus::Pending,
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Pending => write!(f, "Pending"),
            AccountStatus::Active => write!(f, "Active"),
            AccountStatus::Suspended => write!(f, "Suspended"),
        }
    }
}

/// Denormalized student profile owned by the backend.
///
/// `/auth/me` returns a trimmed subset of these fields while
/// `/student/profile` returns the full record, so everything except the
/// status string is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub college_email: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub course_mode: Option<String>,
    #[serde(default)]
    pub course_duration: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Profile {
    pub fn account_status(&self) -> AccountStatus {
        AccountStatus::parse(self.status.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("(no name)")
    }
}

/// One row of the admin roster (`GET /admin/students`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub college_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl StudentRecord {
    pub fn account_status(&self) -> AccountStatus {
        AccountStatus::parse(self.status.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("(no name)")
    }
}

/// Fields a student may change on their own profile.
/// Serializes to the camelCase keys the backend reads.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProfileUpdate {
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "contactNumber", skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(rename = "collegeName", skip_serializing_if = "Option::is_none")]
    pub college_name: Option<String>,
    #[serde(rename = "collegeId", skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
    #[serde(rename = "collegeEmail", skip_serializing_if = "Option::is_none")]
    pub college_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_status_parse() {
        assert_eq!(AccountStatus::parse(Some("active")), AccountStatus::Active);
        assert_eq!(AccountStatus::parse(Some("ACTIVE")), AccountStatus::Active);
        assert_eq!(AccountStatus::parse(Some("suspended")), AccountStatus::Suspended);
        assert_eq!(AccountStatus::parse(Some("pending")), AccountStatus::Pending);
        assert_eq!(AccountStatus::parse(Some("garbage")), AccountStatus::Pending);
        assert_eq!(AccountStatus::parse(None), AccountStatus::Pending);
    }

    #[test]
    fn test_parse_trimmed_me_profile() {
        // /auth/me sends only a handful of profile fields
        let json = r#"{"id": "p-1", "username": "jane", "full_name": "Jane Doe", "status": "active"}"#;
        let profile: Profile = serde_json::from_str(json).expect("Failed to parse trimmed profile");
        assert_eq!(profile.username.as_deref(), Some("jane"));
        assert_eq!(profile.account_status(), AccountStatus::Active);
        assert!(profile.contact_number.is_none());
    }

    #[test]
    fn test_profile_update_serializes_camel_case() {
        let update = ProfileUpdate {
            full_name: Some("Jane Doe".to_string()),
            contact_number: Some("555-0100".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).expect("Failed to serialize update");
        assert_eq!(value["fullName"], "Jane Doe");
        assert_eq!(value["contactNumber"], "555-0100");
        // Unset fields must not appear at all
        assert!(value.get("collegeName").is_none());
    }
}
