// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Review state of a daily upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Reviewed,
    Approved,
    Rejected,
}

impl UploadStatus {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(v) if v.eq_ignore_ascii_case("reviewed") => UploadStatus::Reviewed,
            Some(v) if v.eq_ignore_ascii_case("approved") => UploadStatus::Approved,
            Some(v) if v.eq_ignore_ascii_case("rejected") => UploadStatus::Rejected,
            _ => UploadStatus::Pending,
        }
    }

    /// The wire value for `POST /admin/uploads/{id}/status`.
    pub fn as_wire(&self) -> &'static str {
        match self {
            UploadStatus::Pending => "pending",
            UploadStatus::Reviewed => "reviewed",
            UploadStatus::Approved => "approved",
            UploadStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Pending => write!(f, "Pending"),
            UploadStatus::Reviewed => write!(f, "Reviewed"),
            UploadStatus::Approved => write!(f, "Approved"),
            UploadStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One daily-work submission.
///
/// `student_name` is populated only by the admin listing; the student's own
/// listing omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUpload {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub file_name: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub admin_feedback: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
}

impl DailyUpload {
    pub fn review_status(&self) -> UploadStatus {
        UploadStatus::parse(self.status.as_deref())
    }
}

/// Response body of `POST /student/uploads`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// File types the backend accepts for daily uploads.
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "zip"];

/// Check a file name against an allowed-extension list, matching the
/// backend's rule: there must be an extension and it must be listed.
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| *a == ext)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_status_parse() {
        assert_eq!(UploadStatus::parse(Some("approved")), UploadStatus::Approved);
        assert_eq!(UploadStatus::parse(Some("Rejected")), UploadStatus::Rejected);
        assert_eq!(UploadStatus::parse(Some("reviewed")), UploadStatus::Reviewed);
        assert_eq!(UploadStatus::parse(None), UploadStatus::Pending);
        assert_eq!(UploadStatus::parse(Some("???")), UploadStatus::Pending);
    }

    #[test]
    fn test_parse_student_upload_row() {
        let json = r#"{
            "id": "u-1",
            "user_id": "usr-9",
            "file_name": "day3.pdf",
            "file_url": "/uploads/usr-9/day3.pdf",
            "file_type": "application/pdf",
            "file_size": 52431,
            "upload_date": "2025-03-10T09:30:00",
            "description": "Day 3 worksheet",
            "status": "pending",
            "admin_feedback": null,
            "reviewed_by": null,
            "reviewed_at": null,
            "created_at": "2025-03-10T09:30:01"
        }"#;
        let upload: DailyUpload = serde_json::from_str(json).expect("Failed to parse upload row");
        assert_eq!(upload.file_name, "day3.pdf");
        assert_eq!(upload.review_status(), UploadStatus::Pending);
        assert!(upload.student_name.is_none());
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("day3.pdf", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(has_allowed_extension("day3.PDF", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(has_allowed_extension("work.zip", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension("photo.png", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension("noextension", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension(".pdf", ALLOWED_UPLOAD_EXTENSIONS));
    }

    #[test]
    fn test_parse_admin_upload_row_includes_student_name() {
        let json = r#"{"id": "u-2", "file_name": "notes.docx", "status": "approved", "student_name": "Jane Doe"}"#;
        let upload: DailyUpload = serde_json::from_str(json).expect("Failed to parse admin upload row");
        assert_eq!(upload.student_name.as_deref(), Some("Jane Doe"));
        assert_eq!(upload.review_status(), UploadStatus::Approved);
    }
}
