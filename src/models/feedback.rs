// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Triage state of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Submitted,
    InReview,
    Resolved,
    Rejected,
}

impl FeedbackStatus {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(v) if v.eq_ignore_ascii_case("in_review") => FeedbackStatus::InReview,
            Some(v) if v.eq_ignore_ascii_case("resolved") => FeedbackStatus::Resolved,
            Some(v) if v.eq_ignore_ascii_case("rejected") => FeedbackStatus::Rejected,
            _ => FeedbackStatus::Submitted,
        }
    }

    /// The wire value for `POST /admin/feedback/{id}/status`.
    pub fn as_wire(&self) -> &'static str {
        match self {
            FeedbackStatus::Submitted => "submitted",
            FeedbackStatus::InReview => "in_review",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackStatus::Submitted => write!(f, "Submitted"),
            FeedbackStatus::InReview => write!(f, "In Review"),
            FeedbackStatus::Resolved => write!(f, "Resolved"),
            FeedbackStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One feedback entry. The admin listing adds the student columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_email: Option<String>,
}

impl Feedback {
    pub fn triage_status(&self) -> FeedbackStatus {
        FeedbackStatus::parse(self.status.as_deref())
    }
}

/// Form data for a new feedback entry. Ratings run 1.0–5.0 in half steps;
/// at most [`MAX_FEEDBACK_ATTACHMENTS`] files may be attached.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDraft {
    pub category: String,
    pub subject: String,
    pub message: String,
    pub rating: f32,
    pub attachments: Vec<std::path::PathBuf>,
}

/// Attachment limit enforced client-side before submission.
pub const MAX_FEEDBACK_ATTACHMENTS: usize = 3;

/// File types accepted as feedback attachments.
pub const ALLOWED_ATTACHMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "png", "jpg", "jpeg"];

impl FeedbackDraft {
    /// Client-side validation; nothing here should reach the network.
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("Category is required".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("Subject is required".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Message is required".to_string());
        }
        if !(1.0..=5.0).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".to_string());
        }
        if self.attachments.len() > MAX_FEEDBACK_ATTACHMENTS {
            return Err(format!(
                "At most {} attachments are allowed",
                MAX_FEEDBACK_ATTACHMENTS
            ));
        }
        for path in &self.attachments {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !crate::models::upload::has_allowed_extension(&name, ALLOWED_ATTACHMENT_EXTENSIONS) {
                return Err(format!("File type not allowed: {}", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_status_parse() {
        assert_eq!(FeedbackStatus::parse(Some("in_review")), FeedbackStatus::InReview);
        assert_eq!(FeedbackStatus::parse(Some("resolved")), FeedbackStatus::Resolved);
        assert_eq!(FeedbackStatus::parse(Some("rejected")), FeedbackStatus::Rejected);
        assert_eq!(FeedbackStatus::parse(Some("submitted")), FeedbackStatus::Submitted);
        assert_eq!(FeedbackStatus::parse(None), FeedbackStatus::Submitted);
    }

    #[test]
    fn test_parse_admin_feedback_row() {
        let json = r#"{
            "id": "f-1",
            "user_id": "usr-9",
            "category": "mentors",
            "subject": "Great session",
            "message": "The Tuesday session was helpful.",
            "rating": 4.5,
            "attachments": ["/uploads/usr-9/fb/photo.jpg"],
            "status": "submitted",
            "admin_response": null,
            "created_at": "2025-03-11T08:00:00",
            "student_name": "Jane Doe",
            "student_email": "jane@x.com"
        }"#;
        let feedback: Feedback = serde_json::from_str(json).expect("Failed to parse feedback row");
        assert_eq!(feedback.rating, Some(4.5));
        assert_eq!(feedback.attachments.len(), 1);
        assert_eq!(feedback.triage_status(), FeedbackStatus::Submitted);
    }

    #[test]
    fn test_feedback_draft_validation() {
        let mut draft = FeedbackDraft {
            category: "training".to_string(),
            subject: "Pace".to_string(),
            message: "Could we slow down the DB module?".to_string(),
            rating: 3.5,
            attachments: vec![],
        };
        assert!(draft.validate().is_ok());

        draft.rating = 0.0;
        assert!(draft.validate().is_err());
        draft.rating = 4.0;

        draft.attachments = (0..4).map(|i| format!("notes{}.pdf", i).into()).collect();
        let err = draft.validate().unwrap_err();
        assert!(err.contains("3"));

        draft.attachments = vec!["malware.exe".into()];
        let err = draft.validate().unwrap_err();
        assert!(err.contains("malware.exe"));
    }

    #[test]
    fn test_parse_feedback_without_attachments() {
        let json = r#"{"id": "f-2", "subject": "Wifi", "message": "Flaky in lab 2", "status": "in_review"}"#;
        let feedback: Feedback = serde_json::from_str(json).expect("Failed to parse feedback row");
        assert!(feedback.attachments.is_empty());
        assert_eq!(feedback.triage_status(), FeedbackStatus::InReview);
    }
}
