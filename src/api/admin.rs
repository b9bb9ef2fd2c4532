//! Admin management resource wrappers.
//!
//! The backend enforces the admin role server-side; these wrappers only
//! guarantee the token precondition and uniform error surfacing.

use tracing::debug;

use crate::models::{DailyUpload, Feedback, FeedbackStatus, StudentRecord, UploadStatus};

use super::client::ServerAck;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /admin/students` - every profile, newest first.
    pub async fn admin_students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        self.require_token()?;
        self.get_list("/admin/students").await
    }

    /// `POST /admin/students/{id}/approve` - assign a username and
    /// activate a pending account.
    pub async fn approve_student(
        &self,
        profile_id: &str,
        username: &str,
    ) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        debug!(profile_id, username, "Approving student");
        self.post_json(
            &format!("/admin/students/{}/approve", profile_id),
            &serde_json::json!({ "username": username }),
        )
        .await
    }

    /// `POST /admin/students/{id}/suspend`.
    pub async fn suspend_student(&self, profile_id: &str) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.post_json(
            &format!("/admin/students/{}/suspend", profile_id),
            &serde_json::json!({}),
        )
        .await
    }

    /// `POST /admin/students/{id}/activate`.
    pub async fn activate_student(&self, profile_id: &str) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.post_json(
            &format!("/admin/students/{}/activate", profile_id),
            &serde_json::json!({}),
        )
        .await
    }

    /// `GET /admin/uploads` - all submissions with `student_name` joined in.
    pub async fn admin_uploads(&self) -> Result<Vec<DailyUpload>, ApiError> {
        self.require_token()?;
        self.get_list("/admin/uploads").await
    }

    /// `POST /admin/uploads/{id}/status` - set review status with optional
    /// feedback text.
    pub async fn update_upload_status(
        &self,
        upload_id: &str,
        status: UploadStatus,
        feedback: Option<&str>,
    ) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        debug!(upload_id, status = %status, "Updating upload status");
        self.post_json(
            &format!("/admin/uploads/{}/status", upload_id),
            &serde_json::json!({ "status": status.as_wire(), "feedback": feedback }),
        )
        .await
    }

    /// `GET /admin/feedback` - all feedback entries with student columns.
    pub async fn admin_feedbacks(&self) -> Result<Vec<Feedback>, ApiError> {
        self.require_token()?;
        self.get_list("/admin/feedback").await
    }

    /// `POST /admin/feedback/{id}/response` - attach an admin response.
    pub async fn respond_feedback(
        &self,
        feedback_id: &str,
        response: &str,
    ) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.post_json(
            &format!("/admin/feedback/{}/response", feedback_id),
            &serde_json::json!({ "response": response }),
        )
        .await
    }

    /// `POST /admin/feedback/{id}/status` - set triage status.
    pub async fn update_feedback_status(
        &self,
        feedback_id: &str,
        status: FeedbackStatus,
    ) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.post_json(
            &format!("/admin/feedback/{}/status", feedback_id),
            &serde_json::json!({ "status": status.as_wire() }),
        )
        .await
    }

    /// `DELETE /admin/feedback/{id}`.
    pub async fn delete_feedback(&self, feedback_id: &str) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.delete_json(&format!("/admin/feedback/{}", feedback_id))
            .await
    }
}
