//! Student self-service resource wrappers.
//!
//! Everything here requires bearer auth; the token precondition is
//! checked before any network traffic so an unauthenticated caller gets
//! the distinguished `NotAuthenticated` error immediately.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::models::{DailyUpload, Feedback, FeedbackDraft, Profile, ProfileUpdate, UploadReceipt};

use super::client::ServerAck;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /student/profile` - the full profile record.
    pub async fn student_profile(&self) -> Result<Profile, ApiError> {
        self.require_token()?;
        self.get_json("/student/profile").await
    }

    /// `PUT /student/profile` - partial update with camelCase keys.
    pub async fn update_student_profile(&self, update: &ProfileUpdate) -> Result<ServerAck, ApiError> {
        self.require_token()?;
        self.put_json("/student/profile", update).await
    }

    /// `GET /student/uploads` - the student's own submissions, newest first.
    pub async fn student_uploads(&self) -> Result<Vec<DailyUpload>, ApiError> {
        self.require_token()?;
        self.get_list("/student/uploads").await
    }

    /// `POST /student/uploads` - multipart submission of one work file.
    pub async fn submit_upload(
        &self,
        file_path: &Path,
        description: Option<&str>,
    ) -> Result<UploadReceipt, ApiError> {
        self.require_token()?;

        let mut form = Form::new().part("file", file_part(file_path).await?);
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            form = form.text("description", description.to_string());
        }

        debug!(file = %file_path.display(), "Submitting daily upload");
        self.post_multipart("/student/uploads", form).await
    }

    /// `GET /student/feedback` - the student's own feedback entries.
    pub async fn student_feedbacks(&self) -> Result<Vec<Feedback>, ApiError> {
        self.require_token()?;
        self.get_list("/student/feedback").await
    }

    /// `POST /student/feedback` - multipart when attachments are present,
    /// plain form fields otherwise. Attachment count and extensions are
    /// validated by the caller before this point.
    pub async fn submit_feedback(&self, draft: &FeedbackDraft) -> Result<ServerAck, ApiError> {
        self.require_token()?;

        let mut form = Form::new()
            .text("category", draft.category.clone())
            .text("subject", draft.subject.clone())
            .text("message", draft.message.clone())
            .text("rating", format!("{}", draft.rating));

        for path in &draft.attachments {
            form = form.part("files", file_part(path).await?);
        }

        debug!(attachments = draft.attachments.len(), "Submitting feedback");
        self.post_multipart("/student/feedback", form).await
    }
}

/// Build a multipart file part from a path, reading the file into memory.
/// Daily-work files are small documents; streaming is not worth the setup.
async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ApiError::Api(format!("Not a file: {}", path.display())))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Api(format!("Failed to read {}: {}", path.display(), e)))?;

    let part = Part::bytes(bytes)
        .file_name(file_name.clone())
        .mime_str(content_type_for(&file_name))
        .map_err(|e| ApiError::InvalidResponse(format!("Invalid content type: {}", e)))?;

    Ok(part)
}

/// Content type by extension for the handful of formats the portal accepts.
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("day3.pdf"), "application/pdf");
        assert_eq!(content_type_for("PHOTO.JPG"), "image/jpeg");
        assert_eq!(content_type_for("notes.docx"), "application/vnd.openxmlformats-officedocument.wordprocessingml.document");
    }

    #[test]
    fn test_content_type_falls_back_to_octet_stream() {
        assert_eq!(content_type_for("archive.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
