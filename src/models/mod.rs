//! Data models for StudentHub entities.
//!
//! This module contains the data structures used to represent portal
//! data including:
//!
//! - `Profile`, `StudentRecord`: student identity and admin roster rows
//! - `DailyUpload`: daily-work submissions and their review state
//! - `Feedback`: feedback entries with ratings and attachments
//!
//! All wire structs tolerate missing fields; the backend trims payloads
//! per endpoint.

pub mod feedback;
pub mod profile;
pub mod upload;

pub use feedback::{
    Feedback, FeedbackDraft, FeedbackStatus, ALLOWED_ATTACHMENT_EXTENSIONS,
    MAX_FEEDBACK_ATTACHMENTS,
};
pub use profile::{AccountStatus, Profile, ProfileUpdate, StudentRecord};
pub use upload::{
    has_allowed_extension, DailyUpload, UploadReceipt, UploadStatus, ALLOWED_UPLOAD_EXTENSIONS,
};
