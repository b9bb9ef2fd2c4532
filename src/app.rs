//! Application state management for the StudentHub client.
//!
//! This module contains the core `App` struct that owns the session
//! store, the API client, the inactivity monitor, and all screen state.
//! Screen changes go through [`App::navigate`], which applies the
//! role/session guards so no guarded screen can render for the wrong
//! audience.

use std::time::Instant;

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{InactivityMonitor, Role, Session, SignInOutcome, TokenStore};
use crate::config::Config;
use crate::models::{
    has_allowed_extension, DailyUpload, Feedback, FeedbackDraft, FeedbackStatus, ProfileUpdate,
    StudentRecord, UploadStatus, ALLOWED_UPLOAD_EXTENSIONS,
};

// ============================================================================
// Screens and guards
// ============================================================================

/// Every screen the client can show. The student and admin subtrees are
/// guarded; the auth screens are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Recovery,
    StudentUploads,
    StudentFeedback,
    StudentProfile,
    AdminStudents,
    AdminUploads,
    AdminFeedback,
}

impl Screen {
    /// The role a screen requires, if any.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Screen::Login | Screen::Signup | Screen::Recovery => None,
            Screen::StudentUploads | Screen::StudentFeedback | Screen::StudentProfile => {
                Some(Role::Student)
            }
            Screen::AdminStudents | Screen::AdminUploads | Screen::AdminFeedback => {
                Some(Role::Admin)
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign In",
            Screen::Signup => "Create Account",
            Screen::Recovery => "Account Recovery",
            Screen::StudentUploads => "My Uploads",
            Screen::StudentFeedback => "My Feedback",
            Screen::StudentProfile => "My Profile",
            Screen::AdminStudents => "Students",
            Screen::AdminUploads => "Uploads",
            Screen::AdminFeedback => "Feedback",
        }
    }
}

/// Home screen for a role.
pub fn home_screen(role: Role) -> Screen {
    match role {
        Role::Student => Screen::StudentUploads,
        Role::Admin => Screen::AdminStudents,
    }
}

/// Apply the access rules to a navigation request. Unauthenticated users
/// land on the login screen (the requested destination is discarded);
/// a role mismatch lands on the home screen of the role actually held.
pub fn resolve_screen(requested: Screen, role: Option<Role>) -> Screen {
    match requested.required_role() {
        None => requested,
        Some(required) => match role {
            None => Screen::Login,
            Some(actual) if actual == required => requested,
            Some(actual) => home_screen(actual),
        },
    }
}

// ============================================================================
// Login screen state
// ============================================================================

/// Which login field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Identifier,
    Password,
}

/// Why the user is looking at the login screen again. Inactivity gets
/// its own notice so it is distinguishable from a manual sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginNotice {
    Inactivity,
    SessionExpired,
    SignedOut,
}

impl LoginNotice {
    pub fn text(&self) -> &'static str {
        match self {
            LoginNotice::Inactivity => {
                "You were signed out after 15 minutes of inactivity. Please sign in again."
            }
            LoginNotice::SessionExpired => "Your session has expired. Please sign in again.",
            LoginNotice::SignedOut => "Signed out.",
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

pub fn field(label: &'static str) -> FormField {
    FormField {
        label,
        value: String::new(),
        masked: false,
    }
}

pub fn masked_field(label: &'static str) -> FormField {
    FormField {
        label,
        value: String::new(),
        masked: true,
    }
}

/// A vertical list of labeled text inputs with one focused field.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Value of a field by its label. Labels are fixed per form, so a
    /// miss is a programming error; return empty rather than panic.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    fn trimmed(&self, label: &str) -> String {
        self.value(label).trim().to_string()
    }

    fn optional(&self, label: &str) -> Option<String> {
        let v = self.trimmed(label);
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    }
}

/// A modal form overlay plus the action its submission performs.
#[derive(Debug, Clone)]
pub struct FormOverlay {
    pub title: &'static str,
    pub form: Form,
    pub action: FormAction,
}

#[derive(Debug, Clone)]
pub enum FormAction {
    SubmitUpload,
    SubmitFeedback,
    UpdateProfile,
    ChangePassword,
    ApproveStudent { profile_id: String },
    ReviewUpload { upload_id: String, status: UploadStatus },
    RespondFeedback { feedback_id: String },
}

// ============================================================================
// Status notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub session: Session,
    pub monitor: InactivityMonitor,

    /// True until the boot-time session restore has completed; the UI
    /// renders only the restoring indicator while set.
    pub restoring: bool,
    pub screen: Screen,

    // Login form state
    pub login_identifier: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub login_notice: Option<LoginNotice>,

    pub signup_form: Form,
    pub recovery_form: Form,
    pub overlay: Option<FormOverlay>,

    // Fetched data, held in memory only
    pub my_uploads: Vec<DailyUpload>,
    pub my_feedbacks: Vec<Feedback>,
    pub students: Vec<StudentRecord>,
    pub admin_uploads: Vec<DailyUpload>,
    pub admin_feedbacks: Vec<Feedback>,

    /// Selection into the list shown by the current screen.
    pub selection: usize,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        });

        let api = ApiClient::new(&config.api_base_url())?;
        let tokens = TokenStore::new(Config::data_dir()?);
        let session = Session::new(tokens);

        let login_identifier = config.last_identifier.clone().unwrap_or_default();

        Ok(Self {
            config,
            api,
            session,
            monitor: InactivityMonitor::new(),
            restoring: true,
            screen: Screen::Login,
            login_identifier,
            login_password: String::new(),
            login_focus: LoginFocus::Identifier,
            login_error: None,
            login_notice: None,
            signup_form: signup_form(),
            recovery_form: recovery_form(),
            overlay: None,
            my_uploads: Vec::new(),
            my_feedbacks: Vec::new(),
            students: Vec::new(),
            admin_uploads: Vec::new(),
            admin_feedbacks: Vec::new(),
            selection: 0,
            notice: None,
        })
    }

    // ===== Session lifecycle =====

    /// Run the boot-time restore, then land on the right screen.
    pub async fn complete_restore(&mut self) {
        self.session.restore(&mut self.api).await;
        self.restoring = false;

        if let Some(role) = self.session.role() {
            self.monitor.arm(Instant::now());
            self.navigate(home_screen(role));
            self.reload_current_data().await;
        } else {
            self.navigate(Screen::Login);
        }
    }

    /// Navigate, applying the guards. Selections reset so a stale index
    /// can never outlive the list it pointed into.
    pub fn navigate(&mut self, requested: Screen) {
        self.screen = resolve_screen(requested, self.session.role());
        self.selection = 0;
    }

    /// Qualifying user interaction; feeds the inactivity deadline.
    pub fn record_activity(&mut self, now: Instant) {
        self.monitor.record_activity(now);
    }

    /// Per-tick housekeeping: enforce the inactivity deadline.
    pub fn tick(&mut self, now: Instant) {
        if self.monitor.expired(now) {
            info!("Inactivity timeout reached, forcing logout");
            self.force_logout(LoginNotice::Inactivity);
        }
    }

    /// Clear the session and return to the login screen with a notice
    /// explaining why.
    pub fn force_logout(&mut self, reason: LoginNotice) {
        self.session.sign_out(&mut self.api);
        self.monitor.disarm();
        self.login_password.clear();
        self.login_focus = LoginFocus::Identifier;
        self.login_notice = Some(reason);
        self.overlay = None;
        self.clear_data();
        self.navigate(Screen::Login);
    }

    fn clear_data(&mut self) {
        self.my_uploads.clear();
        self.my_feedbacks.clear();
        self.students.clear();
        self.admin_uploads.clear();
        self.admin_feedbacks.clear();
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) {
        let identifier = self.login_identifier.trim().to_string();
        let password = self.login_password.clone();

        if identifier.is_empty() || password.is_empty() {
            self.login_error = Some("Identifier and password required".to_string());
            return;
        }
        self.login_error = None;
        self.login_notice = None;

        match self.session.sign_in(&mut self.api, &identifier, &password).await {
            SignInOutcome::Success { role } => {
                self.login_password.clear();
                self.config.last_identifier = Some(identifier);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.monitor.arm(Instant::now());
                self.navigate(home_screen(role));
                self.set_info("Login successful!");
                self.reload_current_data().await;
            }
            SignInOutcome::Failure { message } => {
                self.login_error = Some(message);
            }
        }
    }

    // ===== Notices and error routing =====

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        });
    }

    /// Route an API failure: a rejected token forces logout, anything
    /// else surfaces its message in the status line.
    fn handle_api_error(&mut self, e: ApiError) {
        if e.is_not_authenticated() {
            self.force_logout(LoginNotice::SessionExpired);
        } else {
            self.set_error(e.to_string());
        }
    }

    // ===== Data loading =====

    /// Reload whatever collections the current screen shows.
    pub async fn reload_current_data(&mut self) {
        match self.screen {
            Screen::StudentUploads => self.load_my_uploads().await,
            Screen::StudentFeedback => self.load_my_feedbacks().await,
            Screen::StudentProfile => self.refresh_profile().await,
            Screen::AdminStudents => self.load_students().await,
            Screen::AdminUploads => self.load_admin_uploads().await,
            Screen::AdminFeedback => self.load_admin_feedbacks().await,
            Screen::Login | Screen::Signup | Screen::Recovery => {}
        }
    }

    async fn load_my_uploads(&mut self) {
        match self.api.student_uploads().await {
            Ok(uploads) => {
                self.my_uploads = uploads;
                self.clamp_selection(self.my_uploads.len());
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    async fn load_my_feedbacks(&mut self) {
        match self.api.student_feedbacks().await {
            Ok(feedbacks) => {
                self.my_feedbacks = feedbacks;
                self.clamp_selection(self.my_feedbacks.len());
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    async fn load_students(&mut self) {
        match self.api.admin_students().await {
            Ok(students) => {
                self.students = students;
                self.clamp_selection(self.students.len());
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    async fn load_admin_uploads(&mut self) {
        match self.api.admin_uploads().await {
            Ok(uploads) => {
                self.admin_uploads = uploads;
                self.clamp_selection(self.admin_uploads.len());
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    async fn load_admin_feedbacks(&mut self) {
        match self.api.admin_feedbacks().await {
            Ok(feedbacks) => {
                self.admin_feedbacks = feedbacks;
                self.clamp_selection(self.admin_feedbacks.len());
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    /// Resynchronize the cached profile after a mutating operation.
    pub async fn refresh_profile(&mut self) {
        match self.session.refresh_profile(&self.api).await {
            Ok(()) => {}
            Err(e) => self.handle_api_error(e),
        }
    }

    // ===== List selection =====

    pub fn current_list_len(&self) -> usize {
        match self.screen {
            Screen::StudentUploads => self.my_uploads.len(),
            Screen::StudentFeedback => self.my_feedbacks.len(),
            Screen::AdminStudents => self.students.len(),
            Screen::AdminUploads => self.admin_uploads.len(),
            Screen::AdminFeedback => self.admin_feedbacks.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_list_len();
        if len > 0 && self.selection + 1 < len {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    fn clamp_selection(&mut self, len: usize) {
        if self.selection >= len {
            self.selection = len.saturating_sub(1);
        }
    }

    pub fn selected_student(&self) -> Option<&StudentRecord> {
        self.students.get(self.selection)
    }

    pub fn selected_admin_upload(&self) -> Option<&DailyUpload> {
        self.admin_uploads.get(self.selection)
    }

    pub fn selected_admin_feedback(&self) -> Option<&Feedback> {
        self.admin_feedbacks.get(self.selection)
    }

    // ===== Signup and recovery =====

    pub async fn submit_signup(&mut self) {
        let email = self.signup_form.trimmed("Email");
        let password = self.signup_form.value("Password").to_string();
        let full_name = self.signup_form.trimmed("Full name");

        if email.is_empty() || password.is_empty() || full_name.is_empty() {
            self.set_error("Email, password, and full name are required");
            return;
        }

        let mut metadata = serde_json::Map::new();
        metadata.insert("full_name".to_string(), json!(full_name));
        for (label, key) in [
            ("Contact number", "contact_number"),
            ("College name", "college_name"),
            ("College ID", "college_id"),
            ("City", "city"),
            ("Pincode", "pincode"),
            ("College email", "college_email"),
        ] {
            if let Some(value) = self.signup_form.optional(label) {
                metadata.insert(key.to_string(), json!(value));
            }
        }

        let outcome = self.session.sign_up(&self.api, &email, &password, &metadata).await;
        if outcome.success {
            self.login_identifier = email;
            self.login_password.clear();
            self.signup_form = signup_form();
            self.navigate(Screen::Login);
            self.set_info(format!(
                "{} Your account awaits admin approval before first login.",
                outcome.message
            ));
        } else {
            self.set_error(outcome.message);
        }
    }

    pub async fn send_username_reminder(&mut self) {
        let email = self.recovery_form.trimmed("Email");
        if email.is_empty() {
            self.set_error("Email is required");
            return;
        }
        let outcome = self.session.forgot_username(&self.api, &email).await;
        self.report_outcome(outcome.success, outcome.message);
    }

    pub async fn send_password_reset(&mut self) {
        let email = self.recovery_form.trimmed("Email");
        if email.is_empty() {
            self.set_error("Email is required");
            return;
        }
        let outcome = self.session.forgot_password(&self.api, &email).await;
        self.report_outcome(outcome.success, outcome.message);
    }

    pub async fn submit_password_reset(&mut self) {
        let email = self.recovery_form.trimmed("Email");
        let otp = self.recovery_form.trimmed("OTP");
        let new_password = self.recovery_form.value("New password").to_string();
        if email.is_empty() || new_password.is_empty() {
            self.set_error("Email and new password are required");
            return;
        }
        let outcome = self
            .session
            .reset_password(&self.api, &email, &otp, &new_password)
            .await;
        if outcome.success {
            self.recovery_form = recovery_form();
            self.login_identifier = email;
            self.navigate(Screen::Login);
        }
        self.report_outcome(outcome.success, outcome.message);
    }

    fn report_outcome(&mut self, success: bool, message: String) {
        if success {
            self.set_info(message);
        } else {
            self.set_error(message);
        }
    }

    // ===== Form overlays =====

    pub fn open_upload_form(&mut self) {
        self.overlay = Some(FormOverlay {
            title: "New Upload",
            form: Form::new(vec![field("File path"), field("Description")]),
            action: FormAction::SubmitUpload,
        });
    }

    pub fn open_feedback_form(&mut self) {
        self.overlay = Some(FormOverlay {
            title: "New Feedback",
            form: Form::new(vec![
                field("Category"),
                field("Subject"),
                field("Message"),
                field("Rating (1-5)"),
                field("Attachments (; separated)"),
            ]),
            action: FormAction::SubmitFeedback,
        });
    }

    pub fn open_profile_form(&mut self) {
        let profile = self.session.user().and_then(|u| u.profile.clone()).unwrap_or_default();
        let mut form = Form::new(vec![
            field("Full name"),
            field("Contact number"),
            field("College name"),
            field("College ID"),
            field("College email"),
        ]);
        form.fields[0].value = profile.full_name.unwrap_or_default();
        form.fields[1].value = profile.contact_number.unwrap_or_default();
        form.fields[2].value = profile.college_name.unwrap_or_default();
        form.fields[3].value = profile.college_id.unwrap_or_default();
        form.fields[4].value = profile.college_email.unwrap_or_default();
        self.overlay = Some(FormOverlay {
            title: "Edit Profile",
            form,
            action: FormAction::UpdateProfile,
        });
    }

    pub fn open_change_password_form(&mut self) {
        self.overlay = Some(FormOverlay {
            title: "Change Password",
            form: Form::new(vec![masked_field("New password")]),
            action: FormAction::ChangePassword,
        });
    }

    pub fn open_approve_form(&mut self) {
        let Some(student) = self.selected_student() else {
            return;
        };
        let profile_id = student.id.clone();
        self.overlay = Some(FormOverlay {
            title: "Approve Student",
            form: Form::new(vec![field("Username")]),
            action: FormAction::ApproveStudent { profile_id },
        });
    }

    pub fn open_review_form(&mut self, status: UploadStatus) {
        let Some(upload) = self.selected_admin_upload() else {
            return;
        };
        let upload_id = upload.id.clone();
        self.overlay = Some(FormOverlay {
            title: "Review Upload",
            form: Form::new(vec![field("Feedback")]),
            action: FormAction::ReviewUpload { upload_id, status },
        });
    }

    pub fn open_respond_form(&mut self) {
        let Some(feedback) = self.selected_admin_feedback() else {
            return;
        };
        let feedback_id = feedback.id.clone();
        self.overlay = Some(FormOverlay {
            title: "Respond to Feedback",
            form: Form::new(vec![field("Response")]),
            action: FormAction::RespondFeedback { feedback_id },
        });
    }

    pub fn cancel_overlay(&mut self) {
        self.overlay = None;
    }

    /// Submit the active overlay. Validation failures keep the overlay
    /// open so the input can be corrected.
    pub async fn submit_overlay(&mut self) {
        let Some(overlay) = self.overlay.clone() else {
            return;
        };

        match overlay.action {
            FormAction::SubmitUpload => {
                let path_text = overlay.form.trimmed("File path");
                if path_text.is_empty() {
                    self.set_error("File path is required");
                    return;
                }
                let file_name = std::path::Path::new(&path_text)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if !has_allowed_extension(&file_name, ALLOWED_UPLOAD_EXTENSIONS) {
                    self.set_error(format!(
                        "File type not allowed (expected one of: {})",
                        ALLOWED_UPLOAD_EXTENSIONS.join(", ")
                    ));
                    return;
                }
                let description = overlay.form.optional("Description");
                match self
                    .api
                    .submit_upload(std::path::Path::new(&path_text), description.as_deref())
                    .await
                {
                    Ok(receipt) => {
                        self.overlay = None;
                        let message = receipt
                            .message
                            .unwrap_or_else(|| "File uploaded successfully".to_string());
                        self.report_outcome(receipt.success, message);
                        self.load_my_uploads().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::SubmitFeedback => {
                let rating_text = overlay.form.trimmed("Rating (1-5)");
                let Ok(rating) = rating_text.parse::<f32>() else {
                    self.set_error("Rating must be a number between 1 and 5");
                    return;
                };
                let attachments = overlay
                    .form
                    .value("Attachments (; separated)")
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(std::path::PathBuf::from)
                    .collect();
                let draft = FeedbackDraft {
                    category: overlay.form.trimmed("Category"),
                    subject: overlay.form.trimmed("Subject"),
                    message: overlay.form.trimmed("Message"),
                    rating,
                    attachments,
                };
                if let Err(message) = draft.validate() {
                    self.set_error(message);
                    return;
                }
                match self.api.submit_feedback(&draft).await {
                    Ok(ack) => {
                        self.overlay = None;
                        self.set_info(ack.message_or("Feedback submitted"));
                        self.load_my_feedbacks().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::UpdateProfile => {
                let update = ProfileUpdate {
                    full_name: overlay.form.optional("Full name"),
                    contact_number: overlay.form.optional("Contact number"),
                    college_name: overlay.form.optional("College name"),
                    college_id: overlay.form.optional("College ID"),
                    college_email: overlay.form.optional("College email"),
                };
                match self.api.update_student_profile(&update).await {
                    Ok(ack) => {
                        self.overlay = None;
                        self.set_info(ack.message_or("Profile updated"));
                        self.refresh_profile().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::ChangePassword => {
                let new_password = overlay.form.value("New password").to_string();
                if new_password.is_empty() {
                    self.set_error("New password is required");
                    return;
                }
                match self.session.change_password(&self.api, &new_password).await {
                    Ok(ack) => {
                        self.overlay = None;
                        self.set_info(ack.message_or("Password changed"));
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::ApproveStudent { profile_id } => {
                let username = overlay.form.trimmed("Username");
                if username.is_empty() {
                    self.set_error("Username is required");
                    return;
                }
                match self.api.approve_student(&profile_id, &username).await {
                    Ok(ack) => {
                        self.overlay = None;
                        self.report_outcome(ack.success, ack.message_or("Student approved"));
                        self.load_students().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::ReviewUpload { upload_id, status } => {
                let feedback = overlay.form.optional("Feedback");
                match self
                    .api
                    .update_upload_status(&upload_id, status, feedback.as_deref())
                    .await
                {
                    Ok(ack) => {
                        self.overlay = None;
                        self.set_info(ack.message_or("Upload updated"));
                        self.load_admin_uploads().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
            FormAction::RespondFeedback { feedback_id } => {
                let response = overlay.form.trimmed("Response");
                if response.is_empty() {
                    self.set_error("Response is required");
                    return;
                }
                match self.api.respond_feedback(&feedback_id, &response).await {
                    Ok(ack) => {
                        self.overlay = None;
                        self.set_info(ack.message_or("Response saved"));
                        self.load_admin_feedbacks().await;
                    }
                    Err(e) => self.handle_api_error(e),
                }
            }
        }
    }

    // ===== One-key admin actions =====

    pub async fn suspend_selected_student(&mut self) {
        let Some(student) = self.selected_student() else {
            return;
        };
        let profile_id = student.id.clone();
        match self.api.suspend_student(&profile_id).await {
            Ok(ack) => {
                self.set_info(ack.message_or("Student suspended"));
                self.load_students().await;
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    pub async fn activate_selected_student(&mut self) {
        let Some(student) = self.selected_student() else {
            return;
        };
        let profile_id = student.id.clone();
        match self.api.activate_student(&profile_id).await {
            Ok(ack) => {
                self.set_info(ack.message_or("Student activated"));
                self.load_students().await;
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    pub async fn set_selected_feedback_status(&mut self, status: FeedbackStatus) {
        let Some(feedback) = self.selected_admin_feedback() else {
            return;
        };
        let feedback_id = feedback.id.clone();
        match self.api.update_feedback_status(&feedback_id, status).await {
            Ok(ack) => {
                self.set_info(ack.message_or("Feedback updated"));
                self.load_admin_feedbacks().await;
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    pub async fn delete_selected_feedback(&mut self) {
        let Some(feedback) = self.selected_admin_feedback() else {
            return;
        };
        let feedback_id = feedback.id.clone();
        match self.api.delete_feedback(&feedback_id).await {
            Ok(ack) => {
                self.set_info(ack.message_or("Feedback deleted"));
                self.load_admin_feedbacks().await;
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    // ===== Screen cycling within a role =====

    /// Tab order within the signed-in role's subtree.
    pub fn cycle_screen(&mut self, forward: bool) {
        let order: &[Screen] = match self.session.role() {
            Some(Role::Student) => &[
                Screen::StudentUploads,
                Screen::StudentFeedback,
                Screen::StudentProfile,
            ],
            Some(Role::Admin) => &[
                Screen::AdminStudents,
                Screen::AdminUploads,
                Screen::AdminFeedback,
            ],
            None => return,
        };
        let current = order.iter().position(|s| *s == self.screen).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.navigate(order[next]);
    }
}

/// Blank signup form.
fn signup_form() -> Form {
    Form::new(vec![
        field("Email"),
        masked_field("Password"),
        field("Full name"),
        field("Contact number"),
        field("College name"),
        field("College ID"),
        field("City"),
        field("Pincode"),
        field("College email"),
    ])
}

/// Blank recovery form.
fn recovery_form() -> Form {
    Form::new(vec![field("Email"), field("OTP"), masked_field("New password")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_per_screen() {
        assert_eq!(Screen::Login.required_role(), None);
        assert_eq!(Screen::Signup.required_role(), None);
        assert_eq!(Screen::StudentUploads.required_role(), Some(Role::Student));
        assert_eq!(Screen::AdminFeedback.required_role(), Some(Role::Admin));
    }

    #[test]
    fn test_guard_redirects_unauthenticated_to_login() {
        // The attempted destination is discarded
        assert_eq!(resolve_screen(Screen::AdminStudents, None), Screen::Login);
        assert_eq!(resolve_screen(Screen::StudentProfile, None), Screen::Login);
    }

    #[test]
    fn test_guard_redirects_role_mismatch_to_role_home() {
        // A student hitting the admin subtree lands on the student home
        assert_eq!(
            resolve_screen(Screen::AdminStudents, Some(Role::Student)),
            Screen::StudentUploads
        );
        // And vice versa
        assert_eq!(
            resolve_screen(Screen::StudentFeedback, Some(Role::Admin)),
            Screen::AdminStudents
        );
    }

    #[test]
    fn test_guard_passes_matching_role_and_public_screens() {
        assert_eq!(
            resolve_screen(Screen::AdminUploads, Some(Role::Admin)),
            Screen::AdminUploads
        );
        assert_eq!(
            resolve_screen(Screen::StudentProfile, Some(Role::Student)),
            Screen::StudentProfile
        );
        // Public screens pass regardless of session state
        assert_eq!(resolve_screen(Screen::Login, None), Screen::Login);
        assert_eq!(
            resolve_screen(Screen::Recovery, Some(Role::Admin)),
            Screen::Recovery
        );
    }

    #[test]
    fn test_form_focus_wraps_and_edits_focused_field() {
        let mut form = Form::new(vec![field("A"), field("B")]);
        form.insert_char('x');
        form.focus_next();
        form.insert_char('y');
        form.focus_next(); // wraps back to A
        form.insert_char('z');
        assert_eq!(form.value("A"), "xz");
        assert_eq!(form.value("B"), "y");

        form.backspace();
        assert_eq!(form.value("A"), "x");

        form.focus_prev();
        assert_eq!(form.focus, 1);
    }
}
