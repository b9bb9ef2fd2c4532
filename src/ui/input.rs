//! Keyboard input handling for the TUI.
//!
//! This module translates key events into application state changes.
//! Every branch runs on the event loop; network calls await inline and
//! report failures through the status notice, never by panicking.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, LoginFocus, LoginNotice, Screen};
use crate::models::{FeedbackStatus, UploadStatus};

/// Number of rows to jump on page up/down.
const PAGE_SCROLL_SIZE: usize = 10;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // A modal form swallows everything until submitted or cancelled
    if app.overlay.is_some() {
        handle_overlay_input(app, key).await;
        return Ok(false);
    }

    match app.screen {
        Screen::Login => handle_login_input(app, key).await,
        Screen::Signup => handle_signup_input(app, key).await,
        Screen::Recovery => handle_recovery_input(app, key).await,
        _ => return handle_session_input(app, key).await,
    }
    Ok(false)
}

async fn handle_overlay_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_overlay(),
        KeyCode::Enter => app.submit_overlay().await,
        code => {
            let Some(overlay) = app.overlay.as_mut() else {
                return;
            };
            match code {
                KeyCode::Tab | KeyCode::Down => overlay.form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => overlay.form.focus_prev(),
                KeyCode::Backspace => overlay.form.backspace(),
                KeyCode::Char(c) => overlay.form.insert_char(c),
                _ => {}
            }
        }
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_focus = match app.login_focus {
                LoginFocus::Identifier => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Identifier,
            };
        }
        KeyCode::Enter => app.attempt_login().await,
        KeyCode::Backspace => {
            match app.login_focus {
                LoginFocus::Identifier => app.login_identifier.pop(),
                LoginFocus::Password => app.login_password.pop(),
            };
        }
        KeyCode::F(2) => app.navigate(Screen::Signup),
        KeyCode::F(3) => app.navigate(Screen::Recovery),
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Identifier => app.login_identifier.push(c),
            LoginFocus::Password => app.login_password.push(c),
        },
        _ => {}
    }
}

async fn handle_signup_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Login),
        KeyCode::Enter => app.submit_signup().await,
        KeyCode::Tab | KeyCode::Down => app.signup_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.signup_form.focus_prev(),
        KeyCode::Backspace => app.signup_form.backspace(),
        KeyCode::Char(c) => app.signup_form.insert_char(c),
        _ => {}
    }
}

async fn handle_recovery_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Login),
        KeyCode::F(2) => app.send_username_reminder().await,
        KeyCode::F(3) => app.send_password_reset().await,
        KeyCode::Enter => app.submit_password_reset().await,
        KeyCode::Tab | KeyCode::Down => app.recovery_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.recovery_form.focus_prev(),
        KeyCode::Backspace => app.recovery_form.backspace(),
        KeyCode::Char(c) => app.recovery_form.insert_char(c),
        _ => {}
    }
}

/// Input on the signed-in screens: shared navigation first, then
/// per-screen actions.
async fn handle_session_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('o') => {
            app.force_logout(LoginNotice::SignedOut);
            return Ok(false);
        }
        KeyCode::Tab => app.cycle_screen(true),
        KeyCode::BackTab => app.cycle_screen(false),
        KeyCode::Char('r') => {
            app.reload_current_data().await;
        }
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::PageUp => {
            app.selection = app.selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageDown => {
            let len = app.current_list_len();
            if len > 0 {
                app.selection = (app.selection + PAGE_SCROLL_SIZE).min(len - 1);
            }
        }
        _ => handle_screen_action(app, key).await,
    }
    Ok(false)
}

async fn handle_screen_action(app: &mut App, key: KeyEvent) {
    match (app.screen, key.code) {
        (Screen::StudentUploads, KeyCode::Char('n')) => app.open_upload_form(),
        (Screen::StudentFeedback, KeyCode::Char('n')) => app.open_feedback_form(),

        (Screen::StudentProfile, KeyCode::Char('e')) => app.open_profile_form(),
        (Screen::StudentProfile, KeyCode::Char('p')) => app.open_change_password_form(),

        (Screen::AdminStudents, KeyCode::Char('a')) => app.open_approve_form(),
        (Screen::AdminStudents, KeyCode::Char('s')) => app.suspend_selected_student().await,
        (Screen::AdminStudents, KeyCode::Char('v')) => app.activate_selected_student().await,

        (Screen::AdminUploads, KeyCode::Char('v')) => app.open_review_form(UploadStatus::Reviewed),
        (Screen::AdminUploads, KeyCode::Char('a')) => app.open_review_form(UploadStatus::Approved),
        (Screen::AdminUploads, KeyCode::Char('x')) => app.open_review_form(UploadStatus::Rejected),

        (Screen::AdminFeedback, KeyCode::Char('p')) => app.open_respond_form(),
        (Screen::AdminFeedback, KeyCode::Char('1')) => {
            app.set_selected_feedback_status(FeedbackStatus::InReview).await
        }
        (Screen::AdminFeedback, KeyCode::Char('2')) => {
            app.set_selected_feedback_status(FeedbackStatus::Resolved).await
        }
        (Screen::AdminFeedback, KeyCode::Char('3')) => {
            app.set_selected_feedback_status(FeedbackStatus::Rejected).await
        }
        (Screen::AdminFeedback, KeyCode::Char('x')) => app.delete_selected_feedback().await,

        _ => {}
    }
}
