// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

use crate::models::{AccountStatus, FeedbackStatus, UploadStatus};

// Color palette
pub const PRIMARY: Color = Color::Rgb(88, 112, 200);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

// Status-specific colors for list rows
pub fn account_status_style(status: AccountStatus) -> Style {
    match status {
        AccountStatus::Active => success_style(),
        AccountStatus::Pending => highlight_style(),
        AccountStatus::Suspended => error_style(),
    }
}

pub fn upload_status_style(status: UploadStatus) -> Style {
    match status {
        UploadStatus::Approved => success_style(),
        UploadStatus::Reviewed => highlight_style(),
        UploadStatus::Rejected => error_style(),
        UploadStatus::Pending => muted_style(),
    }
}

pub fn feedback_status_style(status: FeedbackStatus) -> Style {
    match status {
        FeedbackStatus::Resolved => success_style(),
        FeedbackStatus::InReview => highlight_style(),
        FeedbackStatus::Rejected => error_style(),
        FeedbackStatus::Submitted => muted_style(),
    }
}
