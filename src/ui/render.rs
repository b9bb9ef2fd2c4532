//! Screen rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LoginFocus, NoticeLevel, Screen};
use crate::auth::Role;
use crate::models::{DailyUpload, Feedback, StudentRecord};
use crate::utils::{format_date, format_file_size, format_optional, truncate_string};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    // Boot-time restore renders the indicator and nothing else
    if app.restoring {
        render_restoring(frame);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Screen tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Some(ref overlay) = app.overlay {
        render_form_overlay(frame, overlay);
    }
}

fn render_restoring(frame: &mut Frame) {
    let area = centered_rect(40, 3, frame.area());
    let text = Paragraph::new("Restoring session...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::border_style(true)));
    frame.render_widget(text, area);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  StudentHub";
    let who = match app.session.user() {
        Some(user) => format!("{} ({})  ", user.email, user.role),
        None => String::new(),
    };

    let pad = area
        .width
        .saturating_sub(title.len() as u16 + who.len() as u16) as usize;
    let line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(pad)),
        Span::styled(who, styles::muted_style()),
    ]);

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let screens: &[Screen] = match app.session.role() {
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
        None => &[Screen::Login, Screen::Signup, Screen::Recovery],
    };

    let mut spans = vec![Span::raw(" ")];
    for screen in screens {
        spans.push(Span::styled(
            format!(" {} ", screen.title()),
            styles::tab_style(*screen == app.screen),
        ));
        spans.push(Span::raw("  "));
    }

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::Login => render_login(frame, app, area),
        Screen::Signup => render_page_form(frame, &app.signup_form, "Create Account", area),
        Screen::Recovery => render_recovery(frame, app, area),
        Screen::StudentUploads => render_upload_list(frame, app, &app.my_uploads, false, area),
        Screen::StudentFeedback => render_feedback_list(frame, app, &app.my_feedbacks, false, area),
        Screen::StudentProfile => render_profile(frame, app, area),
        Screen::AdminStudents => render_students(frame, app, area),
        Screen::AdminUploads => render_upload_list(frame, app, &app.admin_uploads, true, area),
        Screen::AdminFeedback => render_feedback_list(frame, app, &app.admin_feedbacks, true, area),
    }
}

// ===== Auth screens =====

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let box_area = centered_rect(52, 12, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(notice) = app.login_notice {
        lines.push(Line::from(Span::styled(notice.text(), styles::highlight_style())));
        lines.push(Line::default());
    }

    let id_focused = app.login_focus == LoginFocus::Identifier;
    lines.push(field_line("Email or username", &app.login_identifier, false, id_focused));
    lines.push(field_line("Password", &app.login_password, true, !id_focused));
    lines.push(Line::default());

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(Span::styled(error.as_str(), styles::error_style())));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to sign in - F2 create account - F3 recovery",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), box_area);
}

fn render_page_form(frame: &mut Frame, form: &crate::app::Form, title: &str, area: Rect) {
    let height = (form.fields.len() + 4).min(area.height as usize) as u16;
    let box_area = centered_rect(56, height, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, f) in form.fields.iter().enumerate() {
        lines.push(field_line(f.label, &f.value, f.masked, i == form.focus));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter to submit - Esc back to sign in",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}

fn render_recovery(frame: &mut Frame, app: &App, area: Rect) {
    let box_area = centered_rect(60, 9, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, f) in app.recovery_form.fields.iter().enumerate() {
        lines.push(field_line(f.label, &f.value, f.masked, i == app.recovery_form.focus));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "F2 send username reminder - F3 send reset email",
        styles::muted_style(),
    )));
    lines.push(Line::from(Span::styled(
        "Enter reset password (email + OTP + new password) - Esc back",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Account Recovery ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}

fn field_line<'a>(label: &'a str, value: &'a str, masked: bool, focused: bool) -> Line<'a> {
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{:<28}", format!("{}:", label)),
            if focused { styles::highlight_style() } else { styles::muted_style() },
        ),
        Span::raw(format!("{}{}", shown, cursor)),
    ])
}

// ===== Lists =====

fn render_upload_list(frame: &mut Frame, app: &App, uploads: &[DailyUpload], admin: bool, area: Rect) {
    let items: Vec<ListItem> = uploads
        .iter()
        .map(|u| ListItem::new(upload_line(u, admin, area.width)))
        .collect();

    let hint = if admin {
        "v review / a approve / x reject - r refresh"
    } else {
        "n new upload - r refresh"
    };
    let title = format!(
        " {} ({}) - {} ",
        if admin { "All Uploads" } else { "My Uploads" },
        uploads.len(),
        hint
    );

    render_selectable_list(frame, app, items, title, uploads.is_empty(), area);
}

fn upload_line(u: &DailyUpload, admin: bool, width: u16) -> Line<'_> {
    let status = u.review_status();
    let mut spans = vec![
        Span::styled(format!("{:<10}", status.to_string()), styles::upload_status_style(status)),
        Span::raw(format!("{:<30}", truncate_string(&u.file_name, 28))),
        Span::styled(format!("{:<10}", format_file_size(u.file_size)), styles::muted_style()),
    ];
    if admin {
        spans.push(Span::raw(format!(
            "{:<22}",
            truncate_string(&format_optional(&u.student_name, "Unknown"), 20)
        )));
    }
    if width > 90 {
        if let Some(ref date) = u.created_at {
            spans.push(Span::styled(format_date(date), styles::muted_style()));
        }
    }
    Line::from(spans)
}

fn render_feedback_list(frame: &mut Frame, app: &App, feedbacks: &[Feedback], admin: bool, area: Rect) {
    let items: Vec<ListItem> = feedbacks
        .iter()
        .map(|f| {
            let status = f.triage_status();
            let mut spans = vec![
                Span::styled(format!("{:<11}", status.to_string()), styles::feedback_status_style(status)),
                Span::raw(format!(
                    "{:<14}",
                    truncate_string(&format_optional(&f.category, "-"), 12)
                )),
                Span::raw(format!(
                    "{:<32}",
                    truncate_string(&format_optional(&f.subject, "(no subject)"), 30)
                )),
                Span::styled(
                    format!("{:<6}", f.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".into())),
                    styles::highlight_style(),
                ),
            ];
            if admin {
                spans.push(Span::raw(format!(
                    "{:<22}",
                    truncate_string(&format_optional(&f.student_name, "Unknown"), 20)
                )));
            } else if f.admin_response.is_some() {
                spans.push(Span::styled("responded", styles::success_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let hint = if admin {
        "p respond / 1 in review / 2 resolve / 3 reject / x delete"
    } else {
        "n new feedback - r refresh"
    };
    let title = format!(
        " {} ({}) - {} ",
        if admin { "All Feedback" } else { "My Feedback" },
        feedbacks.len(),
        hint
    );

    render_selectable_list(frame, app, items, title, feedbacks.is_empty(), area);
}

fn render_students(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .students
        .iter()
        .map(|s| ListItem::new(student_line(s)))
        .collect();

    let title = format!(
        " Students ({}) - a approve / s suspend / v activate - r refresh ",
        app.students.len()
    );
    render_selectable_list(frame, app, items, title, app.students.is_empty(), area);
}

fn student_line(s: &StudentRecord) -> Line<'_> {
    let status = s.account_status();
    Line::from(vec![
        Span::styled(format!("{:<11}", status.to_string()), styles::account_status_style(status)),
        Span::raw(format!("{:<24}", truncate_string(s.display_name(), 22))),
        Span::raw(format!(
            "{:<26}",
            truncate_string(&format_optional(&s.email, "-"), 24)
        )),
        Span::styled(
            format!(
                "{:<14}",
                truncate_string(&format_optional(&s.username, "(no username)"), 12)
            ),
            styles::muted_style(),
        ),
        Span::styled(
            truncate_string(&format_optional(&s.college_name, "-"), 24),
            styles::muted_style(),
        ),
    ])
}

fn render_selectable_list(
    frame: &mut Frame,
    app: &App,
    items: Vec<ListItem>,
    title: String,
    empty: bool,
    area: Rect,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if empty {
        let text = Paragraph::new("Nothing here yet.")
            .style(styles::muted_style())
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .style(styles::list_item_style())
        .highlight_style(styles::selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(list, area, &mut state);
}

// ===== Profile =====

fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" My Profile - e edit / p change password / r refresh ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let Some(user) = app.session.user() else {
        frame.render_widget(Paragraph::new("No session.").block(block), area);
        return;
    };

    let mut lines = vec![profile_line("Email", Some(user.email.clone()))];
    match user.profile {
        Some(ref p) => {
            lines.push(profile_line("Full name", p.full_name.clone()));
            lines.push(profile_line("Username", p.username.clone()));
            lines.push(profile_line("Contact number", p.contact_number.clone()));
            lines.push(profile_line("College", p.college_name.clone()));
            lines.push(profile_line("College ID", p.college_id.clone()));
            lines.push(profile_line("College email", p.college_email.clone()));
            lines.push(profile_line("City", p.city.clone()));
            lines.push(profile_line("Pincode", p.pincode.clone()));
            lines.push(profile_line("Course", p.course_name.clone()));
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(format!("{:<20}", "Account status:"), styles::muted_style()),
                Span::styled(
                    p.account_status().to_string(),
                    styles::account_status_style(p.account_status()),
                ),
            ]));
        }
        None => {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Profile details not loaded - press r to refresh.",
                styles::muted_style(),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn profile_line(label: &str, value: Option<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<20}", format!("{}:", label)), styles::muted_style()),
        Span::raw(value.unwrap_or_else(|| "-".to_string())),
    ])
}

// ===== Chrome =====

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.notice {
        Some(ref notice) => {
            let style = match notice.level {
                NoticeLevel::Info => styles::success_style(),
                NoticeLevel::Error => styles::error_style(),
            };
            Line::from(Span::styled(format!(" {}", notice.text), style))
        }
        None => Line::from(vec![
            Span::styled(" Tab", styles::help_key_style()),
            Span::styled(" switch - ", styles::muted_style()),
            Span::styled("o", styles::help_key_style()),
            Span::styled(" sign out - ", styles::muted_style()),
            Span::styled("q", styles::help_key_style()),
            Span::styled(" quit", styles::muted_style()),
        ]),
    };

    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()).block(block),
        area,
    );
}

fn render_form_overlay(frame: &mut Frame, overlay: &crate::app::FormOverlay) {
    let height = (overlay.form.fields.len() + 4) as u16;
    let area = centered_rect(64, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, f) in overlay.form.fields.iter().enumerate() {
        lines.push(field_line(f.label, &f.value, f.masked, i == overlay.form.focus));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter submit - Esc cancel - Tab next field",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(format!(" {} ", overlay.title))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Center a fixed-size box inside an area, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
