use chrono::NaiveDateTime;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Format a backend timestamp for display.
/// The backend emits naive ISO timestamps without an offset
/// (`2025-03-10T09:30:00.123456`); fall back to the date prefix when the
/// full parse fails.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    if date.len() >= 10 {
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Format a byte count the way file listings do: B, KB, MB.
pub fn format_file_size(bytes: Option<i64>) -> String {
    let Some(bytes) = bytes.filter(|b| *b >= 0) else {
        return "-".to_string();
    };
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date_handles_naive_backend_timestamps() {
        assert_eq!(format_date("2025-03-10T09:30:00"), "Mar 10, 2025 09:30");
        assert_eq!(format_date("2025-03-10T09:30:00.123456"), "Mar 10, 2025 09:30");
        // Unparsable but date-prefixed input degrades to the prefix
        assert_eq!(format_date("2025-03-10 morning"), "2025-03-10");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(52_431)), "51.2 KB");
        assert_eq!(format_file_size(Some(3 * 1024 * 1024)), "3.0 MB");
        assert_eq!(format_file_size(None), "-");
    }
}
