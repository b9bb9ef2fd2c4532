//! Utility functions for string and value formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_date, format_file_size, format_optional, truncate_string};
