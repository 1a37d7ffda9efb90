//! Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("ptwtui-debug.log");
    path
}

/// Truncate a cell value to `width` display columns, appending "…" when cut
pub fn truncate_to_width(text: &str, width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_width("Lahore", 10), "Lahore");
        assert_eq!(truncate_to_width("", 3), "");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_to_width("Gujranwala Circle", 8), "Gujranw…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
