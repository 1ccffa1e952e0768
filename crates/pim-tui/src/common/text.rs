//! Text utilities for TUI rendering.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        let next_width = truncated.width() + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Sanitizes note text for display.
///
/// Article titles and content are user-supplied and may contain control
/// characters that would corrupt the terminal (escape sequences, tabs,
/// carriage returns). Escapes are removed, tabs expanded to four spaces.
/// Newlines survive; callers split on them when laying out lines.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    let needs_work = s
        .chars()
        .any(|c| c != '\n' && (c.is_control() || c == '\u{7f}'));
    if !needs_work {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() || c == '\u{7f}' => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
