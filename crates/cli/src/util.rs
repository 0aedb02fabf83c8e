use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        // No room for the marker; keep whatever whole chars fit
        let mut used = 0;
        return s
            .chars()
            .take_while(|ch| {
                used += ch.width().unwrap_or(0);
                used <= width
            })
            .collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let text = truncate_display(s, width);
    let used = display_width(&text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// Whole numbers without a fraction ("100"), others as-is ("12.5").
pub(crate) fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Price per unit always carries exactly one decimal.
pub(crate) fn format_metric(value: f64) -> String {
    format!("{value:.1}")
}
