//! Time string parsing.

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into whole seconds.
///
/// Components are read right to left as seconds, minutes, hours. Each must
/// be a non-empty run of ASCII digits (surrounding whitespace is ignored).
/// Components are not range checked, so `"1:75"` is 135 seconds.
///
/// Returns `None` for zero or more than three components, any non-integer
/// component, or a value that overflows.
pub fn time_to_seconds(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total: u64 = 0;
    for part in parts {
        let value = parse_component(part)?;
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}

fn parse_component(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Format seconds as `HH:MM:SS` (or `MM:SS` under an hour).
///
/// Fractional seconds are kept to millisecond precision when present.
pub fn format_timecode(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc() as u64;
    let millis = ((seconds - seconds.trunc()) * 1000.0).round() as u64;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    let base = if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    };

    if millis > 0 {
        format!("{}.{:03}", base, millis.min(999))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_two_and_three_components() {
        assert_eq!(time_to_seconds("90"), Some(90));
        assert_eq!(time_to_seconds("1:30"), Some(90));
        assert_eq!(time_to_seconds("2:05"), Some(125));
        assert_eq!(time_to_seconds("1:02:03"), Some(3723));
        assert_eq!(time_to_seconds("00:13:00"), Some(780));
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(time_to_seconds("  1:30 "), Some(90));
        assert_eq!(time_to_seconds("1: 30"), Some(90));
    }

    #[test]
    fn components_are_not_range_checked() {
        assert_eq!(time_to_seconds("1:75"), Some(135));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(time_to_seconds(""), None);
        assert_eq!(time_to_seconds("1:2:3:4"), None);
        assert_eq!(time_to_seconds("a:10"), None);
        assert_eq!(time_to_seconds("1.5"), None);
        assert_eq!(time_to_seconds("1::2"), None);
        assert_eq!(time_to_seconds(":30"), None);
        assert_eq!(time_to_seconds("+5"), None);
        assert_eq!(time_to_seconds("-5"), None);
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(time_to_seconds("99999999999999999999"), None);
        assert_eq!(time_to_seconds("999999999999999999:0:0"), None);
    }

    #[test]
    fn formats_timecodes() {
        assert_eq!(format_timecode(0.0), "0:00");
        assert_eq!(format_timecode(125.0), "2:05");
        assert_eq!(format_timecode(3723.0), "1:02:03");
        assert_eq!(format_timecode(90.5), "1:30.500");
    }
}
