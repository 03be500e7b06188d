//! Parsing of committed duration text.

/// Parses edited duration text into total seconds.
///
/// The text is first stripped to digits and colons. With a colon, the part
/// before it is minutes (required) and the first two digits after it are
/// seconds (optional, clamped to 59). Without a colon the whole number is
/// minutes. Returns `None` for empty or unparsable input. Numbers too large
/// for a `u64` saturate; the result is not clamped to the engine's duration
/// range.
///
/// ```rust
/// use focus_flow::editor::parse_duration_text;
///
/// assert_eq!(parse_duration_text("12:05"), Some(725));
/// assert_eq!(parse_duration_text("7"), Some(420));
/// assert_eq!(parse_duration_text("3:99"), Some(239));
/// assert_eq!(parse_duration_text(":30"), None);
/// ```
pub fn parse_duration_text(text: &str) -> Option<u64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    match cleaned.split_once(':') {
        Some((minutes, rest)) => {
            let minutes = saturating_parse(minutes)?;
            let seconds_digits: String = rest
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(2)
                .collect();
            let seconds = if seconds_digits.is_empty() {
                0
            } else {
                seconds_digits.parse::<u64>().ok()?.min(59)
            };
            Some(minutes.saturating_mul(60).saturating_add(seconds))
        }
        None => Some(saturating_parse(&cleaned)?.saturating_mul(60)),
    }
}

/// Parses a run of ASCII digits, saturating at `u64::MAX`. Empty is `None`.
fn saturating_parse(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(parse_duration_text("25:00"), Some(1500));
        assert_eq!(parse_duration_text("00:05"), Some(5));
        assert_eq!(parse_duration_text("90:00"), Some(5400));
    }

    #[test]
    fn test_seconds_default_and_clamp() {
        assert_eq!(parse_duration_text("12:"), Some(720));
        assert_eq!(parse_duration_text("1:75"), Some(119));
        assert_eq!(parse_duration_text("1:2"), Some(62));
        assert_eq!(parse_duration_text("1:234"), Some(83));
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(parse_duration_text("45"), Some(2700));
        assert_eq!(parse_duration_text(" 3 min"), Some(180));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_duration_text(""), None);
        assert_eq!(parse_duration_text("abc"), None);
        assert_eq!(parse_duration_text(":15"), None);
    }

    #[test]
    fn test_oversized_input_saturates() {
        assert_eq!(parse_duration_text("99999999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_duration_text("99999999999999999999999:30"), Some(u64::MAX));
        assert_eq!(parse_duration_text("307445734561825861:00"), Some(u64::MAX));
    }

    #[test]
    fn test_extra_colons_after_seconds() {
        assert_eq!(parse_duration_text("1:2:3"), Some(83));
    }
}
