//! Line payload parsing.
//!
//! Each typewriter block declares its text as a JSON-encoded list of
//! strings. Parsing never fails outward: a malformed payload becomes an
//! empty line list and the block simply types nothing.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

static LAST_LOGIN_TOKEN: OnceLock<Regex> = OnceLock::new();

fn last_login_token() -> &'static Regex {
    LAST_LOGIN_TOKEN.get_or_init(|| Regex::new(r"(?i)LAST_LOGIN").expect("valid regex"))
}

/// Parse a block's line payload, substituting the last-login placeholder
/// in the first line with a timestamp formatted from `now`.
///
/// The substitution happens here, once, at setup time; the animation only
/// ever sees the finished lines.
pub fn parse_lines(payload: &str, now: NaiveDateTime) -> Vec<String> {
    let mut lines: Vec<String> = match serde_json::from_str(payload) {
        Ok(lines) => lines,
        Err(err) => {
            debug!("ignoring malformed line payload: {err}");
            Vec::new()
        }
    };

    if let Some(first) = lines.first_mut() {
        if last_login_token().is_match(first) {
            *first = format_last_login(now);
        }
    }

    lines
}

/// Format a login banner line from a timestamp.
///
/// Pure over its input so it can be tested against fixed times; callers
/// pass the current wall clock exactly once per block.
pub fn format_last_login(t: NaiveDateTime) -> String {
    format!("Last login: {} on console", t.format("%a %b %d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_format_last_login_fixed_times() {
        assert_eq!(
            format_last_login(at(2025, 1, 1, 0, 0, 0)),
            "Last login: Wed Jan 01 00:00:00 on console"
        );
        assert_eq!(
            format_last_login(at(2025, 6, 7, 9, 5, 3)),
            "Last login: Sat Jun 07 09:05:03 on console"
        );
        assert_eq!(
            format_last_login(at(2024, 12, 31, 23, 59, 59)),
            "Last login: Tue Dec 31 23:59:59 on console"
        );
    }

    #[test]
    fn test_parse_plain_payload() {
        let lines = parse_lines(r#"["one", "two"]"#, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_malformed_payload_degrades_to_empty() {
        let now = at(2025, 1, 1, 0, 0, 0);
        assert!(parse_lines("not json", now).is_empty());
        assert!(parse_lines(r#"{"lines": []}"#, now).is_empty());
        assert!(parse_lines(r#"["ok", 3]"#, now).is_empty());
        assert!(parse_lines("", now).is_empty());
    }

    #[test]
    fn test_placeholder_substitution() {
        let now = at(2025, 1, 1, 0, 0, 0);
        let lines = parse_lines(r#"["__LAST_LOGIN__", "echo hi"]"#, now);
        assert_eq!(lines[0], "Last login: Wed Jan 01 00:00:00 on console");
        assert_eq!(lines[1], "echo hi");

        // Case-insensitive, bare token form
        let lines = parse_lines(r#"["last_login"]"#, now);
        assert_eq!(lines[0], "Last login: Wed Jan 01 00:00:00 on console");
    }

    #[test]
    fn test_placeholder_only_checked_on_first_line() {
        let now = at(2025, 1, 1, 0, 0, 0);
        let lines = parse_lines(r#"["echo hi", "__LAST_LOGIN__"]"#, now);
        assert_eq!(lines[1], "__LAST_LOGIN__");
    }
}
