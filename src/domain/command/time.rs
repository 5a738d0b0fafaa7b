//! Time-expression parsing for spoken seek targets
//!
//! Turns phrases like "2:30", "1 minute 30 seconds", "45 sec" or "2 min"
//! into a second count. Forms are tried in a fixed precedence order; the
//! colon form wins outright when present.

use std::sync::OnceLock;

use regex::Regex;

static COLON: OnceLock<Regex> = OnceLock::new();
static COMBINED: OnceLock<Regex> = OnceLock::new();
static SECONDS_ONLY: OnceLock<Regex> = OnceLock::new();
static MINUTES_ONLY: OnceLock<Regex> = OnceLock::new();

fn colon_re() -> &'static Regex {
    COLON.get_or_init(|| Regex::new(r"(\d+):(\d+)").unwrap())
}

fn combined_re() -> &'static Regex {
    COMBINED.get_or_init(|| {
        Regex::new(r"(?:(\d+)\s*(?:minutes?|min|m)\b)?\s*(?:(\d+)\s*(?:seconds?|sec|s)\b)?").unwrap()
    })
}

fn seconds_re() -> &'static Regex {
    SECONDS_ONLY.get_or_init(|| Regex::new(r"(\d+)\s*(?:seconds?|sec|s)\b").unwrap())
}

fn minutes_re() -> &'static Regex {
    MINUTES_ONLY.get_or_init(|| Regex::new(r"(\d+)\s*(?:minutes?|min|m)\b").unwrap())
}

/// Parse a free-text duration phrase into seconds.
///
/// Precedence:
/// 1. `MM:SS` colon form
/// 2. combined "N minute(s) M second(s)" word form (either part optional,
///    but at least one unit-tagged number must be present)
/// 3. seconds-only phrase
/// 4. minutes-only phrase
///
/// Returns `None` when no form matches.
pub fn parse_time(text: &str) -> Option<u64> {
    let text = text.trim().to_lowercase();

    if let Some(caps) = colon_re().captures(&text) {
        let minutes: u64 = caps[1].parse().ok()?;
        let seconds: u64 = caps[2].parse().ok()?;
        return Some(minutes * 60 + seconds);
    }

    if let Some(caps) = combined_re().captures(&text) {
        let minutes = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
        let seconds = caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok());
        if minutes.is_some() || seconds.is_some() {
            return Some(minutes.unwrap_or(0) * 60 + seconds.unwrap_or(0));
        }
    }

    if let Some(caps) = seconds_re().captures(&text) {
        return caps[1].parse().ok();
    }

    if let Some(caps) = minutes_re().captures(&text) {
        let minutes: u64 = caps[1].parse().ok()?;
        return Some(minutes * 60);
    }

    None
}

/// Render a second count as "M:SS" for feedback strings
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colon_form() {
        assert_eq!(parse_time("2:30"), Some(150));
        assert_eq!(parse_time("0:45"), Some(45));
        assert_eq!(parse_time("10:05"), Some(605));
    }

    #[test]
    fn colon_form_wins_over_words() {
        assert_eq!(parse_time("2:30 minutes"), Some(150));
    }

    #[test]
    fn parse_combined_word_form() {
        assert_eq!(parse_time("1 minute 30 seconds"), Some(90));
        assert_eq!(parse_time("2 minutes 15 seconds"), Some(135));
        assert_eq!(parse_time("1 min 5 sec"), Some(65));
    }

    #[test]
    fn parse_seconds_only() {
        assert_eq!(parse_time("45 sec"), Some(45));
        assert_eq!(parse_time("45 seconds"), Some(45));
        assert_eq!(parse_time("45 s"), Some(45));
    }

    #[test]
    fn parse_minutes_only() {
        assert_eq!(parse_time("2 min"), Some(120));
        assert_eq!(parse_time("2 minutes"), Some(120));
        assert_eq!(parse_time("1 m"), Some(60));
    }

    #[test]
    fn parse_case_and_whitespace() {
        assert_eq!(parse_time("  1 Minute 30 Seconds  "), Some(90));
    }

    #[test]
    fn parse_no_match() {
        assert_eq!(parse_time("banana"), None);
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("the middle"), None);
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(150), "2:30");
        assert_eq!(format_time(605), "10:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }
}
