//! Duration string parsing.
//!
//! Durations are written as colon-delimited parts, each a number with a
//! `d`, `h`, or `m` unit suffix: `1d`, `1d:12h`, `2d:30m`. Units are
//! case-insensitive and the summed total must be positive.

use chrono::Duration;

/// Parse a duration string like `1d:12h:30m`.
///
/// Returns `None` for an empty string, a part without a recognized unit,
/// a part whose number does not parse, or a non-positive total.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut total = Duration::zero();
    for part in s.split(':') {
        let part = part.trim();
        let unit = part.chars().last()?;
        let num_str = &part[..part.len() - unit.len_utf8()];
        let num: i64 = num_str.parse().ok()?;

        let span = match unit.to_ascii_lowercase() {
            'd' => Duration::try_days(num)?,
            'h' => Duration::try_hours(num)?,
            'm' => Duration::try_minutes(num)?,
            _ => return None,
        };
        total = total.checked_add(&span)?;
    }

    if total <= Duration::zero() { None } else { Some(total) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part() {
        assert_eq!(parse_duration("30d"), Some(Duration::days(30)));
        assert_eq!(parse_duration("24h"), Some(Duration::hours(24)));
        assert_eq!(parse_duration("60m"), Some(Duration::minutes(60)));
    }

    #[test]
    fn test_multi_part_sums() {
        assert_eq!(
            parse_duration("1d:12h:30m"),
            Some(Duration::days(1) + Duration::hours(12) + Duration::minutes(30))
        );
        assert_eq!(
            parse_duration("2h:2h"),
            Some(Duration::hours(4)),
        );
    }

    #[test]
    fn test_case_insensitive_units() {
        assert_eq!(parse_duration("1D:2H:3M"), parse_duration("1d:2h:3m"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5"), None);
        assert_eq!(parse_duration("5s"), None);
        assert_eq!(parse_duration("d"), None);
        assert_eq!(parse_duration("1d:"), None);
        assert_eq!(parse_duration("1d:oops"), None);
        assert_eq!(parse_duration("one_d"), None);
    }

    #[test]
    fn test_rejects_non_positive_total() {
        assert_eq!(parse_duration("0d"), None);
        assert_eq!(parse_duration("0d:0h"), None);
        assert_eq!(parse_duration("-1h"), None);
        assert_eq!(parse_duration("1h:-2h"), None);
    }
}
