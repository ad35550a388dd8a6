// src/times.rs
// Human time string → seconds.
//
// Three accepted shapes: plain seconds ("58.21"), a disqualification or
// blank marker (absent), and "minutes:seconds" ("1:03.55" → 63.55).
// Anything else is a TimeFormat error, never swallowed.

use crate::error::{Result, ScrapeError};

/// Parse a recorded time.
///
/// `Ok(None)` marks an absent value: blank input, or anything containing
/// "dq" case-insensitively ("DQ", "dq (false start)", ...).
pub fn parse_seconds(raw: &str) -> Result<Option<f64>> {
    if let Ok(v) = raw.trim().parse::<f64>() {
        return Ok(Some(v));
    }
    if raw.trim().is_empty() || raw.to_ascii_lowercase().contains("dq") {
        return Ok(None);
    }

    // Remaining legal shape is minutes:seconds, split on the first colon.
    let Some((minutes, seconds)) = raw.trim().split_once(':') else {
        return Err(ScrapeError::TimeFormat { raw: s!(raw) });
    };
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| ScrapeError::TimeFormat { raw: s!(raw) })?;
    let seconds: f64 = seconds
        .trim()
        .parse()
        .map_err(|_| ScrapeError::TimeFormat { raw: s!(raw) })?;
    Ok(Some(f64::from(minutes) * 60.0 + seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_seconds() {
        assert_eq!(parse_seconds("58.21").unwrap(), Some(58.21));
        assert_eq!(parse_seconds(" 31.9 ").unwrap(), Some(31.9));
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(parse_seconds("1:03.55").unwrap(), Some(63.55));
        assert_eq!(parse_seconds("2:00").unwrap(), Some(120.0));
    }

    #[test]
    fn disqualification_is_absent() {
        assert_eq!(parse_seconds("DQ").unwrap(), None);
        assert_eq!(parse_seconds("dq (false start)").unwrap(), None);
    }

    #[test]
    fn blank_is_absent() {
        assert_eq!(parse_seconds("").unwrap(), None);
        assert_eq!(parse_seconds("   ").unwrap(), None);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            parse_seconds("fast"),
            Err(ScrapeError::TimeFormat { .. })
        ));
        assert!(matches!(
            parse_seconds(":21"),
            Err(ScrapeError::TimeFormat { .. })
        ));
    }

    #[test]
    fn hour_style_times_are_an_error() {
        // The right-hand part after the first colon must parse as seconds.
        assert!(matches!(
            parse_seconds("1:03:55"),
            Err(ScrapeError::TimeFormat { .. })
        ));
    }
}
