use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_MINUTE: u64 = 60;

const NAIVE_TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("invalid target date {input:?}: expected RFC 3339 or YYYY-MM-DDTHH:MM:SS")]
    InvalidTarget { input: String },
}

/// One of the four boxes shown on a countdown image, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// A non-negative number of seconds broken down into days, hours, minutes
/// and seconds.
///
/// `hours < 24`, `minutes < 60` and `seconds < 60` always hold; `days` is
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposedTime {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl DecomposedTime {
    /// Decomposes a signed remaining duration, treating anything negative as
    /// zero.
    #[must_use]
    pub fn from_remaining(remaining: i64) -> Self {
        decompose(u64::try_from(remaining).unwrap_or(0))
    }

    /// Reassembles the total number of seconds this breakdown represents.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours as u64 * SECONDS_PER_HOUR
            + self.minutes as u64 * SECONDS_PER_MINUTE
            + self.seconds as u64
    }

    /// The four display values, in the order they are drawn.
    #[must_use]
    pub fn units(&self) -> [(TimeUnit, u64); 4] {
        [
            (TimeUnit::Days, self.days),
            (TimeUnit::Hours, u64::from(self.hours)),
            (TimeUnit::Minutes, u64::from(self.minutes)),
            (TimeUnit::Seconds, u64::from(self.seconds)),
        ]
    }
}

/// Whole seconds from `now` until `target`, truncated toward zero.
///
/// Positive while the target lies in the future, zero when the two instants
/// share the same second, negative once the target has passed.
#[must_use]
pub fn compute_remaining(now: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
    (target - now).num_seconds()
}

/// Splits a number of seconds into days, hours, minutes and seconds using
/// integer arithmetic only.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn decompose(total_seconds: u64) -> DecomposedTime {
    // each remainder below is bounded by 24 or 60, so the narrowing is lossless
    DecomposedTime {
        days: total_seconds / SECONDS_PER_DAY,
        hours: ((total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8,
        minutes: ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
        seconds: (total_seconds % SECONDS_PER_MINUTE) as u8,
    }
}

/// Parses a configured target date.
///
/// Accepts RFC 3339 (`2025-11-28T00:00:00-05:00`) or a bare
/// `YYYY-MM-DDTHH:MM:SS`, which is read as UTC.
///
/// # Errors
/// Returns [`TimeError::InvalidTarget`] if neither form matches.
pub fn parse_target(input: &str) -> Result<DateTime<Utc>, TimeError> {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, NAIVE_TARGET_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TimeError::InvalidTarget {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 27, h, m, s).unwrap()
    }

    #[test]
    fn test_decompose_zero() {
        assert_eq!(decompose(0), DecomposedTime::default());
    }

    #[test]
    fn test_decompose_day_boundary() {
        assert_eq!(
            decompose(86_399),
            DecomposedTime {
                days: 0,
                hours: 23,
                minutes: 59,
                seconds: 59,
            }
        );
        assert_eq!(
            decompose(86_400),
            DecomposedTime {
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 0,
            }
        );
    }

    #[test]
    fn test_decompose_round_trips_and_stays_in_range() {
        let samples = (0..200_000_u64)
            .chain((0..1_000).map(|i| i * 7_919_u64 + 1_000_000))
            .chain([u64::MAX / 2, u64::MAX]);

        for total in samples {
            let time = decompose(total);
            assert_eq!(time.total_seconds(), total, "round trip for {total}");
            assert!(time.hours < 24);
            assert!(time.minutes < 60);
            assert!(time.seconds < 60);
        }
    }

    #[test]
    fn test_from_remaining_clamps_negative() {
        assert_eq!(DecomposedTime::from_remaining(-5), DecomposedTime::default());
        assert_eq!(DecomposedTime::from_remaining(61).minutes, 1);
    }

    #[test]
    fn test_compute_remaining_equal_instants() {
        assert_eq!(compute_remaining(at(12, 0, 0), at(12, 0, 0)), 0);
    }

    #[test]
    fn test_compute_remaining_past_target() {
        assert!(compute_remaining(at(12, 0, 1), at(12, 0, 0)) <= 0);
        assert_eq!(compute_remaining(at(13, 0, 0), at(12, 0, 0)), -3_600);
    }

    #[test]
    fn test_compute_remaining_truncates_sub_second() {
        let target = at(12, 0, 2);
        let now = at(12, 0, 0) + Duration::milliseconds(300);

        assert_eq!(compute_remaining(now, target), 1);
        assert_eq!(compute_remaining(target, now), -1);
    }

    #[test]
    fn test_end_to_end_two_seconds_left() {
        let target = parse_target("2025-11-28T00:00:00").unwrap();
        let remaining = compute_remaining(at(23, 59, 58), target);

        assert_eq!(remaining, 2);
        assert_eq!(
            DecomposedTime::from_remaining(remaining).units().map(|(_, v)| v),
            [0, 0, 0, 2]
        );
    }

    #[test]
    fn test_parse_target_accepts_offsets() {
        let parsed = parse_target("2025-11-28T00:00:00-05:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 28, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        let err = parse_target("next friday").unwrap_err();
        assert!(err.to_string().contains("next friday"));
    }
}
