use chrono::{DateTime, Utc};

use super::timestamp::parse_timestamp;

/// Optional exclusive bounds on an issue's closure time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosedDateRange {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

impl ClosedDateRange {
    pub fn new(after: Option<DateTime<Utc>>, before: Option<DateTime<Utc>>) -> Self {
        Self { after, before }
    }

    /// Build a range from the raw `--after` / `--before` strings
    pub fn parse(after: Option<&str>, before: Option<&str>) -> Result<Self, String> {
        let after = after
            .map(|s| parse_timestamp(s).map_err(|e| format!("Invalid --after bound: {}", e)))
            .transpose()?;
        let before = before
            .map(|s| parse_timestamp(s).map_err(|e| format!("Invalid --before bound: {}", e)))
            .transpose()?;
        Ok(Self { after, before })
    }

    /// True when neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    /// True when no timestamp can satisfy both bounds
    pub fn is_empty(&self) -> bool {
        matches!((self.after, self.before), (Some(after), Some(before)) if after >= before)
    }

    /// Strict on both ends: a timestamp equal to a bound is outside the range.
    pub fn contains(&self, closed_at: &DateTime<Utc>) -> bool {
        if let Some(after) = &self.after {
            if closed_at <= after {
                return false;
            }
        }
        if let Some(before) = &self.before {
            if closed_at >= before {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_contains_is_exclusive() {
        let range = ClosedDateRange::new(Some(day(1)), Some(day(10)));
        assert!(!range.contains(&day(1)));
        assert!(range.contains(&day(5)));
        assert!(!range.contains(&day(10)));
    }

    #[test]
    fn test_open_ended_ranges() {
        let after_only = ClosedDateRange::new(Some(day(5)), None);
        assert!(after_only.contains(&day(6)));
        assert!(!after_only.contains(&day(4)));

        let before_only = ClosedDateRange::new(None, Some(day(5)));
        assert!(before_only.contains(&day(4)));
        assert!(!before_only.contains(&day(6)));

        assert!(ClosedDateRange::default().is_unbounded());
        assert!(!after_only.is_unbounded());
    }

    #[test]
    fn test_parse_bounds() {
        let range = ClosedDateRange::parse(Some("2024-01-01"), Some("2024-01-10")).unwrap();
        assert_eq!(range, ClosedDateRange::new(Some(day(1)), Some(day(10))));

        let err = ClosedDateRange::parse(Some("last week"), None).unwrap_err();
        assert!(err.contains("--after"));
        assert!(ClosedDateRange::parse(None, Some("2024/01/10")).is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(ClosedDateRange::new(Some(day(5)), Some(day(5))).is_empty());
        assert!(ClosedDateRange::new(Some(day(6)), Some(day(5))).is_empty());
        assert!(!ClosedDateRange::new(Some(day(5)), None).is_empty());
    }
}
