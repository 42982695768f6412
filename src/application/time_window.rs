// Time window - Inclusive date range selection over chart records
use crate::domain::error::{ChartError, Result};
use crate::domain::series::SeriesPoint;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// At most this many records are handed to the renderer.
pub const RENDER_CAP: usize = 100;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateEdge {
    From,
    To,
}

/// Inclusive `[from, to]` range of ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: String,
    pub to: String,
}

impl TimeWindow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Window covering `lookback` up to `now`. `None` when the start falls
    /// outside the representable date range.
    pub fn ending_at(now: DateTime<Utc>, lookback: Duration) -> Option<Self> {
        let start = now.checked_sub_signed(lookback)?;
        Some(Self::new(to_iso_string(start), to_iso_string(now)))
    }

    pub fn last_day(now: DateTime<Utc>) -> Self {
        Self::ending_at(now, Duration::days(1)).unwrap_or_else(|| {
            Self::new(to_iso_string(DateTime::<Utc>::MIN_UTC), to_iso_string(now))
        })
    }

    /// Replace one edge with a date picked by the user. The raw value is
    /// normalized to ISO-8601 first; on failure the window is unchanged.
    pub fn with_edge(self, edge: DateEdge, raw: &str) -> Result<Self> {
        let normalized = normalize_date(raw)?;
        Ok(match edge {
            DateEdge::From => Self {
                from: normalized,
                ..self
            },
            DateEdge::To => Self {
                to: normalized,
                ..self
            },
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, timestamp: &str) -> bool {
        self.from.as_str() <= timestamp && timestamp <= self.to.as_str()
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::last_day(Utc::now())
    }
}

/// Format the way a browser's `Date.toISOString()` does.
pub fn to_iso_string(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a date picker value to an ISO-8601 UTC string.
///
/// Accepts RFC 3339 with any offset, naive date-times (read as UTC), bare
/// dates and four-digit years (midnight UTC) and epoch milliseconds.
pub fn normalize_date(raw: &str) -> Result<String> {
    let raw = raw.trim();

    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|at| to_iso_string(at.and_utc()))
            .ok_or_else(|| rejected(raw));
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .map(to_iso_string)
            .ok_or_else(|| rejected(raw));
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(to_iso_string(at.with_timezone(&Utc)));
    }

    for format in NAIVE_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(to_iso_string(at.and_utc()));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| to_iso_string(at.and_utc()))
        .ok_or_else(|| rejected(raw))
}

fn rejected(raw: &str) -> ChartError {
    tracing::warn!("Rejected date value {:?}", raw);
    ChartError::InvalidDate(raw.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WindowOutcome {
    /// `from` is after `to`; nothing can match.
    InvertedWindow,
    NoPointsInWindow,
    #[serde(rename_all = "camelCase")]
    Points { matched: usize, truncated: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowedPoints<'a> {
    pub points: Vec<&'a SeriesPoint>,
    pub outcome: WindowOutcome,
}

/// Keep the records inside the window, then only the most recent
/// [`RENDER_CAP`] of them. Order is preserved.
pub fn filter<'a>(points: &'a [SeriesPoint], window: &TimeWindow) -> WindowedPoints<'a> {
    if window.is_inverted() {
        return WindowedPoints {
            points: Vec::new(),
            outcome: WindowOutcome::InvertedWindow,
        };
    }

    let mut selected: Vec<&SeriesPoint> = points
        .iter()
        .filter(|point| window.contains(&point.timestamp))
        .collect();

    let matched = selected.len();
    if matched == 0 {
        return WindowedPoints {
            points: selected,
            outcome: WindowOutcome::NoPointsInWindow,
        };
    }

    let truncated = matched > RENDER_CAP;
    if truncated {
        selected.drain(..matched - RENDER_CAP);
    }

    WindowedPoints {
        points: selected,
        outcome: WindowOutcome::Points { matched, truncated },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minute_points(count: u32) -> Vec<SeriesPoint> {
        (0..count)
            .map(|i| {
                SeriesPoint::new(format!(
                    "2020-01-01T{:02}:{:02}:00Z",
                    i / 60,
                    i % 60
                ))
            })
            .collect()
    }

    #[test]
    fn test_example_window() {
        let points = vec![
            SeriesPoint::new("2020-01-01T00:00:00Z"),
            SeriesPoint::new("2020-01-01T00:01:00Z"),
        ];
        let window = TimeWindow::new("2020-01-01T00:00:30Z", "2020-01-01T00:02:00Z");

        let windowed = filter(&points, &window);

        assert_eq!(windowed.points, vec![&points[1]]);
        assert_eq!(
            windowed.outcome,
            WindowOutcome::Points {
                matched: 1,
                truncated: false
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let points = minute_points(5);
        let window = TimeWindow::new("2020-01-01T00:01:00Z", "2020-01-01T00:03:00Z");

        let windowed = filter(&points, &window);

        let stamps: Vec<&str> = windowed.points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec!["2020-01-01T00:01:00Z", "2020-01-01T00:02:00Z", "2020-01-01T00:03:00Z"]
        );
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let points = minute_points(5);
        let window = TimeWindow::new("2020-01-01T00:03:00Z", "2020-01-01T00:01:00Z");

        let windowed = filter(&points, &window);

        assert!(windowed.points.is_empty());
        assert_eq!(windowed.outcome, WindowOutcome::InvertedWindow);
    }

    #[test]
    fn test_window_without_points() {
        let points = minute_points(5);
        let window = TimeWindow::new("2021-01-01T00:00:00Z", "2021-01-02T00:00:00Z");

        let windowed = filter(&points, &window);
        assert_eq!(windowed.outcome, WindowOutcome::NoPointsInWindow);
    }

    #[test]
    fn test_render_cap_keeps_most_recent() {
        let points = minute_points(250);
        let window = TimeWindow::new("2020-01-01T00:00:00Z", "2020-01-01T23:59:59Z");

        let windowed = filter(&points, &window);

        assert_eq!(windowed.points.len(), RENDER_CAP);
        assert_eq!(
            windowed.outcome,
            WindowOutcome::Points {
                matched: 250,
                truncated: true
            }
        );
        let expected: Vec<&SeriesPoint> = points[150..].iter().collect();
        assert_eq!(windowed.points, expected);
    }

    #[test]
    fn test_render_cap_applies_after_filtering() {
        let points = minute_points(250);
        // 00:10 .. 01:59 inclusive -> 110 points
        let window = TimeWindow::new("2020-01-01T00:10:00Z", "2020-01-01T01:59:00Z");

        let windowed = filter(&points, &window);

        assert_eq!(windowed.points.len(), RENDER_CAP);
        assert_eq!(windowed.points[0].timestamp, "2020-01-01T00:20:00Z");
        assert_eq!(windowed.points[99].timestamp, "2020-01-01T01:59:00Z");
    }

    #[test]
    fn test_exactly_cap_is_not_truncated() {
        let points = minute_points(100);
        let window = TimeWindow::new("2020-01-01T00:00:00Z", "2020-01-02T00:00:00Z");

        let windowed = filter(&points, &window);
        assert_eq!(
            windowed.outcome,
            WindowOutcome::Points {
                matched: 100,
                truncated: false
            }
        );
    }

    #[test]
    fn test_normalize_date_forms() {
        assert_eq!(
            normalize_date("2020-01-01T02:00:00+02:00").unwrap(),
            "2020-01-01T00:00:00.000Z"
        );
        assert_eq!(normalize_date("2020-01-01T00:00:30Z").unwrap(), "2020-01-01T00:00:30.000Z");
        assert_eq!(normalize_date("2020-01-01 12:30").unwrap(), "2020-01-01T12:30:00.000Z");
        assert_eq!(normalize_date("2020-01-01T12:30:15.25").unwrap(), "2020-01-01T12:30:15.250Z");
        assert_eq!(normalize_date("2020-01-01").unwrap(), "2020-01-01T00:00:00.000Z");
        assert_eq!(normalize_date("1577836800000").unwrap(), "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert!(matches!(normalize_date("yesterday"), Err(ChartError::InvalidDate(_))));
    }

    #[test]
    fn test_normalize_bare_year() {
        assert_eq!(normalize_date("2020").unwrap(), "2020-01-01T00:00:00.000Z");
        assert_eq!(normalize_date("20200").unwrap(), "1970-01-01T00:00:20.200Z");
    }

    #[test]
    fn test_normalize_millis_out_of_range() {
        assert!(matches!(
            normalize_date(&i64::MAX.to_string()),
            Err(ChartError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_with_edge() {
        let window = TimeWindow::new("2020-01-01T00:00:00.000Z", "2020-01-02T00:00:00.000Z");

        let window = window.with_edge(DateEdge::To, "2020-01-03").unwrap();
        assert_eq!(window.to, "2020-01-03T00:00:00.000Z");
        assert_eq!(window.from, "2020-01-01T00:00:00.000Z");

        let window = window.with_edge(DateEdge::From, "2020-01-02T06:00:00Z").unwrap();
        assert_eq!(window.from, "2020-01-02T06:00:00.000Z");

        assert!(window.clone().with_edge(DateEdge::From, "not a date").is_err());
    }

    #[test]
    fn test_last_day() {
        let now = Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap();
        let window = TimeWindow::last_day(now);

        assert_eq!(window.from, "2020-02-29T12:00:00.000Z");
        assert_eq!(window.to, "2020-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_ending_at_out_of_range() {
        let now = Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap();
        let lookback = Duration::try_hours(1_000_000_000_000).unwrap();

        assert_eq!(TimeWindow::ending_at(now, lookback), None);

        let window = TimeWindow::ending_at(now, Duration::hours(6)).unwrap();
        assert_eq!(window.from, "2020-03-01T06:00:00.000Z");
    }
}
