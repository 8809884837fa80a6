use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::compare_scores_desc;
use crate::{mean, Post};

pub const TOP_HOURS: usize = 5;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPerformance {
    pub day: String,
    pub avg_engagement: f64,
    pub posts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPerformance {
    pub hour: u32,
    pub avg_engagement: f64,
    pub posts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingPatterns {
    pub best_days: Vec<DayPerformance>,
    pub best_hours: Vec<HourPerformance>,
}

/// Wall-clock time of an ISO 8601 timestamp in the offset it was written in.
/// Offset-less timestamps are taken as-is.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    let without_zulu = value.strip_suffix('Z').unwrap_or(value);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(without_zulu, format).ok())
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn analyze_posting_times(posts: &[Post]) -> PostingPatterns {
    let mut by_day: BTreeMap<u32, (Weekday, Vec<f64>)> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for post in posts {
        let Some(timestamp) = parse_timestamp(&post.created_at) else {
            tracing::debug!(
                post_id = %post.id,
                created_at = %post.created_at,
                "skipping unparsable timestamp"
            );
            continue;
        };
        let weekday = timestamp.weekday();
        by_day
            .entry(weekday.num_days_from_monday())
            .or_insert_with(|| (weekday, Vec::new()))
            .1
            .push(post.engagement_score());
        by_hour
            .entry(timestamp.hour())
            .or_default()
            .push(post.engagement_score());
    }

    let mut best_days: Vec<DayPerformance> = by_day
        .into_values()
        .map(|(weekday, scores)| DayPerformance {
            day: day_name(weekday).to_string(),
            avg_engagement: mean(&scores),
            posts: scores.len(),
        })
        .collect();
    best_days.sort_by(|a, b| compare_scores_desc(a.avg_engagement, b.avg_engagement));

    let mut best_hours: Vec<HourPerformance> = by_hour
        .into_iter()
        .map(|(hour, scores)| HourPerformance {
            hour,
            avg_engagement: mean(&scores),
            posts: scores.len(),
        })
        .collect();
    best_hours.sort_by(|a, b| compare_scores_desc(a.avg_engagement, b.avg_engagement));
    best_hours.truncate(TOP_HOURS);

    PostingPatterns {
        best_days,
        best_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_iso_shapes() {
        let zulu = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(zulu.hour(), 10);

        let offset = parse_timestamp("2024-01-15T23:30:00+05:30").unwrap();
        assert_eq!(offset.hour(), 23);
        assert_eq!(offset.weekday(), Weekday::Mon);

        let naive = parse_timestamp("2024-01-14T15:45:00").unwrap();
        assert_eq!(naive.weekday(), Weekday::Sun);

        let fractional = parse_timestamp("2024-01-13T09:20:00.123456").unwrap();
        assert_eq!(fractional.hour(), 9);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45T99:00:00").is_none());
    }
}
