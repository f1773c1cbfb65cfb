//! Meeting-time parsing
//!
//! Meeting strings look like `MoWeFr 9:00am - 9:50am`: a run of two-letter day
//! codes, a space, then a 12-hour start and end time separated by ` - `.

use chrono::NaiveTime;

/// Marker used upstream for sections without a scheduled time
pub const TBA: &str = "TBA";

const DAY_CODES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Weekly schedule density derived from a meeting-time string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingLoad {
    pub days_per_week: u32,
    pub minutes_per_week: i64,
}

/// Parses a meeting-time string
///
/// Returns `None` for `TBA` and for strings that do not follow the
/// `<days> <start> - <end>` shape.
///
/// Day codes are counted as they appear, so a repeated code counts twice. An
/// end time earlier than the start time is taken to fall on the next day.
///
/// # Example
///
/// ```
/// use catalog_crawl::normalize::parse_meeting_time;
///
/// let load = parse_meeting_time("MoWeFr 9:00am - 9:50am").unwrap();
/// assert_eq!(load.days_per_week, 3);
/// assert_eq!(load.minutes_per_week, 150);
/// ```
pub fn parse_meeting_time(meeting_time: &str) -> Option<MeetingLoad> {
    if meeting_time == TBA {
        return None;
    }

    let (days, range) = meeting_time.split_once(' ')?;
    let (start, end) = range.split_once(" - ")?;

    let start = parse_clock(start)?;
    let end = parse_clock(end)?;

    let days_per_week = count_days(days);
    let duration = (end - start).num_minutes().rem_euclid(MINUTES_PER_DAY);

    Some(MeetingLoad {
        days_per_week,
        minutes_per_week: duration * i64::from(days_per_week),
    })
}

fn count_days(days: &str) -> u32 {
    DAY_CODES
        .iter()
        .map(|code| days.matches(code).count() as u32)
        .sum()
}

fn parse_clock(clock: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(clock.trim(), "%I:%M%p").ok()
}
