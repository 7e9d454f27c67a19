use chrono::NaiveDateTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Coarse relative label, e.g. "3 hours ago". Future times read as "0 seconds ago".
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds().max(0);

    match seconds {
        s if s < MINUTE => format!("{s} seconds ago"),
        s if s < HOUR => format!("{} minutes ago", s / MINUTE),
        s if s < DAY => format!("{} hours ago", s / HOUR),
        s if s < WEEK => format!("{} days ago", s / DAY),
        s => format!("{} weeks ago", s / WEEK),
    }
}
