use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Day-month-year, 24h clock.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
pub const INVALID_TIMESTAMP: &str = "Invalid Date";

/// Remaining time split into whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dhms {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Dhms {
    pub fn is_zero(&self) -> bool {
        *self == Dhms::default()
    }
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn remaining_ms(target_ms: i64, now_ms: i64) -> i64 {
    target_ms.saturating_sub(now_ms)
}

/// Truncating decomposition of a millisecond delta. Non-positive deltas are
/// clamped to zero.
pub fn decompose(delta_ms: i64) -> Dhms {
    if delta_ms <= 0 {
        return Dhms::default();
    }

    let total_seconds = delta_ms / 1000;

    Dhms {
        days: (total_seconds / SECONDS_PER_DAY) as u64,
        hours: ((total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u64,
        minutes: ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u64,
        seconds: (total_seconds % SECONDS_PER_MINUTE) as u64,
    }
}

/// `"2 days 5m"`, `"1 day 3h 7s"`, `"0s"`. Zero units are dropped, seconds
/// are kept when nothing else would be shown.
pub fn format_verbose(d: &Dhms) -> String {
    let mut parts = Vec::with_capacity(4);

    if d.days > 0 {
        let unit = if d.days == 1 { "day" } else { "days" };
        parts.push(format!("{} {}", d.days, unit));
    }
    if d.hours > 0 {
        parts.push(format!("{}h", d.hours));
    }
    if d.minutes > 0 {
        parts.push(format!("{}m", d.minutes));
    }
    if d.seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", d.seconds));
    }

    parts.join(" ")
}

pub fn format_timestamp(ms: i64, tz: &Tz) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => INVALID_TIMESTAMP.to_string(),
    }
}
