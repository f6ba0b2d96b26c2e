use serde::{Deserialize, Serialize};
use std::fmt;

/* ===============================
RAW SCHEDULE RECORD
=============================== */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub name: String,
    pub map: String,
    #[serde(rename = "startTime", deserialize_with = "deserialize_epoch_ms")]
    pub start_time: i64,
    #[serde(rename = "endTime", deserialize_with = "deserialize_epoch_ms")]
    pub end_time: i64,
}

// Timestamps arrive as JSON numbers, occasionally as numeric strings.
fn deserialize_epoch_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Int(i64),
        Float(f64),
        String(String),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::Int(v) => Ok(v),
        StringOrInt::Float(f) if f >= i64::MAX as f64 || f < i64::MIN as f64 => {
            Err(serde::de::Error::custom(format!(
                "timestamp out of range: {}",
                f
            )))
        }
        StringOrInt::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        StringOrInt::Float(f) => Err(serde::de::Error::custom(format!(
            "timestamp is not a whole number of milliseconds: {}",
            f
        ))),
        StringOrInt::String(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

/* ===============================
EVENT STATUS
=============================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Finished,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Finished => "Finished",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/* ===============================
DISPLAY RECORD
=============================== */

/// A schedule entry ready to be shown. `status` is a snapshot taken when the
/// record was built and is not kept up to date afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEvent {
    pub name: String,
    pub map: String,
    pub start_time: i64,
    pub end_time: i64,
    pub start_time_formatted: String,
    pub end_time_formatted: String,
    pub status: EventStatus,
}

impl DisplayEvent {
    /// Timestamp the countdown for this event should run towards.
    pub fn countdown_target(&self) -> i64 {
        match self.status {
            EventStatus::Ongoing => self.end_time,
            EventStatus::Upcoming | EventStatus::Finished => self.start_time,
        }
    }
}
