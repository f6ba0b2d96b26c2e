pub mod event;
pub mod time;

pub use event::{DisplayEvent, EventStatus, RawEvent};
pub use time::Dhms;

use serde::Deserialize;

// ==================================================
// SCHEDULE ENVELOPE
// ==================================================

/// Top-level payload of the schedule endpoint. Records are kept as raw JSON
/// so each one can be validated on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEnvelope {
    pub data: Vec<serde_json::Value>,
}

/// Records that passed validation, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchedule {
    pub events: Vec<RawEvent>,
    pub rejected: usize,
}
