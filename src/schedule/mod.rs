use chrono_tz::Tz;

use crate::domain::time::format_timestamp;
use crate::domain::*;
use crate::errors::ScheduleError;
use crate::logging::log_rejected_record;

// ==================================================
// PAYLOAD VALIDATION
// ==================================================

/// Parses the endpoint body. A broken envelope is an error; a broken record
/// only drops that record.
pub fn parse_schedule(body: &str) -> Result<ParsedSchedule, ScheduleError> {
    let envelope: ScheduleEnvelope = serde_json::from_str(body)?;
    Ok(validate_records(envelope.data))
}

pub fn validate_records(records: Vec<serde_json::Value>) -> ParsedSchedule {
    let mut parsed = ParsedSchedule::default();

    for (i, value) in records.into_iter().enumerate() {
        match serde_json::from_value::<RawEvent>(value) {
            Ok(ev) => parsed.events.push(ev),
            Err(e) => {
                log_rejected_record(i, &e.to_string());
                parsed.rejected += 1;
            }
        }
    }

    parsed
}

// ==================================================
// STATUS
// ==================================================

/// `now == end_time` and `now == start_time` both count as ongoing; only
/// strictly past the end is finished, only strictly before the start is
/// upcoming.
pub fn event_status(now_ms: i64, start_time: i64, end_time: i64) -> EventStatus {
    if now_ms > end_time {
        EventStatus::Finished
    } else if now_ms < start_time {
        EventStatus::Upcoming
    } else {
        EventStatus::Ongoing
    }
}

// ==================================================
// NORMALIZATION
// ==================================================

pub fn normalize(raw: &[RawEvent], series_name: &str, now_ms: i64, tz: &Tz) -> Vec<DisplayEvent> {
    raw.iter()
        .filter(|ev| ev.name == series_name)
        .map(|ev| DisplayEvent {
            name: ev.name.clone(),
            map: ev.map.clone(),
            start_time: ev.start_time,
            end_time: ev.end_time,
            start_time_formatted: format_timestamp(ev.start_time, tz),
            end_time_formatted: format_timestamp(ev.end_time, tz),
            status: event_status(now_ms, ev.start_time, ev.end_time),
        })
        .collect()
}

/// First event that has not finished yet, in payload order. The endpoint
/// returns its schedule sorted by start time, so this is also the earliest.
pub fn next_event(events: &[DisplayEvent]) -> Option<&DisplayEvent> {
    events.iter().find(|ev| ev.status != EventStatus::Finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_760_000_000_000;

    fn raw(name: &str, map: &str, start: i64, end: i64) -> RawEvent {
        RawEvent {
            name: name.to_string(),
            map: map.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn current_event_is_ongoing() {
        let out = normalize(
            &[raw("Bird City", "Dam", T - 1000, T + 1000)],
            "Bird City",
            T,
            &chrono_tz::UTC,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, EventStatus::Ongoing);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(&[], "Bird City", T, &chrono_tz::UTC).is_empty());
    }

    #[test]
    fn filter_is_exact_and_keeps_order() {
        let input = vec![
            raw("Bird City", "Dam", T + 3000, T + 4000),
            raw("bird city", "Dam", T, T + 1),
            raw("Night Raid", "Spaceport", T, T + 1),
            raw("Bird City", "Buried City", T + 1000, T + 2000),
            raw("Bird City ", "Dam", T, T + 1),
        ];
        let out = normalize(&input, "Bird City", T, &chrono_tz::UTC);
        let maps: Vec<&str> = out.iter().map(|e| e.map.as_str()).collect();
        assert_eq!(maps, vec!["Dam", "Buried City"]);
        // input untouched
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn boundaries_resolve_to_ongoing() {
        assert_eq!(event_status(T, T, T + 10), EventStatus::Ongoing);
        assert_eq!(event_status(T + 10, T, T + 10), EventStatus::Ongoing);
        assert_eq!(event_status(T + 11, T, T + 10), EventStatus::Finished);
        assert_eq!(event_status(T - 1, T, T + 10), EventStatus::Upcoming);
    }

    #[test]
    fn classification_covers_every_now() {
        let (start, end) = (T, T + 5_000);
        for now in (T - 3_000..=T + 8_000).step_by(250) {
            let status = event_status(now, start, end);
            let expected = if now < start {
                EventStatus::Upcoming
            } else if now > end {
                EventStatus::Finished
            } else {
                EventStatus::Ongoing
            };
            assert_eq!(status, expected, "now = {}", now);
        }
    }

    #[test]
    fn formatted_times_are_filled_in() {
        let out = normalize(
            &[raw("Bird City", "Dam", 1_719_837_005_000, 1_719_840_605_000)],
            "Bird City",
            T,
            &chrono_tz::UTC,
        );
        assert_eq!(out[0].start_time_formatted, "01/07/2024, 12:30:05");
        assert_eq!(out[0].end_time_formatted, "01/07/2024, 13:30:05");
        assert_eq!(out[0].status, EventStatus::Finished);
    }

    #[test]
    fn parse_drops_malformed_records() {
        let body = r#"{"data":[
            {"name":"Bird City","map":"Dam","startTime":1,"endTime":2},
            {"name":"Bird City","map":"Dam"},
            {"name":"Bird City","map":"Dam","startTime":"3","endTime":"4"},
            42
        ]}"#;
        let parsed = parse_schedule(body).unwrap();
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.rejected, 2);
        assert_eq!(parsed.events[1].start_time, 3);
    }

    #[test]
    fn parse_rejects_broken_envelope() {
        assert!(matches!(
            parse_schedule("not json"),
            Err(ScheduleError::Parse(_))
        ));
        assert!(matches!(
            parse_schedule(r#"{"events":[]}"#),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn next_event_skips_finished() {
        let out = normalize(
            &[
                raw("Bird City", "Dam", T - 5000, T - 4000),
                raw("Bird City", "Spaceport", T + 1000, T + 2000),
            ],
            "Bird City",
            T,
            &chrono_tz::UTC,
        );
        assert_eq!(next_event(&out).map(|e| e.map.as_str()), Some("Spaceport"));
        assert!(next_event(&out[..1]).is_none());
    }
}
