use colored::Colorize;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::countdown::CountdownSlots;
use crate::domain::time::{decompose, format_verbose, now_ms, remaining_ms};
use crate::domain::{Dhms, DisplayEvent, EventStatus};
use crate::monitor::ResyncHealth;
use crate::schedule::next_event;

pub const NEXT_EVENT_SLOT: &str = "next-event-countdown";
pub const NO_UPCOMING_EVENTS: &str = "No upcoming events";
pub const LOAD_FAILED: &str = "Failed to load schedule";

/* ===============================
PLAIN TEXT LINES
=============================== */

pub fn status_label(status: EventStatus) -> String {
    status.label().to_uppercase()
}

pub fn schedule_line(ev: &DisplayEvent) -> String {
    format!(
        "{:<9} {:<20} {} → {}",
        status_label(ev.status),
        ev.map,
        ev.start_time_formatted,
        ev.end_time_formatted
    )
}

pub fn countdown_line(ev: &DisplayEvent, remaining: &Dhms, stale: bool) -> String {
    let verb = match ev.status {
        EventStatus::Ongoing => "ends in",
        EventStatus::Upcoming | EventStatus::Finished => "starts in",
    };
    let mut line = format!(
        "⏳ {} · {} · {} {}",
        status_label(ev.status),
        ev.map,
        verb,
        format_verbose(remaining)
    );
    if stale {
        line.push_str(" (stale)");
    }
    line
}

fn colorize_status(line: String, status: EventStatus) -> String {
    match status {
        EventStatus::Upcoming => line.yellow().to_string(),
        EventStatus::Ongoing => line.green().bold().to_string(),
        EventStatus::Finished => line.dimmed().to_string(),
    }
}

/* ===============================
TERMINAL RENDERER
=============================== */

/// Prints the schedule and keeps one live countdown line for the next
/// event.
pub struct TerminalRenderer {
    series_name: String,
    tick_interval: Duration,
    health: Arc<ResyncHealth>,
    slots: CountdownSlots,
}

impl TerminalRenderer {
    pub fn new(series_name: String, tick_interval: Duration, health: Arc<ResyncHealth>) -> Self {
        Self {
            series_name,
            tick_interval,
            health,
            slots: CountdownSlots::new(),
        }
    }

    pub fn print_schedule(&self, events: &[DisplayEvent]) {
        println!();
        println!(
            "{}",
            format!("📅 {} — {} event(s)", self.series_name, events.len()).bold()
        );
        for ev in events {
            println!("   {}", colorize_status(schedule_line(ev), ev.status));
        }
    }

    pub fn render(&mut self, events: &[DisplayEvent]) {
        self.print_schedule(events);

        let Some(next) = next_event(events).cloned() else {
            self.slots.cancel(NEXT_EVENT_SLOT);
            println!("{}", NO_UPCOMING_EVENTS);
            return;
        };

        let target = next.countdown_target();
        let first = decompose(remaining_ms(target, now_ms()));
        print_countdown(&countdown_line(&next, &first, self.health.is_stale()));

        let health = self.health.clone();
        self.slots.start(
            NEXT_EVENT_SLOT,
            target,
            move |d| print_countdown(&countdown_line(&next, &d, health.is_stale())),
            self.tick_interval,
        );
    }

    pub fn render_failure(&mut self) {
        self.slots.cancel_all();
        eprintln!("{}", LOAD_FAILED.red().bold());
    }

    pub fn active_countdowns(&self) -> usize {
        self.slots.active_count()
    }

    pub fn countdown_target(&self) -> Option<i64> {
        self.slots.get(NEXT_EVENT_SLOT).map(|h| h.target_ms())
    }
}

fn print_countdown(line: &str) {
    print!("\r\x1B[2K{}", line);
    let _ = io::stdout().flush();
}
