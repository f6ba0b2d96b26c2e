use chrono_tz::Tz;
use log::info;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::client::ScheduleClient;
use crate::domain::time::now_ms;
use crate::domain::DisplayEvent;
use crate::errors::ScheduleError;
use crate::logging::{log_refresh, log_resync_failure, log_stale};
use crate::schedule::normalize;
use crate::tasks::{repeating_interval, TaskHandle};

pub const DEFAULT_STALE_AFTER_FAILURES: u32 = 3;

/// Fetch + normalize for one series.
#[derive(Clone)]
pub struct ScheduleMonitor {
    client: ScheduleClient,
    series_name: String,
    tz: Tz,
}

impl ScheduleMonitor {
    pub fn new(client: ScheduleClient, series_name: String, tz: Tz) -> Self {
        Self {
            client,
            series_name,
            tz,
        }
    }

    pub async fn refresh(&self) -> Result<Vec<DisplayEvent>, ScheduleError> {
        let parsed = self.client.fetch_schedule().await?;
        let events = normalize(&parsed.events, &self.series_name, now_ms(), &self.tz);

        log_refresh(&self.series_name, events.len(), parsed.rejected);

        Ok(events)
    }
}

// ==================================================
// RESYNC HEALTH
// ==================================================

/// Consecutive periodic failures. Once the count reaches `stale_after` the
/// displayed data is considered stale until the next success.
#[derive(Debug)]
pub struct ResyncHealth {
    consecutive_failures: AtomicU32,
    stale_after: u32,
}

impl ResyncHealth {
    pub fn new(stale_after: u32) -> Self {
        Self {
            consecutive_failures: AtomicU32::new(0),
            stale_after: stale_after.max(1),
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }

    pub fn is_stale(&self) -> bool {
        self.consecutive_failures() >= self.stale_after
    }

    /// Returns true when this success ended a stale period.
    pub fn record_success(&self) -> bool {
        let was_stale = self.is_stale();
        self.consecutive_failures.store(0, Ordering::SeqCst);
        was_stale
    }

    pub fn record_failure(&self) -> u32 {
        self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn just_went_stale(&self, failures: u32) -> bool {
        failures == self.stale_after
    }
}

impl Default for ResyncHealth {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER_FAILURES)
    }
}

// ==================================================
// RESYNC LOOP
// ==================================================

pub struct ResyncHandle {
    task: TaskHandle,
    health: Arc<ResyncHealth>,
}

impl ResyncHandle {
    pub fn cancel(&self) {
        self.task.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.task.is_active()
    }

    pub fn is_stale(&self) -> bool {
        self.health.is_stale()
    }
}

/// Runs `fetch_and_render` once and waits for it. If that first run fails the
/// error is returned and nothing is scheduled. Otherwise the job is repeated
/// every `interval`; failures from then on are logged and the loop goes on.
pub async fn start_resync<F, Fut, E>(
    mut fetch_and_render: F,
    interval: Duration,
    health: Arc<ResyncHealth>,
) -> Result<ResyncHandle, E>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    fetch_and_render().await?;
    info!("✅ Initial schedule load complete — resync every {:?}", interval);

    let loop_health = health.clone();
    let task = TaskHandle::spawn(async move {
        let mut ticker = repeating_interval(interval);
        loop {
            ticker.tick().await;

            match fetch_and_render().await {
                Ok(()) => {
                    if loop_health.record_success() {
                        info!("🩹 Resync recovered, schedule is fresh again");
                    }
                }
                Err(e) => {
                    let failures = loop_health.record_failure();
                    log_resync_failure(failures, &e.to_string());
                    if loop_health.just_went_stale(failures) {
                        log_stale(failures);
                    }
                }
            }
        }
    });

    Ok(ResyncHandle { task, health })
}
