use log::debug;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::time::{decompose, now_ms, remaining_ms};
use crate::domain::Dhms;
use crate::tasks::{repeating_interval, TaskHandle};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// A running countdown. It keeps ticking with zeros after the target has
/// passed; only `cancel` (or dropping the handle) stops it.
#[derive(Debug)]
pub struct CountdownHandle {
    task: TaskHandle,
    target_ms: i64,
}

impl CountdownHandle {
    pub fn cancel(&self) {
        self.task.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.task.is_active()
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }
}

// ==================================================
// RUN COUNTDOWN
// ==================================================

pub fn run_countdown<F>(target_ms: i64, on_tick: F, tick_interval: Duration) -> CountdownHandle
where
    F: FnMut(Dhms) + Send + 'static,
{
    run_countdown_with_clock(target_ms, on_tick, tick_interval, now_ms)
}

/// Same as [`run_countdown`] with the wall clock supplied by the caller.
pub fn run_countdown_with_clock<F, C>(
    target_ms: i64,
    mut on_tick: F,
    tick_interval: Duration,
    clock: C,
) -> CountdownHandle
where
    F: FnMut(Dhms) + Send + 'static,
    C: Fn() -> i64 + Send + 'static,
{
    let task = TaskHandle::spawn(async move {
        let mut ticker = repeating_interval(tick_interval);
        loop {
            ticker.tick().await;
            on_tick(decompose(remaining_ms(target_ms, clock())));
        }
    });

    CountdownHandle { task, target_ms }
}

// ==================================================
// SLOTS
// ==================================================

/// Display positions, each bound to at most one running countdown.
#[derive(Debug, Default)]
pub struct CountdownSlots {
    slots: HashMap<String, CountdownHandle>,
}

impl CountdownSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a countdown for `slot`, cancelling whatever was running there.
    pub fn start<F>(
        &mut self,
        slot: &str,
        target_ms: i64,
        on_tick: F,
        tick_interval: Duration,
    ) -> &CountdownHandle
    where
        F: FnMut(Dhms) + Send + 'static,
    {
        self.cancel(slot);
        debug!("⏱ Countdown '{}' → {}", slot, target_ms);

        let handle = run_countdown(target_ms, on_tick, tick_interval);
        self.slots.entry(slot.to_string()).or_insert(handle)
    }

    pub fn cancel(&mut self, slot: &str) -> bool {
        match self.slots.remove(slot) {
            Some(previous) => {
                previous.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.slots.drain() {
            handle.cancel();
        }
    }

    pub fn get(&self, slot: &str) -> Option<&CountdownHandle> {
        self.slots.get(slot)
    }

    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|h| h.is_active()).count()
    }
}
