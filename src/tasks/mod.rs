use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Smallest period a repeating task will run with; a zero period would make
/// `tokio::time::interval` panic.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Interval whose first tick is one full period away, like a browser
/// `setInterval`. Late ticks are skipped rather than bursted.
pub fn repeating_interval(period: Duration) -> Interval {
    let period = period.max(MIN_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Owner of a spawned periodic task. Cancelling (or dropping) the handle
/// aborts the task.
#[derive(Debug)]
pub struct TaskHandle {
    task: JoinHandle<()>,
    cancelled: AtomicBool,
}

impl TaskHandle {
    pub fn spawn<F>(fut: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            task: tokio::spawn(fut),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && !self.task.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = TaskHandle::spawn(async move {
            let mut ticker = repeating_interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2_200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = TaskHandle::spawn(async move {
            let mut ticker = repeating_interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        handle.cancel();
        assert!(!handle.is_active());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped() {
        let mut ticker = repeating_interval(Duration::ZERO);
        assert_eq!(ticker.period(), MIN_PERIOD);
        ticker.tick().await;
    }
}
