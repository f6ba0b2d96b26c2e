use bird_city_countdown::countdown::CountdownSlots;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn counter() -> (Arc<AtomicUsize>, impl FnMut(bird_city_countdown::domain::Dhms) + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    (count, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn restarting_a_slot_leaves_one_task() {
    let mut slots = CountdownSlots::new();

    let (first, on_first) = counter();
    let (second, on_second) = counter();
    let (third, on_third) = counter();

    slots.start("next-event-countdown", 0, on_first, Duration::from_secs(1));
    slots.start("next-event-countdown", 0, on_second, Duration::from_secs(1));
    slots.start("next-event-countdown", 0, on_third, Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(third.load(Ordering::SeqCst), 3);
    assert_eq!(slots.active_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn restart_after_ticking_stops_the_old_task() {
    let mut slots = CountdownSlots::new();
    let (old, on_old) = counter();
    let (new, on_new) = counter();

    slots.start("next-event-countdown", 0, on_old, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(old.load(Ordering::SeqCst), 2);

    slots.start("next-event-countdown", 5_000, on_new, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(4_200)).await;

    assert_eq!(old.load(Ordering::SeqCst), 2);
    assert_eq!(new.load(Ordering::SeqCst), 4);
    assert_eq!(
        slots.get("next-event-countdown").map(|h| h.target_ms()),
        Some(5_000)
    );
}

#[tokio::test(start_paused = true)]
async fn separate_slots_tick_independently() {
    let mut slots = CountdownSlots::new();
    let (a, on_a) = counter();
    let (b, on_b) = counter();

    slots.start("slot-a", 0, on_a, Duration::from_secs(1));
    slots.start("slot-b", 0, on_b, Duration::from_millis(500));

    tokio::time::sleep(Duration::from_millis(2_250)).await;

    assert_eq!(a.load(Ordering::SeqCst), 2);
    assert_eq!(b.load(Ordering::SeqCst), 4);
    assert_eq!(slots.active_count(), 2);

    slots.cancel_all();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(a.load(Ordering::SeqCst), 2);
    assert_eq!(b.load(Ordering::SeqCst), 4);
    assert_eq!(slots.active_count(), 0);
}
