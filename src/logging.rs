use log::{error, info, warn};

pub fn log_refresh(series: &str, shown: usize, rejected: usize) {
    if rejected > 0 {
        warn!(
            "🔄 Schedule refreshed — {} '{}' event(s), {} malformed record(s) dropped",
            shown, series, rejected
        );
    } else {
        info!("🔄 Schedule refreshed — {} '{}' event(s)", shown, series);
    }
}

pub fn log_rejected_record(index: usize, reason: &str) {
    warn!("⚠️ Dropping schedule record #{}: {}", index, reason);
}

pub fn log_resync_failure(consecutive: u32, reason: &str) {
    warn!("🔁 Resync failed ({} in a row) — {}", consecutive, reason);
}

pub fn log_stale(consecutive: u32) {
    error!(
        "🕸️ Schedule is stale — {} consecutive resync failures, showing last good data",
        consecutive
    );
}
