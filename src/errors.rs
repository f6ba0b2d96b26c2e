use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed schedule payload: {0}")]
    Parse(#[from] serde_json::Error),
}
