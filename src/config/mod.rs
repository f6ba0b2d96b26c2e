use anyhow::{bail, Context};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::countdown::DEFAULT_TICK_INTERVAL;
use crate::monitor::DEFAULT_STALE_AFTER_FAILURES;

/* =======================
CLI ARGS
======================= */

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Event series to show (overrides the config file)
    #[arg(short, long)]
    pub series: Option<String>,

    /// Fetch and print the schedule once, then exit
    #[arg(long)]
    pub once: bool,
}

/* =======================
MAIN CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub schedule: ScheduleConfig,
    pub display: DisplayConfig,
}

/* =======================
SCHEDULE CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub api_url: String,
    pub series_name: String,

    pub refresh_interval_ms: u64,
    pub tick_interval_ms: u64,
    pub request_timeout_ms: u64,

    // consecutive periodic failures before the display is flagged stale
    pub stale_after_failures: u32,
}

/* =======================
DISPLAY CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA zone used for formatted timestamps
    pub time_zone: String,
}

/* =======================
DEFAULT CONFIG
======================= */

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig {
                api_url: "https://metaforge-api.toby-d-parsons.workers.dev/events-schedule"
                    .to_string(),
                series_name: "Bird City".to_string(),
                refresh_interval_ms: 3_000,
                tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
                request_timeout_ms: 10_000,
                stale_after_failures: DEFAULT_STALE_AFTER_FAILURES,
            },
            display: DisplayConfig {
                time_zone: "Europe/London".to_string(),
            },
        }
    }
}

/* =======================
LOAD / CREATE CONFIG
======================= */

impl Config {
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?)
        } else {
            let cfg = Config::default();
            let content = serde_json::to_string_pretty(&cfg)?;
            std::fs::write(path, content)?;
            Ok(cfg)
        }
    }

    /// Env vars win over the file, `--series` wins over both.
    pub fn apply_overrides(&mut self, args: &Args) -> anyhow::Result<()> {
        if let Ok(v) = env::var("SCHEDULE_API_URL") {
            self.schedule.api_url = v;
        }
        if let Ok(v) = env::var("SERIES_NAME") {
            self.schedule.series_name = v;
        }
        if let Some(v) = env_u64("REFRESH_INTERVAL_MS")? {
            self.schedule.refresh_interval_ms = v;
        }
        if let Some(v) = env_u64("TICK_INTERVAL_MS")? {
            self.schedule.tick_interval_ms = v;
        }
        if let Ok(v) = env::var("DISPLAY_TIME_ZONE") {
            self.display.time_zone = v;
        }
        if let Some(series) = &args.series {
            self.schedule.series_name = series.clone();
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.schedule.series_name.trim().is_empty() {
            bail!("schedule.series_name must not be empty");
        }
        Url::parse(&self.schedule.api_url)
            .with_context(|| format!("invalid schedule.api_url '{}'", self.schedule.api_url))?;
        if self.schedule.refresh_interval_ms == 0 {
            bail!("schedule.refresh_interval_ms must be greater than zero");
        }
        if self.schedule.tick_interval_ms == 0 {
            bail!("schedule.tick_interval_ms must be greater than zero");
        }
        if self.schedule.request_timeout_ms == 0 {
            bail!("schedule.request_timeout_ms must be greater than zero");
        }
        self.time_zone()?;
        Ok(())
    }

    pub fn time_zone(&self) -> anyhow::Result<Tz> {
        self.display
            .time_zone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid display.time_zone: {}", e))
    }
}

// ==================================================
// DURATION HELPERS
// ==================================================

impl ScheduleConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn env_u64(key: &str) -> anyhow::Result<Option<u64>> {
    match env::var(key) {
        Ok(raw) => parse_u64_override(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_u64_override(key: &str, raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("invalid {} '{}'", key, raw))
}
