use bird_city_countdown::*;

use anyhow::Result;
use clap::Parser;
use client::ScheduleClient;
use config::{Args, Config};
use domain::time::now_ms;
use schedule::normalize;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    config.apply_overrides(&args)?;
    config.validate()?;

    let tz = config.time_zone()?;
    let client = ScheduleClient::new(
        config.schedule.api_url.clone(),
        config.schedule.request_timeout(),
    )?;

    println!("🔍 Fetching {}\n", client.api_url);

    let parsed = client.fetch_schedule().await?;
    let events = normalize(&parsed.events, &config.schedule.series_name, now_ms(), &tz);

    println!(
        "📦 {} record(s) received, {} malformed, {} matching '{}'\n",
        parsed.events.len() + parsed.rejected,
        parsed.rejected,
        events.len(),
        config.schedule.series_name
    );
    println!("{}", serde_json::to_string_pretty(&events)?);

    Ok(())
}
