use bird_city_countdown::*;

use anyhow::Result;
use clap::Parser;
use config::{Args, Config};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

use client::ScheduleClient;
use errors::ScheduleError;
use monitor::{start_resync, ResyncHealth, ScheduleMonitor};
use render::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    info!("🐦 Starting schedule countdown");

    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    config.apply_overrides(&args)?;
    config.validate()?;

    let tz = config.time_zone()?;
    let schedule = config.schedule.clone();

    info!("🎯 Series: {}", schedule.series_name);
    info!("🌐 Endpoint: {}", schedule.api_url);

    // ===============================
    // CORE OBJECTS
    // ===============================
    let client = ScheduleClient::new(schedule.api_url.clone(), schedule.request_timeout())?;
    let monitor = ScheduleMonitor::new(client, schedule.series_name.clone(), tz);

    let health = Arc::new(ResyncHealth::new(schedule.stale_after_failures));
    let renderer = Arc::new(Mutex::new(TerminalRenderer::new(
        schedule.series_name.clone(),
        schedule.tick_interval(),
        health.clone(),
    )));

    // ===============================
    // ONE-SHOT MODE
    // ===============================
    if args.once {
        return match monitor.refresh().await {
            Ok(events) => {
                renderer.lock().await.print_schedule(&events);
                Ok(())
            }
            Err(e) => {
                renderer.lock().await.render_failure();
                Err(anyhow::Error::from(e).context("schedule fetch failed"))
            }
        };
    }

    // ===============================
    // INITIAL LOAD + RESYNC
    // ===============================
    let job = {
        let monitor = monitor.clone();
        let renderer = renderer.clone();

        move || {
            let monitor = monitor.clone();
            let renderer = renderer.clone();

            async move {
                let events = monitor.refresh().await?;
                renderer.lock().await.render(&events);
                Ok::<(), ScheduleError>(())
            }
        }
    };

    let resync = match start_resync(job, schedule.refresh_interval(), health).await {
        Ok(handle) => handle,
        Err(e) => {
            renderer.lock().await.render_failure();
            return Err(anyhow::Error::from(e).context("initial schedule load failed"));
        }
    };

    tokio::signal::ctrl_c().await?;

    println!();
    info!("👋 Shutting down");
    resync.cancel();

    Ok(())
}
