//! MPC Studio Bridge
//!
//! Pad lighting and full level mode for the Akai MPC Studio, bridged to a
//! virtual MIDI port.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mpc_studio_bridge::config::AppConfig;
use mpc_studio_bridge::midi;
use mpc_studio_bridge::mpc::{MpcDriver, StartupAnimation};
use mpc_studio_bridge::router::Router;

/// MPC Studio Bridge - pad lighting and full level mode for the Akai MPC Studio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (JSON, or YAML by extension)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// List available MIDI ports
    #[arg(long)]
    list_ports: bool,

    /// Skip the startup pad animation
    #[arg(long)]
    no_animation: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.log_json)?;

    info!("Starting MPC Studio Bridge...");

    let mut config = match &args.config {
        Some(path) => {
            info!("Configuration file: {}", path);
            AppConfig::load(path).await?
        }
        None => {
            info!("No configuration file given, using defaults");
            AppConfig::default()
        }
    };

    if args.no_animation {
        config.startup.animation = false;
    }

    if args.list_ports {
        midi::print_ports(&config.midi.client_name, &config.midi.device_port)?;
        return Ok(());
    }

    run_app(config, shutdown_signal()).await?;

    info!("MPC Studio Bridge shutdown complete");
    Ok(())
}

async fn run_app(config: AppConfig, shutdown: impl std::future::Future<Output = ()>) -> Result<()> {
    let mut mpc = MpcDriver::connect(&config.midi)?;

    let mut device_rx = mpc
        .take_event_receiver()
        .ok_or_else(|| anyhow!("Failed to get device event receiver"))?;
    let (device_out, host_out) = mpc
        .take_outputs()
        .ok_or_else(|| anyhow!("Failed to get MIDI outputs"))?;

    let mut router = Router::new(&config, Box::new(device_out), Box::new(host_out))?;
    info!("Router initialized");

    router.clear_pads()?;

    let mut animation = if config.startup.animation {
        Some(StartupAnimation::new(router.palette().resting))
    } else {
        router.restore_lights()?;
        None
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(config.startup.step_delay_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Ready to process MIDI events!");

    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            // Handle device messages, one at a time
            event = device_rx.recv() => {
                let Some(event) = event else {
                    break Err(anyhow!("Device input closed"));
                };
                if let Err(e) = router.on_message(event.timestamp, &event.raw_data) {
                    break Err(e.context("Device or host output failed"));
                }
            }

            // Startup animation, one frame per tick
            _ = ticker.tick(), if animation.is_some() => {
                match animation.as_mut().and_then(Iterator::next) {
                    Some(frame) => {
                        if let Err(e) = router.apply_frame(frame) {
                            break Err(e.context("Startup animation failed"));
                        }
                    }
                    None => {
                        animation = None;
                        if let Err(e) = router.show_full_level() {
                            break Err(e);
                        }
                        info!("Startup animation finished");
                    }
                }
            }

            // Handle shutdown signal
            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping event loop");
                break Ok(());
            }
        }
    };

    info!("Shutting down...");
    if let Err(e) = router.reset_lights() {
        warn!("Failed to reset LEDs: {}", e);
    }
    drop(router);
    mpc.disconnect();

    result
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (text_layer, json_layer) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(false)))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
