//! Entry point: reads configuration from the environment, wires simulated
//! peripherals to the controller, and runs the sampling loop.
//!
//! The keypad is stdin: type `12450` to submit the default PIN (`0` is the
//! submit key, `*` clears). A background reporter logs the latest snapshot
//! periodically so the history can be watched without a front end.

mod sim;

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::info;
use vigia_control::{Controller, ControllerConfig};
use vigia_core::PinCode;
use vigia_hardware::mock::SystemClock;

use sim::{LoggingActuator, LoggingDisplay, SimulatedSensorBank, StdinKeypad};

/// How often the reporter logs the latest snapshot.
const REPORT_INTERVAL_SECS: u64 = 30;

/// Build the controller configuration from an optional JSON file plus
/// environment overrides.
///
/// `VIGIA_CONFIG` names a JSON file deserialized into [`ControllerConfig`];
/// absent fields keep their defaults. Individual values can then be
/// overridden with `VIGIA_HISTORY_CAPACITY`, `VIGIA_SAMPLE_INTERVAL_MS`,
/// `VIGIA_RAIN_THRESHOLD`, and `VIGIA_PIN`.
fn load_config() -> Result<ControllerConfig> {
    let mut config = match env::var("VIGIA_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        Err(_) => ControllerConfig::default(),
    };

    if let Ok(capacity) = env::var("VIGIA_HISTORY_CAPACITY") {
        config.history_capacity = capacity
            .parse()
            .context("VIGIA_HISTORY_CAPACITY must be an integer")?;
    }
    if let Ok(interval) = env::var("VIGIA_SAMPLE_INTERVAL_MS") {
        config.sample_interval_ms = interval
            .parse()
            .context("VIGIA_SAMPLE_INTERVAL_MS must be an integer")?;
    }
    if let Ok(threshold) = env::var("VIGIA_RAIN_THRESHOLD") {
        config.rain_threshold = threshold
            .parse()
            .context("VIGIA_RAIN_THRESHOLD must be an integer")?;
    }
    if let Ok(pin) = env::var("VIGIA_PIN") {
        config.pin = pin.parse::<PinCode>().context("VIGIA_PIN is not a valid PIN")?;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    info!(version = vigia_core::VERSION, "vigia starting");

    let mut controller = Controller::new(
        config,
        SimulatedSensorBank::new(),
        LoggingActuator,
        LoggingDisplay,
        StdinKeypad::new(),
        SystemClock,
    )?;

    let engine = controller.query_engine();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(REPORT_INTERVAL_SECS));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Some(snapshot) = engine.latest().await {
                let stored = engine.len().await;
                info!(
                    temperature = snapshot.temperature,
                    humidity = snapshot.humidity,
                    gas = snapshot.gas_level,
                    moisture = snapshot.moisture_percent,
                    cover = %snapshot.cover_state,
                    stored,
                    "latest"
                );
            }
        }
    });

    controller.run().await?;
    Ok(())
}
