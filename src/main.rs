// src/main.rs

mod config;
mod detection;
mod metrics;
mod pipeline;
mod scheduler;
mod sim;
mod types;

use anyhow::Result;
use config::ConfigSource;
use pipeline::{ControlEvent, ControllerStats, JunctionController};
use sim::SimulatedFeed;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use types::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("JUNCTION_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let (config, source) = Config::load_or_default(&config_path)?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("junction_control={}", config.logging.level))
        .init();

    info!("🚦 Junction Control System Starting");
    match source {
        ConfigSource::File => info!("✓ Configuration loaded from {}", config_path),
        ConfigSource::Defaults => warn!("No {} found, using built-in defaults", config_path),
    }
    info!(
        "Junction: {} lanes, min green {:.0}s, cycle every {}ms",
        config.junction.lane_count,
        config.junction.min_green_secs,
        config.junction.cycle_interval_ms
    );

    let stats = ControllerStats::new();
    let controller = JunctionController::new(&config, stats.clone());
    info!("✓ Controller ready");

    let feed = SimulatedFeed::new(&config);
    info!("✓ Simulated detection feed ready (seed {})", config.sim.seed);

    let (events_tx, events_rx) = mpsc::channel(config.events.channel_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let announcer = tokio::spawn(announce_events(events_rx));
    let runner = tokio::spawn(controller.run(feed, events_tx, shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown_tx.send(true).ok();

    let summary = runner.await?;
    announcer.await?;

    info!("\n✓ Controller stopped cleanly");
    info!(
        "  Cycles run: {} ({:.1}/s)",
        summary.cycles, summary.cycles_per_sec
    );
    info!("  Phase changes: {}", summary.phase_changes);
    info!("  Lane summaries announced: {}", summary.summaries_emitted);
    if summary.missing_samples > 0 {
        warn!("  ⚠️  Missing samples: {}", summary.missing_samples);
    } else {
        info!("  Missing samples: 0");
    }
    if summary.rejected_counts > 0 {
        warn!("  ⚠️  Rejected counts: {}", summary.rejected_counts);
    }
    if summary.invalid_dimensions > 0 {
        warn!("  ⚠️  Invalid frame dimensions: {}", summary.invalid_dimensions);
    }
    if summary.events_dropped > 0 {
        warn!("  ⚠️  Events dropped: {}", summary.events_dropped);
    }
    info!("  Elapsed: {:.1}s", summary.elapsed_secs);

    Ok(())
}

/// The announcement side of the junction: turns drained control events
/// into operator-facing log lines. Runs until the event channel closes.
async fn announce_events(mut events_rx: mpsc::Receiver<ControlEvent>) {
    while let Some(event) = events_rx.recv().await {
        if let Ok(payload) = serde_json::to_string(&event) {
            debug!("event payload: {}", payload);
        }
        match &event {
            ControlEvent::PhaseChanged(change) => {
                info!(
                    "🔄 Phase {}: lane {} to red, lane {} to green for {:.0}s",
                    change.phase_seq, change.from_lane, change.to_lane, change.allocated_secs
                );
            }
            ControlEvent::LaneSummary { lane, metrics } => {
                info!(
                    "📢 Lane {} is green: {} vehicle(s) detected, pollution {} (air quality {}), density {}",
                    lane,
                    metrics.vehicle_count,
                    metrics.pollution_level.as_str(),
                    metrics.air_quality,
                    metrics.density.as_str()
                );
                info!(
                    "   🌱 Unused area {:.1} m2, plant {} m2 ({}) for about {} units of reduction",
                    metrics.unused_area_m2,
                    metrics.mitigated_area_m2,
                    metrics.recommended_plants.join(", "),
                    metrics.combined_reduction
                );
            }
        }
    }
}
