//! Overlay Coordinator - Main Entry Point
//!
//! Replays a JSON-lines capture of `InputEvent`s through the coordinator
//! with logging collaborators.

use anyhow::Context;
use clap::Parser;
use coordinator::{
    init_logging, AppConfig, Collaborators, CoordinatorHandle, CoordinatorTask, EventCoordinator,
    InputEvent,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use telemetry::{LogSink, MqttTelemetrySink, TelemetrySink};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "overlay-coordinator", version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between replayed events (milliseconds)
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,

    /// Event capture, one JSON event per line. Reads stdin when absent.
    events: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging)?;

    info!("=== Overlay Coordinator v{} ===", env!("CARGO_PKG_VERSION"));

    if let Some(addr) = &config.metrics_addr {
        let addr: SocketAddr = addr.parse().context("parsing metrics_addr")?;
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("installing Prometheus exporter")?;
        info!("Metrics exporter listening on {}", addr);
    }

    let telemetry: Box<dyn TelemetrySink> = if config.telemetry.enabled {
        Box::new(MqttTelemetrySink::connect(config.telemetry.clone())?)
    } else {
        info!("Telemetry disabled, reports are logged only");
        Box::new(LogSink::new(config.telemetry.vehicle_id.clone()))
    };

    let coordinator = EventCoordinator::new(config.coordinator.clone());
    let (task, handle) = CoordinatorTask::new(coordinator, Collaborators::logging(telemetry));
    let join = task.spawn();

    let pace = Duration::from_millis(args.pace_ms);
    let replayed = match &args.events {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            replay(BufReader::new(file), &handle, pace).await
        }
        None => replay(BufReader::new(tokio::io::stdin()), &handle, pace).await,
    };

    drop(handle);
    let coordinator = join.await.context("coordinator task failed")?;
    let count = replayed?;
    info!(
        "Replayed {} events, final screen: {}",
        count,
        coordinator.screen()
    );
    Ok(())
}

/// Feed every parseable line to the coordinator. Stops early on Ctrl-C.
async fn replay<R>(reader: R, handle: &CoordinatorHandle, pace: Duration) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut count = 0;
    let mut line_no = 0;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else { break };
        line_no += 1;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<InputEvent>(line) {
            Ok(event) => {
                handle.send(event).await?;
                count += 1;
            }
            Err(e) => warn!("Skipping line {}: {}", line_no, e),
        }

        if !pace.is_zero() {
            tokio::time::sleep(pace).await;
        }
    }

    Ok(count)
}
