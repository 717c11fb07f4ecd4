//! Telemetry sinks

use rumqttc::{AsyncClient, Event, MqttOptions, QoS};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::{TelemetryConfig, TelemetryEnvelope, TelemetryError, TelemetryReport};

/// Outbound telemetry. `send` must not block the caller.
pub trait TelemetrySink: Send + Sync {
    fn send(&self, report: TelemetryReport);
}

/// Sink that only logs the envelope
#[derive(Debug, Clone)]
pub struct LogSink {
    vehicle_id: String,
}

impl LogSink {
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
        }
    }
}

impl TelemetrySink for LogSink {
    fn send(&self, report: TelemetryReport) {
        let envelope = TelemetryEnvelope::new(&self.vehicle_id, &report);
        match serde_json::to_string(&envelope) {
            Ok(json) => info!(class = envelope.class.as_str(), "Telemetry: {}", json),
            Err(e) => warn!("Telemetry report not serializable: {}", e),
        }
    }
}

/// MQTT publisher
pub struct MqttTelemetrySink {
    config: TelemetryConfig,
    client: AsyncClient,
    failed: AtomicU64,
}

impl MqttTelemetrySink {
    /// Connect to the broker. Must run inside a tokio runtime; the MQTT
    /// event loop is driven by a spawned task.
    pub fn connect(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        if config.broker_host.is_empty() {
            return Err(TelemetryError::Connection("empty broker host".to_string()));
        }

        let mut options = MqttOptions::new(
            format!("vehicle-{}", config.vehicle_id),
            &config.broker_host,
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs.max(5)));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(incoming)) => {
                        debug!("MQTT incoming: {:?}", incoming);
                    }
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    _ => {}
                }
            }
        });

        info!(
            "Connected to MQTT broker: {}:{}",
            config.broker_host, config.broker_port
        );
        Ok(Self::with_client(config, client))
    }

    fn with_client(config: TelemetryConfig, client: AsyncClient) -> Self {
        Self {
            config,
            client,
            failed: AtomicU64::new(0),
        }
    }

    fn publish(&self, report: &TelemetryReport) -> Result<(), TelemetryError> {
        let envelope = TelemetryEnvelope::new(&self.config.vehicle_id, report);
        let payload = envelope.to_bytes()?;
        let topic = self.config.topic(report.class());

        self.client
            .try_publish(topic, QoS::AtLeastOnce, false, payload)
            .map_err(|e| TelemetryError::Publish(e.to_string()))
    }

    /// Reports dropped since startup
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

impl TelemetrySink for MqttTelemetrySink {
    fn send(&self, report: TelemetryReport) {
        if let Err(e) = self.publish(&report) {
            self.failed.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("overlay_telemetry_failed_total").increment(1);
            warn!("Dropping {} report: {}", report.class(), e);
        }
    }
}

impl Drop for MqttTelemetrySink {
    fn drop(&mut self) {
        let failed = self.failed_count();
        if failed > 0 {
            warn!("Telemetry sink closed, {} reports were dropped", failed);
        }
    }
}
