use std::sync::Arc;

use tokio::sync::mpsc;

use crate::configs::Settings;
use crate::errors::SwitchError;
use crate::registry::JsonFileStore;
use crate::services::{ChannelSink, GatewayService, PlatformService, TransportService};

pub mod configs;
pub mod device;
pub mod errors;
pub mod registry;
pub mod services;
pub mod state;

pub async fn run(settings: &Arc<Settings>) -> Result<(), SwitchError> {
    let (reader, writer) = TransportService::open(&settings.gateway)?;

    tracing::info!(
        "Opened gateway at {} ({} baud)",
        settings.gateway.port_path,
        settings.gateway.baud_rate
    );

    let (sink, telegram_rx) = ChannelSink::new(settings.gateway.channel_capacity);
    let store = Arc::new(JsonFileStore::new(&settings.registry.path));
    let switches = PlatformService::new(store, Arc::new(sink))
        .setup(settings)
        .await?;

    let mut gateway = GatewayService::new();
    for switch in &switches {
        gateway.register(switch.clone());
    }

    let (packet_tx, packet_rx) = mpsc::channel(settings.gateway.channel_capacity);
    let reader = tokio::task::spawn_blocking(move || TransportService::read_loop(reader, packet_tx));
    let writer = tokio::task::spawn_blocking(move || TransportService::write_loop(writer, telegram_rx));
    let gateway = tokio::spawn(async move { gateway.run(packet_rx).await });

    // Initial state comes from the actuators' answers
    tokio::spawn(async move {
        for switch in switches {
            if let Err(e) = switch.query_status().await {
                tracing::warn!("Failed to query {}: {}", switch.entity_id(), e);
            }
        }
    });

    tokio::select! {
        result = reader => result??,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
    }

    // Dropping the devices closes the transmit queue and the packet channel,
    // which stops both blocking loops
    gateway.abort();
    let _ = gateway.await;
    writer.await?;

    Ok(())
}
