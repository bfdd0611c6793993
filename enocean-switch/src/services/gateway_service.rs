use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use enocean_api::RadioTelegram;
use enocean_api::transport::{Packet, TransportError};

use crate::device::EnOceanDevice;

/// Routes received telegrams to the devices registered for their sender.
#[derive(Default, Clone)]
pub struct GatewayService {
    devices: HashMap<u64, Vec<Arc<dyn EnOceanDevice>>>,
}

impl GatewayService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, device: Arc<dyn EnOceanDevice>) {
        self.devices
            .entry(device.address().combined())
            .or_default()
            .push(device);
    }

    pub fn device_count(&self) -> usize {
        self.devices.values().map(Vec::len).sum()
    }

    /// Hands a telegram to every device at the sender's address, returns
    /// how many devices received it.
    ///
    /// Decode failures are logged per device and do not stop the others.
    pub fn dispatch(&self, telegram: &RadioTelegram) -> usize {
        let sender = telegram.sender();
        let Some(devices) = self.devices.get(&sender.combined()) else {
            tracing::debug!("Ignoring telegram from unknown sender {}", sender);
            return 0;
        };

        for device in devices {
            if let Err(e) = device.value_changed(telegram) {
                tracing::warn!("Dropping telegram from {}: {}", sender, e);
            }
        }

        devices.len()
    }

    /// Dispatches received packets until the reader hangs up.
    pub async fn run(&self, mut rx: mpsc::Receiver<Packet>) {
        tracing::info!("Gateway listening for {} devices", self.device_count());

        while let Some(packet) = rx.recv().await {
            self.handle_packet(&packet);
        }

        tracing::info!("Gateway reader closed");
    }

    fn handle_packet(&self, packet: &Packet) {
        match packet.to_radio() {
            Ok(telegram) => {
                self.dispatch(&telegram);
            }
            Err(TransportError::UnexpectedPacketType(_)) => {
                tracing::debug!("Ignoring {} packet", packet.packet_type.name());
            }
            Err(e) => tracing::warn!("Discarding radio packet: {}", e),
        }
    }
}
