use std::sync::Arc;

use tokio::sync::watch;

use enocean_api::{
    Channel, DeviceAddress, Interpreter, RadioTelegram, SwitchCommand, encode_status_query,
    encode_switch_command,
};

use crate::configs::SwitchSpec;
use crate::errors::DeviceError;
use crate::services::transport_service::TelegramSink;
use crate::state::{StateCell, SwitchState};

/// Something on the radio link that sends telegrams and reacts to telegrams
/// sent by its address.
#[async_trait::async_trait]
pub trait EnOceanDevice: Send + Sync {
    /// Address whose telegrams are routed to this device
    fn address(&self) -> DeviceAddress;

    async fn send_telegram(&self, telegram: RadioTelegram) -> Result<(), DeviceError>;

    /// Handles a telegram received from [`EnOceanDevice::address`]
    fn value_changed(&self, telegram: &RadioTelegram) -> Result<(), DeviceError>;
}

/// An on/off entity.
#[async_trait::async_trait]
pub trait SwitchEntity: Send + Sync {
    fn unique_id(&self) -> &str;

    fn name(&self) -> &str;

    fn is_on(&self) -> bool;

    async fn turn_on(&self) -> Result<(), DeviceError>;

    async fn turn_off(&self) -> Result<(), DeviceError>;
}

/// Radio side of a device: its address and where outbound telegrams go.
#[derive(Clone)]
pub struct DeviceLink {
    address: DeviceAddress,
    sink: Arc<dyn TelegramSink>,
}

impl DeviceLink {
    pub fn new(address: DeviceAddress, sink: Arc<dyn TelegramSink>) -> Self {
        Self { address, sink }
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    pub async fn send(&self, telegram: RadioTelegram) -> Result<(), DeviceError> {
        self.sink.send(telegram).await
    }
}

pub struct EnOceanSwitch {
    link: DeviceLink,
    sender: DeviceAddress,
    channel: Channel,
    name: String,
    unique_id: String,
    entity_id: String,
    interpreter: Interpreter,
    state: StateCell,
}

impl EnOceanSwitch {
    pub fn new(
        spec: &SwitchSpec,
        entity_id: impl Into<String>,
        interpreter: Interpreter,
        sink: Arc<dyn TelegramSink>,
    ) -> Self {
        Self {
            link: DeviceLink::new(spec.address, sink),
            sender: spec.sender,
            channel: spec.channel,
            name: spec.name.clone(),
            unique_id: crate::registry::unique_id(&spec.address, spec.channel),
            entity_id: entity_id.into(),
            interpreter,
            state: StateCell::new(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn sender(&self) -> DeviceAddress {
        self.sender
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn state(&self) -> SwitchState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<SwitchState> {
        self.state.subscribe()
    }

    /// Asks the actuator to report the configured channel.
    pub async fn query_status(&self) -> Result<(), DeviceError> {
        let telegram = encode_status_query(self.link.address(), self.sender, self.channel);
        self.send_telegram(telegram).await
    }

    async fn switch(&self, desired_on: bool) -> Result<(), DeviceError> {
        let command = SwitchCommand::new(self.link.address(), self.sender, self.channel, desired_on);
        tracing::debug!(
            "Switching {} channel {} {}",
            self.entity_id,
            self.channel,
            if desired_on { "on" } else { "off" }
        );

        // State follows the actuator's confirmation
        self.send_telegram(encode_switch_command(&command)).await
    }
}

#[async_trait::async_trait]
impl EnOceanDevice for EnOceanSwitch {
    fn address(&self) -> DeviceAddress {
        self.link.address()
    }

    async fn send_telegram(&self, telegram: RadioTelegram) -> Result<(), DeviceError> {
        self.link.send(telegram).await
    }

    fn value_changed(&self, telegram: &RadioTelegram) -> Result<(), DeviceError> {
        if let Some(update) = self.interpreter.decode(telegram, self.channel)? {
            tracing::debug!(
                "{} is now {}",
                self.entity_id,
                if update.is_on { "on" } else { "off" }
            );
            self.state.apply(update);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SwitchEntity for EnOceanSwitch {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_on(&self) -> bool {
        self.state.is_on()
    }

    async fn turn_on(&self) -> Result<(), DeviceError> {
        self.switch(true).await
    }

    async fn turn_off(&self) -> Result<(), DeviceError> {
        self.switch(false).await
    }
}
