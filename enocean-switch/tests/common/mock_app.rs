use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use enocean_api::RadioTelegram;
use enocean_switch::configs::settings::{Gateway, Logger, Power, Registry};
use enocean_switch::configs::{Settings, SwitchConfig};
use enocean_switch::errors::DeviceError;
use enocean_switch::registry::{DOMAIN, EntityEntry, MemoryStore, PLATFORM};
use enocean_switch::services::TelegramSink;

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<RadioTelegram>>,
}

#[async_trait::async_trait]
impl TelegramSink for RecordingSink {
    async fn send(&self, telegram: RadioTelegram) -> Result<(), DeviceError> {
        self.sent.lock().await.push(telegram);
        Ok(())
    }
}

pub struct MockApp {
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
    pub settings: Settings,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    pub fn with_entries(entries: Vec<EntityEntry>) -> Self {
        Self {
            store: Arc::new(MemoryStore::with_entries(entries)),
            sink: Arc::new(RecordingSink::default()),
            settings: Settings {
                logger: Logger {
                    level: String::from("debug"),
                },
                gateway: Gateway {
                    port_path: String::from("/dev/null"),
                    baud_rate: 57600,
                    channel_capacity: 8,
                },
                registry: Registry {
                    path: String::from("registry.json"),
                },
                power: Power::default(),
                switches: Vec::new(),
            },
        }
    }

    pub fn with_switch(mut self, id: [i64; 4], channel: Option<i64>) -> Self {
        self.settings.switches.push(SwitchConfig {
            id: id.to_vec(),
            name: String::from("Test Switch"),
            channel,
            sender_id: vec![0xFF, 0x8F, 0x21, 0x80],
        });
        self
    }

    pub async fn sent(&self) -> Vec<RadioTelegram> {
        self.sink.sent.lock().await.clone()
    }
}

pub fn create_test_entry(entity_id: &str, unique_id: &str) -> EntityEntry {
    EntityEntry {
        id: Uuid::new_v4(),
        entity_id: entity_id.to_string(),
        domain: DOMAIN.to_string(),
        platform: PLATFORM.to_string(),
        unique_id: unique_id.to_string(),
        name: String::from("Test Switch"),
        modified_at: OffsetDateTime::now_utc(),
    }
}

/// Status response telegram: `D2 04 <io> <output> <sender> 00`
pub fn status_telegram(sender: [u8; 4], io: u8, output: u8) -> RadioTelegram {
    let mut data = vec![0xD2, 0x04, io, output];
    data.extend_from_slice(&sender);
    data.push(0x00);
    RadioTelegram::new(data, vec![0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x4D, 0x00]).unwrap()
}

/// A5-12-01 power telegram with the given meter reading and divisor
pub fn power_telegram(sender: [u8; 4], meter_reading: u32, divisor: u8) -> RadioTelegram {
    let mr = meter_reading.to_be_bytes();
    // TI 0, LRN 1 (data), DT 1 (power)
    let db0 = 0x08 | 0x04 | (divisor & 0x03);
    let mut data = vec![0xA5, mr[1], mr[2], mr[3], db0];
    data.extend_from_slice(&sender);
    data.push(0x00);
    RadioTelegram::new(data, vec![]).unwrap()
}
