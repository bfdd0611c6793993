use serde::{Deserialize, Serialize};

use enocean_api::{Channel, DeviceAddress};

use crate::errors::ConfigError;

pub const DEFAULT_NAME: &str = "EnOcean Switch";

/// One `switches` entry as written in the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchConfig {
    pub id: Vec<i64>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub channel: Option<i64>,
    pub sender_id: Vec<i64>,
}

/// A validated switch definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchSpec {
    pub address: DeviceAddress,
    pub name: String,
    pub channel: Channel,
    pub sender: DeviceAddress,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl SwitchConfig {
    pub fn validate(&self) -> Result<SwitchSpec, ConfigError> {
        let channel = match self.channel {
            None => Channel::ALL,
            // Only single channels may be given explicitly
            Some(value @ 0..=31) => Channel::new(value as u8).ok_or(ConfigError::InvalidChannel(value))?,
            Some(value) => return Err(ConfigError::InvalidChannel(value)),
        };

        Ok(SwitchSpec {
            address: parse_address("id", &self.id)?,
            name: self.name.clone(),
            channel,
            sender: parse_address("sender_id", &self.sender_id)?,
        })
    }
}

fn parse_address(field: &'static str, values: &[i64]) -> Result<DeviceAddress, ConfigError> {
    if values.len() != DeviceAddress::LEN {
        return Err(ConfigError::InvalidAddressLength {
            field,
            len: values.len(),
        });
    }

    let mut bytes = [0u8; DeviceAddress::LEN];
    for (byte, &value) in bytes.iter_mut().zip(values) {
        *byte = u8::try_from(value).map_err(|_| ConfigError::InvalidAddressByte { field, value })?;
    }

    Ok(DeviceAddress::new(bytes))
}
