pub mod config;
pub mod device;
pub mod registry;

pub use config::ConfigError;
pub use device::DeviceError;
pub use registry::RegistryError;

use enocean_api::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),

    #[error("Task error: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}
