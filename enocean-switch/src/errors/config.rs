#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid {field}: expected 4 bytes, got {len}")]
    InvalidAddressLength { field: &'static str, len: usize },

    #[error("Invalid {field}: byte {value} is out of range 0..=255")]
    InvalidAddressByte { field: &'static str, value: i64 },

    #[error("Invalid channel: {0} (expected 0..=31 or 32)")]
    InvalidChannel(i64),

    #[error("Invalid power threshold: {0}")]
    InvalidPowerThreshold(f64),

    #[error("Invalid channel capacity: {0}")]
    InvalidChannelCapacity(usize),
}
