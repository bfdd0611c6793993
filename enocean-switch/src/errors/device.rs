use enocean_api::EepError;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Transmit queue closed")]
    QueueClosed,

    #[error("Failed to decode telegram: {0}")]
    DecodeFailed(#[from] EepError),
}
