use core::fmt;

use alloc::string::String;

use crate::eep::EepError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// I/O operation failed
    Io(String),
    /// Read or write timed out, buffered bytes are kept
    TimedOut,
    /// First byte of a frame is not the sync byte
    SyncLost,
    /// Header checksum validation failed
    HeaderCrcMismatch,
    /// Data checksum validation failed
    CrcMismatch,
    /// Unknown ESP3 packet type
    UnknownPacketType(u8),
    /// Packet type other than the one the caller can handle
    UnexpectedPacketType(u8),
    /// Packet exceeds ESP3 length fields
    MessageTooLarge(usize),
    /// Protocol format violation
    Protocol(String),
    /// Radio payload is not a valid telegram
    Telegram(EepError),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::TimedOut => write!(f, "IO timed out"),
            Self::SyncLost => write!(f, "Sync byte not found"),
            Self::HeaderCrcMismatch => write!(f, "Header CRC mismatch"),
            Self::CrcMismatch => write!(f, "CRC checksum mismatch"),
            Self::UnknownPacketType(t) => write!(f, "Unknown packet type: {}", t),
            Self::UnexpectedPacketType(t) => write!(f, "Unexpected packet type: {}", t),
            Self::MessageTooLarge(size) => write!(f, "Message too large: {} bytes", size),
            Self::Protocol(e) => write!(f, "Protocol error: {}", e),
            Self::Telegram(e) => write!(f, "Telegram error: {}", e),
        }
    }
}

impl From<EepError> for TransportError {
    fn from(error: EepError) -> Self {
        Self::Telegram(error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

pub type Result<T> = core::result::Result<T, TransportError>;
