use super::error::TransportError;

/// ESP3 packet type carried in the frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// ERP1 radio telegram
    RadioErp1 = 0x01,
    /// Response to a command
    Response = 0x02,
    /// Radio sub telegram
    RadioSubTel = 0x03,
    /// Event message
    Event = 0x04,
    /// Common command
    CommonCommand = 0x05,
    /// Smart acknowledge command
    SmartAckCommand = 0x06,
    /// Remote management command
    RemoteManCommand = 0x07,
    /// Radio message
    RadioMessage = 0x09,
    /// ERP2 radio telegram
    RadioErp2 = 0x0A,
}

impl Default for PacketType {
    fn default() -> Self {
        Self::RadioErp1
    }
}

impl PacketType {
    /// Creates packet type from byte value
    pub fn from_u8(value: u8) -> Result<Self, TransportError> {
        match value {
            0x01 => Ok(Self::RadioErp1),
            0x02 => Ok(Self::Response),
            0x03 => Ok(Self::RadioSubTel),
            0x04 => Ok(Self::Event),
            0x05 => Ok(Self::CommonCommand),
            0x06 => Ok(Self::SmartAckCommand),
            0x07 => Ok(Self::RemoteManCommand),
            0x09 => Ok(Self::RadioMessage),
            0x0A => Ok(Self::RadioErp2),
            other => Err(TransportError::UnknownPacketType(other)),
        }
    }

    /// Returns packet type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::RadioErp1 => "radio_erp1",
            Self::Response => "response",
            Self::RadioSubTel => "radio_sub_tel",
            Self::Event => "event",
            Self::CommonCommand => "common_command",
            Self::SmartAckCommand => "smart_ack_command",
            Self::RemoteManCommand => "remote_man_command",
            Self::RadioMessage => "radio_message",
            Self::RadioErp2 => "radio_erp2",
        }
    }
}
