use alloc::vec::Vec;

use super::crc::crc8;
use super::error::TransportError;
use super::packet_type::PacketType;

/// First byte of every ESP3 frame
pub const SYNC_BYTE: u8 = 0x55;

/// ESP3 frame header: `sync | data length (2) | optional length | packet type | CRC8H`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub data_length: u16,
    pub optional_length: u8,
    pub packet_type: u8,
}

impl FrameHeader {
    /// Header size including the sync byte and header CRC
    pub const SIZE: usize = 6;

    pub fn new(packet_type: PacketType, data_length: u16, optional_length: u8) -> Self {
        Self {
            data_length,
            optional_length,
            packet_type: packet_type as u8,
        }
    }

    /// Encodes header to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Self::SIZE);

        buffer.push(SYNC_BYTE);
        buffer.extend_from_slice(&self.data_length.to_be_bytes());
        buffer.push(self.optional_length);
        buffer.push(self.packet_type);
        buffer.push(crc8(&buffer[1..5]));

        buffer
    }

    /// Decodes header from bytes, returns (header, bytes_consumed)
    pub fn decode(data: &[u8]) -> Result<(Self, usize), TransportError> {
        if data.len() < Self::SIZE {
            return Err(TransportError::Protocol(
                "Insufficient data for frame header".into(),
            ));
        }

        if data[0] != SYNC_BYTE {
            return Err(TransportError::SyncLost);
        }

        if crc8(&data[1..5]) != data[5] {
            return Err(TransportError::HeaderCrcMismatch);
        }

        Ok((
            Self {
                data_length: u16::from_be_bytes([data[1], data[2]]),
                optional_length: data[3],
                packet_type: data[4],
            },
            Self::SIZE,
        ))
    }

    pub fn packet_type(&self) -> Result<PacketType, TransportError> {
        PacketType::from_u8(self.packet_type)
    }

    /// Returns payload size: data plus optional data
    pub fn payload_size(&self) -> usize {
        self.data_length as usize + self.optional_length as usize
    }

    /// Returns total frame size including header, payload and data CRC
    pub fn total_frame_size(&self) -> usize {
        Self::SIZE + self.payload_size() + 1
    }
}
