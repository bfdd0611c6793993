use alloc::vec::Vec;

use crate::telegram::RadioTelegram;

use super::crc::crc8;
use super::error::TransportError;
use super::frame::FrameHeader;
use super::packet_type::PacketType;

/// A complete ESP3 packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub packet_type: PacketType,
    pub data: Vec<u8>,
    pub optional: Vec<u8>,
}

impl Packet {
    pub fn new(packet_type: PacketType, data: Vec<u8>, optional: Vec<u8>) -> Self {
        Self {
            packet_type,
            data,
            optional,
        }
    }

    pub fn from_radio(telegram: &RadioTelegram) -> Self {
        Self::new(
            PacketType::RadioErp1,
            telegram.data().to_vec(),
            telegram.optional().to_vec(),
        )
    }

    /// Interprets an ERP1 packet as a radio telegram
    pub fn to_radio(&self) -> Result<RadioTelegram, TransportError> {
        if self.packet_type != PacketType::RadioErp1 {
            return Err(TransportError::UnexpectedPacketType(self.packet_type as u8));
        }
        Ok(RadioTelegram::new(
            self.data.clone(),
            self.optional.clone(),
        )?)
    }

    pub fn header(&self) -> Result<FrameHeader, TransportError> {
        let data_length = u16::try_from(self.data.len())
            .map_err(|_| TransportError::MessageTooLarge(self.data.len()))?;
        let optional_length = u8::try_from(self.optional.len())
            .map_err(|_| TransportError::MessageTooLarge(self.optional.len()))?;

        Ok(FrameHeader::new(
            self.packet_type,
            data_length,
            optional_length,
        ))
    }

    /// Encodes the full frame: header, data, optional data and data CRC
    pub fn encode(&self) -> Result<Vec<u8>, TransportError> {
        let header = self.header()?;

        let mut frame = Vec::with_capacity(header.total_frame_size());
        frame.extend_from_slice(&header.encode());
        frame.extend_from_slice(&self.data);
        frame.extend_from_slice(&self.optional);
        frame.push(crc8(&frame[FrameHeader::SIZE..]));

        Ok(frame)
    }

    /// Decodes one complete frame, returns (packet, bytes_consumed)
    pub fn decode(frame: &[u8]) -> Result<(Self, usize), TransportError> {
        let (header, header_size) = FrameHeader::decode(frame)?;

        let total_frame_size = header.total_frame_size();
        if frame.len() < total_frame_size {
            return Err(TransportError::Protocol(
                "Insufficient data for frame payload".into(),
            ));
        }

        let data_end = header_size + header.data_length as usize;
        let payload_end = data_end + header.optional_length as usize;

        if crc8(&frame[header_size..payload_end]) != frame[payload_end] {
            return Err(TransportError::CrcMismatch);
        }

        let packet = Self::new(
            header.packet_type()?,
            frame[header_size..data_end].to_vec(),
            frame[data_end..payload_end].to_vec(),
        );

        Ok((packet, total_frame_size))
    }
}
