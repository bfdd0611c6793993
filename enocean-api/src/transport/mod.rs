//! ESP3 serial framing between a host and an EnOcean transceiver.

pub mod crc;
pub mod error;
pub mod frame;
pub mod io;
pub mod packet;
pub mod packet_type;

pub use crc::{Crc8, crc8};
pub use error::TransportError;
pub use frame::{FrameHeader, SYNC_BYTE};
pub use io::{AsyncPacketTransport, SyncPacketTransport};
pub use packet::Packet;
pub use packet_type::PacketType;

/// Default buffer size for transport operations
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// ESP3 line speed, always 8N1
pub const ESP3_BAUD_RATE: u32 = 57600;


#[cfg(test)]
mod sync_tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    /// Mock IO for sync testing
    #[derive(Debug)]
    struct SyncMockIo {
        read_data: Vec<u8>,
        write_data: Vec<u8>,
        read_pos: usize,
        read_chunk_size: Option<usize>,
        fail_writes: bool,
        stalling: bool,
        stalled: bool,
    }

    impl SyncMockIo {
        fn with_data(data: Vec<u8>) -> Self {
            Self {
                read_data: data,
                write_data: Vec::new(),
                read_pos: 0,
                read_chunk_size: None,
                fail_writes: false,
                stalling: false,
                stalled: false,
            }
        }

        fn with_chunk_size(mut self, chunk_size: usize) -> Self {
            self.read_chunk_size = Some(chunk_size);
            self
        }

        fn failing(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        /// Every other read times out
        fn stalling(mut self) -> Self {
            self.stalling = true;
            self
        }
    }

    impl embedded_io::ErrorType for SyncMockIo {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for SyncMockIo {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.stalling {
                self.stalled = !self.stalled;
                if self.stalled {
                    return Err(embedded_io::ErrorKind::TimedOut);
                }
            }

            let available = self.read_data.len() - self.read_pos;
            if available == 0 {
                return Ok(0);
            }

            let max_read = if let Some(chunk_size) = self.read_chunk_size {
                buf.len().min(chunk_size).min(available)
            } else {
                buf.len().min(available)
            };

            buf[..max_read]
                .copy_from_slice(&self.read_data[self.read_pos..self.read_pos + max_read]);
            self.read_pos += max_read;
            Ok(max_read)
        }
    }

    impl embedded_io::Write for SyncMockIo {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if self.fail_writes {
                return Err(embedded_io::ErrorKind::Other);
            }
            self.write_data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_sync_mixed_packet_types() {
        let packets = vec![
            Packet::new(PacketType::Response, vec![0x00, 0xFF, 0x8F, 0x21, 0x80], vec![0x0A]),
            Packet::new(PacketType::Event, vec![0x02], vec![]),
            Packet::new(
                PacketType::RadioErp1,
                vec![0xA5, 0x00, 0x00, 0x96, 0x0D, 0x01, 0x94, 0xE3, 0xB9, 0x00],
                vec![0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x40, 0x00],
            ),
        ];

        let mut all_data = Vec::new();
        for packet in &packets {
            all_data.extend(packet.encode().unwrap());
        }

        let mock_io = SyncMockIo::with_data(all_data).with_chunk_size(5);
        let mut transport = SyncPacketTransport::new(mock_io);

        for expected in packets {
            assert_eq!(transport.receive_packet().unwrap(), expected);
        }
    }

    #[test]
    fn test_sync_unknown_packet_type_skipped() {
        let mut unknown = Packet::new(PacketType::Event, vec![0x01], vec![])
            .encode()
            .unwrap();
        unknown[4] = 0x42;
        unknown[5] = crc8(&unknown[1..5]);
        let last = unknown.len() - 1;
        unknown[last] = crc8(&unknown[FrameHeader::SIZE..last]);

        let event = Packet::new(PacketType::Event, vec![0x03], vec![]);
        let mut data = unknown;
        data.extend(event.encode().unwrap());

        let mut transport = SyncPacketTransport::new(SyncMockIo::with_data(data));
        assert_eq!(
            transport.receive_packet(),
            Err(TransportError::UnknownPacketType(0x42))
        );
        assert_eq!(transport.receive_packet().unwrap(), event);
    }

    #[test]
    fn test_sync_timeout_keeps_partial_frame() {
        let event = Packet::new(PacketType::Event, vec![0x03], vec![]);
        let mock_io = SyncMockIo::with_data(event.encode().unwrap())
            .with_chunk_size(3)
            .stalling();
        let mut transport = SyncPacketTransport::new(mock_io);

        let mut timeouts = 0;
        let packet = loop {
            match transport.receive_packet() {
                Ok(packet) => break packet,
                Err(TransportError::TimedOut) => timeouts += 1,
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        };

        assert_eq!(packet, event);
        assert!(timeouts > 1);
        assert_eq!(transport.rx_buffer_len(), 0);
    }

    #[test]
    fn test_sync_write_failure() {
        let mut transport = SyncPacketTransport::new(SyncMockIo::with_data(vec![]).failing());
        let packet = Packet::new(PacketType::CommonCommand, vec![0x08], vec![]);

        assert!(matches!(
            transport.send_packet(&packet),
            Err(TransportError::Io(_))
        ));
    }

    #[test]
    fn test_sync_noise_only() {
        let mut transport =
            SyncPacketTransport::new(SyncMockIo::with_data(vec![0x55, 0x55, 0x01, 0x02, 0x03, 0x04, 0x05]));
        assert!(matches!(
            transport.receive_packet(),
            Err(TransportError::Io(_))
        ));
        assert!(transport.rx_buffer_len() < FrameHeader::SIZE);
    }
}
