use core::fmt::Debug;

use alloc::vec::Vec;

use embedded_io::{ErrorKind, ErrorType as SyncErrorType, Read as SyncRead, Write as SyncWrite};
use embedded_io_async::{ErrorType as AsyncErrorType, Read as AsyncRead, Write as AsyncWrite};

use super::DEFAULT_BUFFER_SIZE;
use super::error::TransportError;
use super::frame::{FrameHeader, SYNC_BYTE};
use super::packet::Packet;

#[derive(Debug)]
pub struct AsyncPacketTransport<IO> {
    io: IO,
    rx_buffer: Vec<u8>,
}

#[derive(Debug)]
pub struct SyncPacketTransport<IO> {
    io: IO,
    rx_buffer: Vec<u8>,
}

/// What the receive loop does with the bytes at the head of the buffer
enum Framing {
    /// More bytes are needed
    Need(usize),
    /// Garbage before the next sync byte was dropped
    Resync,
    /// A complete frame is buffered
    Frame(FrameHeader),
}

/// A read timeout keeps the buffered bytes, so the caller may simply retry.
fn io_error<E: embedded_io::Error>(e: E) -> TransportError {
    match e.kind() {
        ErrorKind::TimedOut => TransportError::TimedOut,
        _ => TransportError::Io(alloc::format!("{:?}", e)),
    }
}

macro_rules! impl_transport_common {
    ($transport:ident) => {
        impl<IO> $transport<IO> {
            pub fn new(io: IO) -> Self {
                Self {
                    io,
                    rx_buffer: Vec::with_capacity(DEFAULT_BUFFER_SIZE),
                }
            }

            pub fn inner(&self) -> &IO {
                &self.io
            }

            pub fn inner_mut(&mut self) -> &mut IO {
                &mut self.io
            }

            pub fn into_inner(self) -> IO {
                self.io
            }

            pub fn clear_rx_buffer(&mut self) {
                self.rx_buffer.clear();
            }

            pub fn rx_buffer_len(&self) -> usize {
                self.rx_buffer.len()
            }

            /// Inspects the buffer head, dropping bytes that cannot start a frame
            fn framing(&mut self) -> Framing {
                if self.rx_buffer.len() < FrameHeader::SIZE {
                    return Framing::Need(FrameHeader::SIZE);
                }

                match FrameHeader::decode(&self.rx_buffer) {
                    Ok((header, _)) => {
                        if self.rx_buffer.len() < header.total_frame_size() {
                            Framing::Need(header.total_frame_size())
                        } else {
                            Framing::Frame(header)
                        }
                    }
                    Err(_) => {
                        // Skip to the next candidate sync byte
                        match self.rx_buffer[1..].iter().position(|&b| b == SYNC_BYTE) {
                            Some(pos) => {
                                self.rx_buffer.drain(..pos + 1);
                            }
                            None => self.rx_buffer.clear(),
                        }
                        Framing::Resync
                    }
                }
            }

            /// Consumes a buffered frame; the frame is dropped even if it is invalid
            fn take_frame(&mut self, header: FrameHeader) -> Result<Packet, TransportError> {
                let total_frame_size = header.total_frame_size();
                let result = Packet::decode(&self.rx_buffer[..total_frame_size]);
                self.rx_buffer.drain(..total_frame_size);
                result.map(|(packet, _)| packet)
            }
        }
    };
}

impl_transport_common!(AsyncPacketTransport);
impl_transport_common!(SyncPacketTransport);

impl<IO> AsyncPacketTransport<IO>
where
    IO: AsyncWrite + AsyncErrorType,
    IO::Error: Debug,
{
    pub async fn send_packet(&mut self, packet: &Packet) -> Result<(), TransportError> {
        let frame = packet.encode()?;

        self.io
            .write_all(&frame)
            .await
            .map_err(io_error)?;
        self.io
            .flush()
            .await
            .map_err(io_error)?;

        Ok(())
    }
}

impl<IO> AsyncPacketTransport<IO>
where
    IO: AsyncRead + AsyncErrorType,
    IO::Error: Debug,
{
    /// Receives the next frame, resynchronising on line noise.
    ///
    /// A frame with a bad data CRC or unknown packet type is consumed and
    /// reported as an error; the next call continues with the following frame.
    pub async fn receive_packet(&mut self) -> Result<Packet, TransportError> {
        loop {
            match self.framing() {
                Framing::Need(required) => self.ensure_buffer_has_async(required).await?,
                Framing::Resync => continue,
                Framing::Frame(header) => return self.take_frame(header),
            }
        }
    }

    async fn ensure_buffer_has_async(&mut self, required: usize) -> Result<(), TransportError> {
        while self.rx_buffer.len() < required {
            let mut temp_buf = [0u8; 256];
            let n = self
                .io
                .read(&mut temp_buf)
                .await
                .map_err(io_error)?;
            if n == 0 {
                return Err(TransportError::Io("Unexpected EOF".into()));
            }
            self.rx_buffer.extend_from_slice(&temp_buf[..n]);
        }
        Ok(())
    }
}

impl<IO> SyncPacketTransport<IO>
where
    IO: SyncWrite + SyncErrorType,
    IO::Error: Debug,
{
    pub fn send_packet(&mut self, packet: &Packet) -> Result<(), TransportError> {
        let frame = packet.encode()?;

        self.io
            .write_all(&frame)
            .map_err(io_error)?;
        self.io
            .flush()
            .map_err(io_error)?;

        Ok(())
    }
}

impl<IO> SyncPacketTransport<IO>
where
    IO: SyncRead + SyncErrorType,
    IO::Error: Debug,
{
    /// Receives the next frame, resynchronising on line noise.
    pub fn receive_packet(&mut self) -> Result<Packet, TransportError> {
        loop {
            match self.framing() {
                Framing::Need(required) => self.ensure_buffer_has_sync(required)?,
                Framing::Resync => continue,
                Framing::Frame(header) => return self.take_frame(header),
            }
        }
    }

    fn ensure_buffer_has_sync(&mut self, required: usize) -> Result<(), TransportError> {
        while self.rx_buffer.len() < required {
            let mut temp_buf = [0u8; 256];
            let n = self
                .io
                .read(&mut temp_buf)
                .map_err(io_error)?;
            if n == 0 {
                return Err(TransportError::Io("Unexpected EOF".into()));
            }
            self.rx_buffer.extend_from_slice(&temp_buf[..n]);
        }
        Ok(())
    }
}
