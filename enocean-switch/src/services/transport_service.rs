use std::fmt::Debug;
use std::time::Duration;

use embedded_io::{ErrorType, Read, Write};
use embedded_io_adapters::std::FromStd;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tokio::sync::mpsc;

use enocean_api::RadioTelegram;
use enocean_api::transport::{Packet, SyncPacketTransport, TransportError};

use crate::configs::Gateway;
use crate::errors::{DeviceError, SwitchError};

/// How long a read blocks before the reader looks for shutdown
const READ_TIMEOUT: Duration = Duration::from_millis(100);

pub type SerialTransport = SyncPacketTransport<FromStd<Box<dyn SerialPort>>>;

/// Accepts outbound telegrams; delivery to the radio is not reported back.
#[async_trait::async_trait]
pub trait TelegramSink: Send + Sync {
    async fn send(&self, telegram: RadioTelegram) -> Result<(), DeviceError>;
}

/// Queues telegrams for the single gateway writer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<RadioTelegram>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<RadioTelegram>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl TelegramSink for ChannelSink {
    async fn send(&self, telegram: RadioTelegram) -> Result<(), DeviceError> {
        self.tx
            .send(telegram)
            .await
            .map_err(|_| DeviceError::QueueClosed)
    }
}

/// Blocking side of the gateway link. The loops run on
/// `tokio::task::spawn_blocking` threads.
pub struct TransportService;

impl TransportService {
    /// Opens the gateway port raw at 8N1 and returns a reader and a writer
    /// over the same device.
    pub fn open(gateway: &Gateway) -> Result<(SerialTransport, SerialTransport), SwitchError> {
        tracing::debug!(
            "Connect to port: {} at {} baud",
            gateway.port_path,
            gateway.baud_rate
        );

        let port = serialport::new(&gateway.port_path, gateway.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()?;
        let writer = port.try_clone()?;

        Ok((
            SyncPacketTransport::new(FromStd::new(port)),
            SyncPacketTransport::new(FromStd::new(writer)),
        ))
    }

    /// Forwards received packets until the gateway connection fails or the
    /// packet receiver is dropped.
    ///
    /// Bad frames are logged and skipped.
    pub fn read_loop<IO>(
        mut transport: SyncPacketTransport<IO>,
        tx: mpsc::Sender<Packet>,
    ) -> Result<(), TransportError>
    where
        IO: Read + ErrorType,
        IO::Error: Debug,
    {
        loop {
            match transport.receive_packet() {
                Ok(packet) => {
                    if tx.blocking_send(packet).is_err() {
                        break;
                    }
                }
                Err(TransportError::TimedOut) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(e @ TransportError::Io(_)) => return Err(e),
                Err(e) => tracing::warn!("Discarding frame: {}", e),
            }
        }

        tracing::info!("Packet receiver closed, reader stopped");
        Ok(())
    }

    /// Writes queued telegrams to the gateway until every sink is dropped,
    /// then hands the transport back.
    pub fn write_loop<IO>(
        mut transport: SyncPacketTransport<IO>,
        mut rx: mpsc::Receiver<RadioTelegram>,
    ) -> SyncPacketTransport<IO>
    where
        IO: Write + ErrorType,
        IO::Error: Debug,
    {
        while let Some(telegram) = rx.blocking_recv() {
            let packet = Packet::from_radio(&telegram);
            match transport.send_packet(&packet) {
                Ok(()) => tracing::debug!(
                    "Sent telegram to {} from {}",
                    telegram.destination(),
                    telegram.sender()
                ),
                Err(e) => tracing::warn!("Failed to send telegram: {}", e),
            }
        }

        tracing::info!("Transmit queue closed, writer stopped");
        transport
    }
}
