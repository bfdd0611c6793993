pub mod gateway_service;
pub mod platform_service;
pub mod transport_service;

pub use gateway_service::GatewayService;
pub use platform_service::PlatformService;
pub use transport_service::{ChannelSink, TelegramSink, TransportService};
