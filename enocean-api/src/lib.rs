#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod address;
pub mod channel;
pub mod eep;
pub mod switch;
pub mod telegram;
pub mod transport;

pub use address::{DeviceAddress, combine};
pub use channel::{ALL_CHANNELS, Channel};
pub use eep::{EepError, ParsedFields, Rorg};
pub use switch::{
    ActuatorState, DEFAULT_POWER_THRESHOLD_WATTS, Interpreter, PowerReading, StateUpdate,
    SwitchCommand, decode_telegram, encode_status_query, encode_switch_command,
};
pub use telegram::RadioTelegram;
