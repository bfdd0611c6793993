use core::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel channel value meaning "every output of the device"
pub const ALL_CHANNELS: u8 = 32;

/// Highest addressable output channel
pub const MAX_CHANNEL: u8 = 31;

/// Output channel of a multi-channel actuator, or [`Channel::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Channel(u8);

impl Channel {
    pub const ALL: Self = Self(ALL_CHANNELS);

    /// IO value of D2-01 telegrams addressing all output channels
    pub const WIRE_ALL_OUTPUTS: u8 = 0x1E;

    /// Creates a channel from `0..=31` or [`ALL_CHANNELS`]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_CHANNEL || value == ALL_CHANNELS {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    pub const fn is_all(&self) -> bool {
        self.0 == ALL_CHANNELS
    }

    /// Value written to the 5-bit IO field of an outbound telegram
    pub const fn wire_value(&self) -> u8 {
        if self.is_all() {
            Self::WIRE_ALL_OUTPUTS
        } else {
            self.0
        }
    }

    /// Whether a telegram reporting `reported` concerns this configured channel
    pub const fn accepts(&self, reported: u8) -> bool {
        self.is_all() || self.0 == reported
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChannel(pub u8);

impl fmt::Display for InvalidChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid channel: {} (expected 0..={} or {})",
            self.0, MAX_CHANNEL, ALL_CHANNELS
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidChannel {}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidChannel(value))
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
