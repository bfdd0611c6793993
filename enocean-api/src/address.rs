use core::fmt;

use serde::{Deserialize, Serialize};

/// Folds an ordered byte sequence into one integer, most significant byte first.
///
/// Each byte contributes `byte << (8 * position_from_end)`. Sequences longer
/// than eight bytes keep only their trailing eight bytes.
pub fn combine(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64)
}

/// Identifier of a physical EnOcean module (sender or destination id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceAddress([u8; 4]);

impl DeviceAddress {
    /// Size of an ERP1 sender or destination id
    pub const LEN: usize = 4;

    /// Destination used for unaddressed telegrams
    pub const BROADCAST: Self = Self([0xFF; 4]);

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 4]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Numeric key of the address, see [`combine`]
    pub fn combined(&self) -> u64 {
        combine(&self.0)
    }
}

impl From<[u8; 4]> for DeviceAddress {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d)
    }
}
