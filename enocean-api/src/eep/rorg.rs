use super::error::EepError;

/// Radio telegram organisation: the first data byte of every ERP1 telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rorg {
    /// Repeated switch communication
    Rps = 0xF6,
    /// 1 byte communication
    Bs1 = 0xD5,
    /// 4 byte communication
    Bs4 = 0xA5,
    /// Variable length data
    Vld = 0xD2,
    /// Manufacturer specific communication
    Msc = 0xD1,
    /// Universal teach-in
    Ute = 0xD4,
}

impl Rorg {
    /// Creates RORG from byte value
    pub fn from_u8(value: u8) -> Result<Self, EepError> {
        match value {
            0xF6 => Ok(Self::Rps),
            0xD5 => Ok(Self::Bs1),
            0xA5 => Ok(Self::Bs4),
            0xD2 => Ok(Self::Vld),
            0xD1 => Ok(Self::Msc),
            0xD4 => Ok(Self::Ute),
            other => Err(EepError::UnknownRorg(other)),
        }
    }

    /// Returns telegram class name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rps => "RPS",
            Self::Bs1 => "1BS",
            Self::Bs4 => "4BS",
            Self::Vld => "VLD",
            Self::Msc => "MSC",
            Self::Ute => "UTE",
        }
    }

    /// Fixed payload length, `None` for variable length classes
    pub fn payload_len(&self) -> Option<usize> {
        match self {
            Self::Rps | Self::Bs1 => Some(1),
            Self::Bs4 => Some(4),
            Self::Ute => Some(7),
            Self::Vld | Self::Msc => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rorg_from_u8() {
        assert_eq!(Rorg::from_u8(0xA5).unwrap(), Rorg::Bs4);
        assert_eq!(Rorg::from_u8(0xD2).unwrap(), Rorg::Vld);
        assert_eq!(Rorg::from_u8(0xF6).unwrap(), Rorg::Rps);
        assert_eq!(Rorg::from_u8(0x00), Err(EepError::UnknownRorg(0x00)));
    }

    #[test]
    fn test_rorg_name() {
        assert_eq!(Rorg::Bs4.name(), "4BS");
        assert_eq!(Rorg::Vld.name(), "VLD");
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(Rorg::Bs4.payload_len(), Some(4));
        assert_eq!(Rorg::Vld.payload_len(), None);
        assert_eq!(Rorg::Vld as u8, 0xD2);
    }
}
