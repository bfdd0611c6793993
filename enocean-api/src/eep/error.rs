use core::fmt;

use alloc::string::String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EepError {
    /// Telegram carries no data bytes
    Empty,
    /// Unknown radio telegram organisation
    UnknownRorg(u8),
    /// No table for the requested RORG-FUNC-TYPE
    UnsupportedProfile { rorg: u8, func: u8, type_: u8 },
    /// VLD command id without a table in the profile
    UnknownCommand(u8),
    /// Field shortcut not defined by the profile
    UnknownField(String),
    /// Field the profile needs was not supplied
    MissingField(&'static str),
    /// Value does not fit the field width
    ValueOutOfRange { field: &'static str, value: u32 },
    /// Payload shorter than the profile requires
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for EepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty telegram"),
            Self::UnknownRorg(r) => write!(f, "Unknown RORG: 0x{:02X}", r),
            Self::UnsupportedProfile { rorg, func, type_ } => write!(
                f,
                "Unsupported profile: {:02X}-{:02X}-{:02X}",
                rorg, func, type_
            ),
            Self::UnknownCommand(c) => write!(f, "Unknown command: {}", c),
            Self::UnknownField(name) => write!(f, "Unknown field: {}", name),
            Self::MissingField(name) => write!(f, "Missing field: {}", name),
            Self::ValueOutOfRange { field, value } => {
                write!(f, "Value {} out of range for field {}", value, field)
            }
            Self::Truncated { expected, actual } => write!(
                f,
                "Truncated payload: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EepError {}

pub type Result<T> = core::result::Result<T, EepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(EepError::UnknownRorg(0x42).to_string(), "Unknown RORG: 0x42");
        assert_eq!(
            EepError::UnsupportedProfile {
                rorg: 0xA5,
                func: 0x02,
                type_: 0x05
            }
            .to_string(),
            "Unsupported profile: A5-02-05"
        );
        assert_eq!(
            EepError::Truncated {
                expected: 3,
                actual: 1
            }
            .to_string(),
            "Truncated payload: expected 3 bytes, got 1"
        );
    }
}
