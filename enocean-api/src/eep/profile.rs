use super::error::{EepError, Result};
use super::field::Field;
use super::rorg::Rorg;

/// Command id of every D2-01 telegram, read before the command table is chosen
pub const VLD_COMMAND: Field = Field::new("CMD", "Command ID", 4, 4);

/// Field table of one RORG-FUNC-TYPE (and, for VLD, one command).
#[derive(Debug, PartialEq, Eq)]
pub struct Profile {
    pub rorg: Rorg,
    pub func: u8,
    pub type_: u8,
    pub command: Option<u8>,
    pub description: &'static str,
    pub payload_len: usize,
    pub fields: &'static [Field],
}

/// Automated meter reading, electricity
pub static A5_12_01: Profile = Profile {
    rorg: Rorg::Bs4,
    func: 0x12,
    type_: 0x01,
    command: None,
    description: "Automated meter reading: electricity",
    payload_len: 4,
    fields: &[
        Field::new("MR", "Meter reading", 0, 24),
        Field::new("TI", "Tariff info", 24, 4),
        Field::new("LRN", "Learn bit", 28, 1),
        Field::new("DT", "Data type (unit)", 29, 1),
        Field::new("DIV", "Divisor (scale)", 30, 2),
    ],
};

/// Electronic switch/dimmer: actuator set output
pub static D2_01_01_SET_OUTPUT: Profile = Profile {
    rorg: Rorg::Vld,
    func: 0x01,
    type_: 0x01,
    command: Some(1),
    description: "Actuator set output",
    payload_len: 3,
    fields: &[
        VLD_COMMAND,
        Field::new("DV", "Dim value", 8, 3),
        Field::new("IO", "I/O channel", 11, 5),
        Field::new("OV", "Output value", 17, 7),
    ],
};

/// Electronic switch/dimmer: actuator status query
pub static D2_01_01_STATUS_QUERY: Profile = Profile {
    rorg: Rorg::Vld,
    func: 0x01,
    type_: 0x01,
    command: Some(3),
    description: "Actuator status query",
    payload_len: 2,
    fields: &[VLD_COMMAND, Field::new("IO", "I/O channel", 11, 5)],
};

/// Electronic switch/dimmer: actuator status response
pub static D2_01_01_STATUS_RESPONSE: Profile = Profile {
    rorg: Rorg::Vld,
    func: 0x01,
    type_: 0x01,
    command: Some(4),
    description: "Actuator status response",
    payload_len: 3,
    fields: &[
        Field::new("PF", "Power failure", 0, 1),
        Field::new("PFD", "Power failure detection", 1, 1),
        VLD_COMMAND,
        Field::new("OC", "Over current switch off", 8, 1),
        Field::new("EL", "Error level", 9, 2),
        Field::new("IO", "I/O channel", 11, 5),
        Field::new("LC", "Local control", 16, 1),
        Field::new("OV", "Output value", 17, 7),
    ],
};

pub static PROFILES: [&Profile; 4] = [
    &A5_12_01,
    &D2_01_01_SET_OUTPUT,
    &D2_01_01_STATUS_QUERY,
    &D2_01_01_STATUS_RESPONSE,
];

impl Profile {
    /// Finds the table for a RORG-FUNC-TYPE, and for VLD profiles the command
    pub fn find(rorg: Rorg, func: u8, type_: u8, command: Option<u8>) -> Result<&'static Self> {
        let mut candidates = PROFILES
            .iter()
            .copied()
            .filter(|p| p.rorg == rorg && p.func == func && p.type_ == type_)
            .peekable();

        if candidates.peek().is_none() {
            return Err(EepError::UnsupportedProfile {
                rorg: rorg as u8,
                func,
                type_,
            });
        }

        match command {
            None => candidates
                .find(|p| p.command.is_none())
                .ok_or(EepError::UnknownCommand(0)),
            Some(command) => candidates
                .find(|p| p.command == Some(command))
                .ok_or(EepError::UnknownCommand(command)),
        }
    }

    pub fn field(&self, shortcut: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.shortcut == shortcut)
    }

    /// Profile code in the usual `RR-FF-TT` notation
    pub fn code(&self) -> (u8, u8, u8) {
        (self.rorg as u8, self.func, self.type_)
    }
}
