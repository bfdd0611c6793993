use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::address::DeviceAddress;
use crate::eep::{EepError, ParsedFields, Profile, Rorg, VLD_COMMAND};

/// An ERP1 radio telegram: data bytes plus optional bytes.
///
/// Data layout is `RORG | payload | sender id (4) | status`, optional data on
/// transmit is `sub telegram count | destination id (4) | dBm | security level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioTelegram {
    data: Vec<u8>,
    optional: Vec<u8>,
}

impl RadioTelegram {
    /// Sender id plus status byte trailing the payload
    const TRAILER_LEN: usize = DeviceAddress::LEN + 1;
    /// RORG, at least one payload byte and the trailer
    pub const MIN_DATA_LEN: usize = 1 + 1 + Self::TRAILER_LEN;

    const SEND_SUB_TELEGRAMS: u8 = 0x03;
    const SEND_DBM: u8 = 0xFF;
    const SECURITY_NONE: u8 = 0x00;

    pub fn new(data: Vec<u8>, optional: Vec<u8>) -> Result<Self, EepError> {
        if data.is_empty() {
            return Err(EepError::Empty);
        }
        if data.len() < Self::MIN_DATA_LEN {
            return Err(EepError::Truncated {
                expected: Self::MIN_DATA_LEN,
                actual: data.len(),
            });
        }
        Ok(Self { data, optional })
    }

    pub(crate) fn from_parts(
        rorg: Rorg,
        payload: &[u8],
        sender: DeviceAddress,
        destination: DeviceAddress,
    ) -> Self {
        let mut data = Vec::with_capacity(1 + payload.len() + Self::TRAILER_LEN);
        data.push(rorg as u8);
        data.extend_from_slice(payload);
        data.extend_from_slice(sender.as_bytes());
        data.push(0x00);

        let mut optional = Vec::with_capacity(7);
        optional.push(Self::SEND_SUB_TELEGRAMS);
        optional.extend_from_slice(destination.as_bytes());
        optional.push(Self::SEND_DBM);
        optional.push(Self::SECURITY_NONE);

        Self { data, optional }
    }

    /// Builds a telegram from named field values of a profile.
    ///
    /// VLD profiles select their command table from the `CMD` value, which
    /// must be present. 4BS telegrams are marked as data telegrams (LRN = 1)
    /// unless `LRN` is given explicitly.
    pub fn create(
        rorg: Rorg,
        func: u8,
        type_: u8,
        sender: DeviceAddress,
        destination: DeviceAddress,
        fields: &[(&str, u32)],
    ) -> Result<Self, EepError> {
        let command = match rorg {
            Rorg::Vld => {
                let (_, value) = fields
                    .iter()
                    .find(|(name, _)| *name == VLD_COMMAND.shortcut)
                    .ok_or(EepError::MissingField(VLD_COMMAND.shortcut))?;
                if *value > VLD_COMMAND.max_value() {
                    return Err(EepError::ValueOutOfRange {
                        field: VLD_COMMAND.shortcut,
                        value: *value,
                    });
                }
                Some(*value as u8)
            }
            _ => None,
        };

        let profile = Profile::find(rorg, func, type_, command)?;
        let mut payload = vec![0u8; profile.payload_len];

        if rorg == Rorg::Bs4 {
            if let Some(learn) = profile.field("LRN") {
                learn.write(&mut payload, 1)?;
            }
        }

        for (name, value) in fields {
            let field = profile
                .field(name)
                .ok_or_else(|| EepError::UnknownField(name.to_string()))?;
            field.write(&mut payload, *value)?;
        }

        Ok(Self::from_parts(rorg, &payload, sender, destination))
    }

    /// Parses the payload against a profile of this telegram's RORG
    pub fn parse_eep(&self, func: u8, type_: u8) -> Result<ParsedFields, EepError> {
        let rorg = self.rorg()?;
        let payload = self.payload();

        let command = match rorg {
            Rorg::Vld => Some(VLD_COMMAND.read(payload)? as u8),
            _ => None,
        };

        let profile = Profile::find(rorg, func, type_, command)?;
        if payload.len() < profile.payload_len {
            return Err(EepError::Truncated {
                expected: profile.payload_len,
                actual: payload.len(),
            });
        }

        ParsedFields::parse(profile.fields, payload)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn optional(&self) -> &[u8] {
        &self.optional
    }

    /// First data byte, selects the decode path
    pub fn discriminator(&self) -> u8 {
        self.data[0]
    }

    pub fn rorg(&self) -> Result<Rorg, EepError> {
        Rorg::from_u8(self.discriminator())
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[1..self.data.len() - Self::TRAILER_LEN]
    }

    pub fn sender(&self) -> DeviceAddress {
        let start = self.data.len() - Self::TRAILER_LEN;
        let mut bytes = [0u8; DeviceAddress::LEN];
        bytes.copy_from_slice(&self.data[start..start + DeviceAddress::LEN]);
        DeviceAddress::new(bytes)
    }

    pub fn status(&self) -> u8 {
        self.data[self.data.len() - 1]
    }

    /// Number of repeaters the telegram passed through
    pub fn repeater_count(&self) -> u8 {
        self.status() & 0x0F
    }

    /// Destination id, broadcast when the optional data does not carry one
    pub fn destination(&self) -> DeviceAddress {
        self.optional
            .get(1..1 + DeviceAddress::LEN)
            .and_then(DeviceAddress::from_slice)
            .unwrap_or(DeviceAddress::BROADCAST)
    }

    /// Received signal strength in dBm, if reported
    pub fn dbm(&self) -> Option<i16> {
        match self.optional.get(1 + DeviceAddress::LEN) {
            Some(&Self::SEND_DBM) | None => None,
            Some(&value) => Some(-(value as i16)),
        }
    }
}
