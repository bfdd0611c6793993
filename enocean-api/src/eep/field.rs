use alloc::string::ToString;
use alloc::vec::Vec;

use super::error::{EepError, Result};

/// A bit range inside a telegram payload.
///
/// Offsets count from the most significant bit of the first payload byte,
/// which is how EEP tables number their bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub shortcut: &'static str,
    pub description: &'static str,
    pub offset: usize,
    pub size: usize,
}

impl Field {
    pub const fn new(
        shortcut: &'static str,
        description: &'static str,
        offset: usize,
        size: usize,
    ) -> Self {
        Self {
            shortcut,
            description,
            offset,
            size,
        }
    }

    /// Largest raw value the field can hold
    pub fn max_value(&self) -> u32 {
        if self.size >= 32 {
            u32::MAX
        } else {
            (1u32 << self.size) - 1
        }
    }

    /// Number of payload bytes needed to hold this field
    pub fn required_len(&self) -> usize {
        (self.offset + self.size).div_ceil(8)
    }

    pub fn read(&self, payload: &[u8]) -> Result<u32> {
        self.check_len(payload.len())?;

        let value = (self.offset..self.offset + self.size).fold(0u32, |acc, bit| {
            let byte = payload[bit / 8];
            let value = (byte >> (7 - bit % 8)) & 1;
            (acc << 1) | value as u32
        });

        Ok(value)
    }

    pub fn write(&self, payload: &mut [u8], value: u32) -> Result<()> {
        self.check_len(payload.len())?;

        if value > self.max_value() {
            return Err(EepError::ValueOutOfRange {
                field: self.shortcut,
                value,
            });
        }

        for i in 0..self.size {
            let bit = self.offset + i;
            let mask = 1u8 << (7 - bit % 8);
            if (value >> (self.size - 1 - i)) & 1 != 0 {
                payload[bit / 8] |= mask;
            } else {
                payload[bit / 8] &= !mask;
            }
        }

        Ok(())
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        let expected = self.required_len();
        if actual < expected {
            return Err(EepError::Truncated { expected, actual });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedField {
    pub field: &'static Field,
    pub raw_value: u32,
}

/// Raw values of every field of a profile, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    fields: Vec<ParsedField>,
}

impl ParsedFields {
    pub(crate) fn parse(fields: &'static [Field], payload: &[u8]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|field| {
                field.read(payload).map(|raw_value| ParsedField { field, raw_value })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields })
    }

    pub fn get(&self, shortcut: &str) -> Option<u32> {
        self.fields
            .iter()
            .find(|parsed| parsed.field.shortcut == shortcut)
            .map(|parsed| parsed.raw_value)
    }

    /// Raw value of a field, failing when the profile has no such field
    pub fn raw_value(&self, shortcut: &str) -> Result<u32> {
        self.get(shortcut)
            .ok_or_else(|| EepError::UnknownField(shortcut.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
