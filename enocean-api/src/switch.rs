//! Command encoding and status/telemetry interpretation for multi-channel
//! switch actuators (D2-01-01) with optional power metering (A5-12-01).

use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::address::DeviceAddress;
use crate::channel::Channel;
use crate::eep::{D2_01_01_SET_OUTPUT, D2_01_01_STATUS_QUERY, EepError, Profile, Rorg};
use crate::telegram::RadioTelegram;

/// Wattage a power reading must exceed to count as "on"
pub const DEFAULT_POWER_THRESHOLD_WATTS: f64 = 1.0;

const FUNC_ACTUATOR: u8 = 0x01;
const TYPE_ACTUATOR: u8 = 0x01;
const FUNC_METER: u8 = 0x12;
const TYPE_METER: u8 = 0x01;

const CMD_SET_OUTPUT: u32 = 1;
const CMD_STATUS_QUERY: u32 = 3;
const CMD_STATUS_RESPONSE: u32 = 4;

/// Switch to the new output value immediately
const DIM_NONE: u32 = 0;
const OUTPUT_ON: u32 = 0x64;
const OUTPUT_OFF: u32 = 0x00;

/// `DT` value of an instantaneous power reading (0 is cumulative energy)
const DATA_TYPE_POWER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    pub destination: DeviceAddress,
    pub sender: DeviceAddress,
    pub channel: Channel,
    pub desired_on: bool,
}

impl SwitchCommand {
    pub fn new(
        destination: DeviceAddress,
        sender: DeviceAddress,
        channel: Channel,
        desired_on: bool,
    ) -> Self {
        Self {
            destination,
            sender,
            channel,
            desired_on,
        }
    }
}

/// Decoded actuator status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub channel: u8,
    pub output: u8,
}

impl ActuatorState {
    pub fn is_on(&self) -> bool {
        self.output > 0
    }
}

/// Decoded instantaneous power reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerReading {
    pub raw_value: u32,
    pub divisor: u32,
}

impl PowerReading {
    pub fn watts(&self) -> f64 {
        let scale = (0..self.divisor).fold(1.0f64, |acc, _| acc * 10.0);
        self.raw_value as f64 / scale
    }
}

/// State change produced by an inbound telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub channel: Channel,
    pub is_on: bool,
}

/// Encodes an "actuator set output" telegram switching one channel fully on or off.
pub fn encode_switch_command(command: &SwitchCommand) -> RadioTelegram {
    let output = if command.desired_on {
        OUTPUT_ON
    } else {
        OUTPUT_OFF
    };

    let payload = build_payload(
        &D2_01_01_SET_OUTPUT,
        &[
            ("CMD", CMD_SET_OUTPUT),
            ("DV", DIM_NONE),
            ("IO", command.channel.wire_value() as u32),
            ("OV", output),
        ],
    );

    RadioTelegram::from_parts(Rorg::Vld, &payload, command.sender, command.destination)
}

/// Encodes an "actuator status query" asking the device to report a channel.
pub fn encode_status_query(
    destination: DeviceAddress,
    sender: DeviceAddress,
    channel: Channel,
) -> RadioTelegram {
    let payload = build_payload(
        &D2_01_01_STATUS_QUERY,
        &[
            ("CMD", CMD_STATUS_QUERY),
            ("IO", channel.wire_value() as u32),
        ],
    );

    RadioTelegram::from_parts(Rorg::Vld, &payload, sender, destination)
}

/// Builds a command payload. Every value is a profile constant or the wire
/// value of a `Channel`, so each write is in range for its field.
fn build_payload(profile: &Profile, values: &[(&str, u32)]) -> Vec<u8> {
    let mut payload = vec![0u8; profile.payload_len];

    for &(shortcut, value) in values {
        let field = profile.field(shortcut);
        debug_assert!(field.is_some(), "unknown field {}", shortcut);

        if let Some(field) = field {
            let written = field.write(&mut payload, value);
            debug_assert!(written.is_ok(), "{}: {:?}", shortcut, written);
        }
    }

    payload
}

/// Decodes a telegram with the default power threshold.
pub fn decode_telegram(
    telegram: &RadioTelegram,
    configured: Channel,
) -> Result<Option<StateUpdate>, EepError> {
    Interpreter::default().decode(telegram, configured)
}

/// Telegram interpreter for one switch abstraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpreter {
    power_threshold_watts: f64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            power_threshold_watts: DEFAULT_POWER_THRESHOLD_WATTS,
        }
    }
}

impl Interpreter {
    pub fn with_power_threshold(mut self, watts: f64) -> Self {
        self.power_threshold_watts = watts;
        self
    }

    pub fn power_threshold(&self) -> f64 {
        self.power_threshold_watts
    }

    /// Decodes a telegram against the configured channel.
    ///
    /// Returns `Ok(None)` for telegrams that carry nothing for this channel.
    /// Power readings never switch a channel off.
    pub fn decode(
        &self,
        telegram: &RadioTelegram,
        configured: Channel,
    ) -> Result<Option<StateUpdate>, EepError> {
        let is_on = match telegram.discriminator() {
            d if d == Rorg::Bs4 as u8 => self
                .power_reading(telegram)?
                .filter(|reading| reading.watts() > self.power_threshold_watts)
                .map(|_| true),
            d if d == Rorg::Vld as u8 => actuator_state(telegram)?
                .filter(|state| configured.accepts(state.channel))
                .map(|state| state.is_on()),
            _ => None,
        };

        Ok(is_on.map(|is_on| StateUpdate {
            channel: configured,
            is_on,
        }))
    }

    /// Instantaneous power carried by an A5-12-01 telegram, if any
    pub fn power_reading(&self, telegram: &RadioTelegram) -> Result<Option<PowerReading>, EepError> {
        let parsed = telegram.parse_eep(FUNC_METER, TYPE_METER)?;
        if parsed.raw_value("DT")? != DATA_TYPE_POWER {
            return Ok(None);
        }

        Ok(Some(PowerReading {
            raw_value: parsed.raw_value("MR")?,
            divisor: parsed.raw_value("DIV")?,
        }))
    }
}

/// Actuator status carried by a D2-01-01 telegram, if it is a status response
pub fn actuator_state(telegram: &RadioTelegram) -> Result<Option<ActuatorState>, EepError> {
    let parsed = telegram.parse_eep(FUNC_ACTUATOR, TYPE_ACTUATOR)?;

    if parsed.raw_value("CMD")? != CMD_STATUS_RESPONSE {
        return Ok(None);
    }

    Ok(Some(ActuatorState {
        channel: parsed.raw_value("IO")? as u8,
        output: parsed.raw_value("OV")? as u8,
    }))
}
