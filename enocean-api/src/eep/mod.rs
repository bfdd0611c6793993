//! EnOcean Equipment Profiles: bit-field tables and the RORG discriminator.

mod error;
mod field;
mod profile;
mod rorg;

pub use error::{EepError, Result};
pub use field::{Field, ParsedField, ParsedFields};
pub use profile::{
    A5_12_01, D2_01_01_SET_OUTPUT, D2_01_01_STATUS_QUERY, D2_01_01_STATUS_RESPONSE, PROFILES,
    Profile, VLD_COMMAND,
};
pub use rorg::Rorg;
