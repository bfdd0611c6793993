pub mod settings;
pub mod switch;

pub use settings::{Gateway, Logger, Power, Registry, Settings};
pub use switch::{DEFAULT_NAME, SwitchConfig, SwitchSpec};
