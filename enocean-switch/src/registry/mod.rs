pub mod entry;
pub mod migration;
pub mod store;

pub use entry::{EntityEntry, EntityRegistry};
pub use migration::{IdentityMapping, MigrationOutcome, MigrationService};
pub use store::{JsonFileStore, MemoryStore, RegistryStore};

use enocean_api::{Channel, DeviceAddress};

pub const DOMAIN: &str = "switch";
pub const PLATFORM: &str = "enocean";

/// Stable identity of one switch channel: `"{combined address}-{channel}"`
pub fn unique_id(address: &DeviceAddress, channel: Channel) -> String {
    format!("{}-{}", address.combined(), channel)
}

/// Identity used before channels were part of it
pub fn legacy_unique_id(address: &DeviceAddress) -> String {
    address.combined().to_string()
}
