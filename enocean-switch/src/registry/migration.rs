use std::sync::Arc;

use enocean_api::{Channel, DeviceAddress};

use crate::errors::RegistryError;
use crate::registry::entry::EntityRegistry;
use crate::registry::store::RegistryStore;
use crate::registry::{DOMAIN, PLATFORM, legacy_unique_id, unique_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMapping {
    pub old: String,
    pub new: String,
}

impl IdentityMapping {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Mapping from the address-only identity to the per-channel one
    pub fn for_switch(address: &DeviceAddress, channel: Channel) -> Self {
        Self::new(legacy_unique_id(address), unique_id(address, channel))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Migrated { entity_id: String },
    /// Nothing is registered under the old identity
    NotFound,
    /// The new identity is already taken; the entity keeps its old one
    SkippedConflict { entity_id: String },
}

/// Renames entity identities in a registry store.
#[derive(Clone)]
pub struct MigrationService {
    store: Arc<dyn RegistryStore>,
    domain: String,
    platform: String,
}

impl MigrationService {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self {
            store,
            domain: DOMAIN.to_string(),
            platform: PLATFORM.to_string(),
        }
    }

    /// Applies every mapping and saves the store if anything changed.
    ///
    /// Running it again with the same mappings changes nothing.
    pub async fn run(
        &self,
        mappings: &[IdentityMapping],
    ) -> Result<Vec<MigrationOutcome>, RegistryError> {
        let mut registry = EntityRegistry::from_entries(self.store.load().await?);

        let outcomes = mappings
            .iter()
            .map(|mapping| self.apply(&mut registry, mapping))
            .collect::<Result<Vec<_>, _>>()?;

        if outcomes
            .iter()
            .any(|outcome| matches!(outcome, MigrationOutcome::Migrated { .. }))
        {
            self.store.save(registry.entries()).await?;
        }

        Ok(outcomes)
    }

    pub fn apply(
        &self,
        registry: &mut EntityRegistry,
        mapping: &IdentityMapping,
    ) -> Result<MigrationOutcome, RegistryError> {
        let Some(entity_id) = registry
            .get_entity_id(&self.domain, &self.platform, &mapping.old)
            .map(str::to_string)
        else {
            return Ok(MigrationOutcome::NotFound);
        };

        match registry.update_unique_id(&entity_id, &mapping.new) {
            Ok(()) => {
                tracing::debug!(
                    "Migrating unique_id from [{}] to [{}]",
                    mapping.old,
                    mapping.new
                );
                Ok(MigrationOutcome::Migrated { entity_id })
            }
            Err(RegistryError::UniqueIdExists { .. }) => {
                tracing::warn!(
                    "Skip migration of id [{}] to [{}] because it already exists",
                    mapping.old,
                    mapping.new
                );
                Ok(MigrationOutcome::SkippedConflict { entity_id })
            }
            Err(e) => Err(e),
        }
    }
}
