use std::collections::HashSet;
use std::sync::Arc;

use enocean_api::Interpreter;

use crate::configs::{Settings, SwitchConfig};
use crate::device::{EnOceanSwitch, SwitchEntity};
use crate::errors::SwitchError;
use crate::registry::{
    DOMAIN, EntityRegistry, IdentityMapping, MigrationService, PLATFORM, RegistryStore, unique_id,
};
use crate::services::transport_service::TelegramSink;

/// Turns configured switches into registered entities.
pub struct PlatformService {
    store: Arc<dyn RegistryStore>,
    sink: Arc<dyn TelegramSink>,
}

impl PlatformService {
    pub fn new(store: Arc<dyn RegistryStore>, sink: Arc<dyn TelegramSink>) -> Self {
        Self { store, sink }
    }

    /// Validates the switch configs, migrates their legacy identities and
    /// registers one entity per switch.
    ///
    /// A switch repeating an identity that is already set up is skipped.
    pub async fn setup(&self, settings: &Settings) -> Result<Vec<Arc<EnOceanSwitch>>, SwitchError> {
        let specs = settings
            .switches
            .iter()
            .map(SwitchConfig::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let mappings = specs
            .iter()
            .map(|spec| IdentityMapping::for_switch(&spec.address, spec.channel))
            .collect::<Vec<_>>();
        MigrationService::new(self.store.clone()).run(&mappings).await?;

        let interpreter =
            Interpreter::default().with_power_threshold(settings.power.threshold_watts);
        let mut registry = EntityRegistry::from_entries(self.store.load().await?);
        let mut seen = HashSet::new();
        let mut switches = Vec::with_capacity(specs.len());

        for spec in &specs {
            let id = unique_id(&spec.address, spec.channel);
            if !seen.insert(id.clone()) {
                tracing::warn!("Switch {} is configured more than once, skipping", id);
                continue;
            }

            let entry = registry.get_or_create(DOMAIN, PLATFORM, &id, &spec.name);
            let switch = EnOceanSwitch::new(spec, entry.entity_id.clone(), interpreter, self.sink.clone());
            tracing::info!(
                "Set up {} ({}) on {} channel {}",
                switch.entity_id(),
                switch.name(),
                spec.address,
                spec.channel
            );

            switches.push(Arc::new(switch));
        }

        self.store.save(registry.entries()).await?;

        Ok(switches)
    }
}
