use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::RegistryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub id: Uuid,
    pub entity_id: String,
    pub domain: String,
    pub platform: String,
    pub unique_id: String,
    pub name: String,
    pub modified_at: OffsetDateTime,
}

/// In-memory view of the persisted entity registry.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: Vec<EntityEntry>,
}

impl EntityRegistry {
    pub fn from_entries(entries: Vec<EntityEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[EntityEntry] {
        &self.entries
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityEntry> {
        self.entries.iter().find(|e| e.entity_id == entity_id)
    }

    pub fn get_entity_id(&self, domain: &str, platform: &str, unique_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.domain == domain && e.platform == platform && e.unique_id == unique_id)
            .map(|e| e.entity_id.as_str())
    }

    /// Moves an entity to a new unique id within its domain and platform.
    pub fn update_unique_id(
        &mut self,
        entity_id: &str,
        new_unique_id: &str,
    ) -> Result<(), RegistryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.entity_id == entity_id)
            .ok_or_else(|| RegistryError::EntityNotFound(entity_id.to_string()))?;

        let (domain, platform) = (&self.entries[index].domain, &self.entries[index].platform);
        if let Some(existing) = self.get_entity_id(domain, platform, new_unique_id) {
            return Err(RegistryError::UniqueIdExists {
                unique_id: new_unique_id.to_string(),
                entity_id: existing.to_string(),
            });
        }

        let entry = &mut self.entries[index];
        entry.unique_id = new_unique_id.to_string();
        entry.modified_at = OffsetDateTime::now_utc();

        Ok(())
    }

    /// Returns the entity registered for `unique_id`, registering it when new.
    pub fn get_or_create(
        &mut self,
        domain: &str,
        platform: &str,
        unique_id: &str,
        name: &str,
    ) -> &EntityEntry {
        let index = match self
            .entries
            .iter()
            .position(|e| e.domain == domain && e.platform == platform && e.unique_id == unique_id)
        {
            Some(index) => index,
            None => {
                let entity_id = self.generate_entity_id(domain, name);
                tracing::info!("Registered {} for unique id {}", entity_id, unique_id);

                self.entries.push(EntityEntry {
                    id: Uuid::new_v4(),
                    entity_id,
                    domain: domain.to_string(),
                    platform: platform.to_string(),
                    unique_id: unique_id.to_string(),
                    name: name.to_string(),
                    modified_at: OffsetDateTime::now_utc(),
                });
                self.entries.len() - 1
            }
        };

        &self.entries[index]
    }

    fn generate_entity_id(&self, domain: &str, name: &str) -> String {
        let base = format!("{}.{}", domain, slugify(name));
        if self.get(&base).is_none() {
            return base;
        }

        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }
}

fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() { "unnamed".into() } else { slug }
}
