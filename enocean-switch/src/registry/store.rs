use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::RegistryError;
use crate::registry::entry::EntityEntry;

const REGISTRY_VERSION: u32 = 1;

/// Storage handle for entity registry entries.
#[async_trait::async_trait]
pub trait RegistryStore: Send + Sync {
    async fn load(&self) -> Result<Vec<EntityEntry>, RegistryError>;

    async fn save(&self, entries: &[EntityEntry]) -> Result<(), RegistryError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    version: u32,
    entities: Vec<EntityEntry>,
}

/// Registry persisted as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl RegistryStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<EntityEntry>, RegistryError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No registry at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let file: RegistryFile = serde_json::from_slice(&contents)?;
        Ok(file.entities)
    }

    async fn save(&self, entries: &[EntityEntry]) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = RegistryFile {
            version: REGISTRY_VERSION,
            entities: entries.to_vec(),
        };

        // Atomic replace
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serde_json::to_vec_pretty(&file)?).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<EntityEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<EntityEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait::async_trait]
impl RegistryStore for MemoryStore {
    async fn load(&self) -> Result<Vec<EntityEntry>, RegistryError> {
        Ok(self.entries.lock().await.clone())
    }

    async fn save(&self, entries: &[EntityEntry]) -> Result<(), RegistryError> {
        *self.entries.lock().await = entries.to_vec();
        Ok(())
    }
}
