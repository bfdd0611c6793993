#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Unique id {unique_id} is already used by {entity_id}")]
    UniqueIdExists { unique_id: String, entity_id: String },

    #[error("Failed to access registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse registry file: {0}")]
    Serde(#[from] serde_json::Error),
}
