//! Configuration for the SurrealDB-backed graph storage

/// Configuration for the graph storage
#[derive(Debug, Clone)]
pub struct GraphStorageConfig {
    pub namespace: String,
    pub database: String,
}

impl Default for GraphStorageConfig {
    fn default() -> Self {
        Self {
            namespace: "kintree".to_string(),
            database: "main".to_string(),
        }
    }
}
