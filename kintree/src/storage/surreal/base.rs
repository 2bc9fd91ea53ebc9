//! Base graph storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, Surreal};

use super::config::GraphStorageConfig;
use crate::models::RelationshipKind;
use crate::storage::errors::StorageError;
use crate::storage::traits::BaseStore;

/// SurrealDB-backed graph storage
#[derive(Debug)]
pub struct GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
    pub(crate) config: GraphStorageConfig,
}

impl<C> GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new graph storage instance over an established client
    pub async fn new(client: Surreal<C>, config: GraphStorageConfig) -> Result<Self, StorageError> {
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to set namespace/database: {}", e))
            })?;

        let storage = Self { client, config };
        super::schema::initialize_schema(&storage.client).await?;

        tracing::debug!(
            namespace = %storage.config.namespace,
            database = %storage.config.database,
            "graph storage initialized"
        );

        Ok(storage)
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }
}

impl GraphStorage<surrealdb::engine::local::Db> {
    /// Open an in-memory instance, used for tests and ephemeral sessions
    pub async fn open_in_memory(config: GraphStorageConfig) -> Result<Self, StorageError> {
        let client = Surreal::new::<surrealdb::engine::local::Mem>(())
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to open in-memory storage: {}", e))
            })?;

        Self::new(client, config).await
    }

    /// Open a persistent on-disk instance
    #[cfg(feature = "rocksdb")]
    pub async fn open_on_disk(
        path: impl AsRef<std::path::Path>,
        config: GraphStorageConfig,
    ) -> Result<Self, StorageError> {
        let client = Surreal::new::<surrealdb::engine::local::RocksDb>(path.as_ref())
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to open on-disk storage: {}", e))
            })?;

        Self::new(client, config).await
    }
}

#[async_trait]
impl<C> BaseStore for GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        self.client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        for kind in RelationshipKind::ALL {
            self.client
                .query(format!("DELETE FROM {}", kind.as_str()))
                .await
                .map_err(|e| StorageError::Query(format!("Failed to clear {}: {}", kind, e)))?;
        }

        self.client
            .query("DELETE FROM person")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to clear person table: {}", e)))?;

        Ok(())
    }

    async fn metadata(&self) -> Result<serde_json::Value, StorageError> {
        Ok(serde_json::json!({
            "type": "graph_storage",
            "namespace": self.config.namespace,
            "database": self.config.database,
            "engine": "surrealdb",
            "features": {
                "transactions": true,
                "typed_relations": true,
            }
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        // SurrealDB connections are automatically closed when dropped
        Ok(())
    }
}
