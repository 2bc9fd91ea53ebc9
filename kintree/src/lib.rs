//! # Kintree
//!
//! Family lineage modeled as a graph of persons connected by typed
//! relationships (marriage, parentage, custody), persisted in an embedded
//! graph store.
//!
//! The crate's core is the relationship-consistency and tree-traversal
//! logic: which relationships may legally coexist for a person, how life
//! events (founding, marriage, birth, divorce) are applied as transactional
//! multi-step mutations, and how the resulting graph is rendered as indented
//! text without recursing forever on cycles.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kintree::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = kintree::init(Config::default()).await?;
//!
//!     service.create_family_tree(301, "Alice", 302, "Bob").await?;
//!     service.have_a_kid(301, 302, 305, "Eve", "Female").await?;
//!     service.divorce(301, 302, "With Mother").await?;
//!
//!     println!("{}", service.show().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod models;
pub mod relationships;
pub mod service;
pub mod storage;
pub mod tree;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, GraphEngine, LogLevel, LoggingConfig, StorageConfig};
    pub use crate::models::{
        Custody, Direction, FamilyRelationship, FamilyTree, Person, PersonId, Relationship,
        RelationshipKind,
    };
    pub use crate::relationships::RelationshipManager;
    pub use crate::service::FamilyTreeService;
    pub use crate::storage::{GraphMutation, GraphStorage, GraphStorageConfig, GraphStore};
    pub use crate::tree::TreeRenderer;
    pub use crate::{KintreeError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for kintree operations
#[derive(Debug, thiserror::Error)]
pub enum KintreeError {
    /// Marriage policy violation or id reuse; retry with different input
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced person id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller input failed validation (e.g. an unknown custody literal)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The underlying store was unreachable, timed out, or rejected a write
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    /// A multi-step mutation was partially applied against a store without
    /// transaction support
    #[error("Partial failure: {applied} of {total} mutations applied: {source}")]
    PartialFailure {
        applied: usize,
        total: usize,
        #[source]
        source: storage::StorageError,
    },

    /// Feature not enabled
    #[error("Feature '{feature}' is not enabled. Enable it in Cargo.toml with: features = [\"{feature}\"]")]
    FeatureNotEnabled { feature: String },
}

/// Result type for kintree operations
pub type Result<T> = std::result::Result<T, KintreeError>;

/// Initialize kintree with the provided configuration and return the
/// family-tree service over an embedded graph store.
pub async fn init(config: config::Config) -> Result<service::FamilyTreeService> {
    // Ignore the error if tracing is already initialized by the host process.
    let _ = logging::init(&config.logging);

    let store = match &config.storage.engine {
        config::GraphEngine::Memory => {
            storage::GraphStorage::open_in_memory(config.storage.graph.clone()).await?
        }
        #[cfg(feature = "rocksdb")]
        config::GraphEngine::RocksDb { path } => {
            storage::GraphStorage::open_on_disk(path, config.storage.graph.clone()).await?
        }
        #[cfg(not(feature = "rocksdb"))]
        config::GraphEngine::RocksDb { .. } => {
            return Err(KintreeError::FeatureNotEnabled {
                feature: "rocksdb".to_string(),
            });
        }
    };

    Ok(service::FamilyTreeService::new(std::sync::Arc::new(store)))
}
