//! Storage abstractions and implementations
//!
//! This module provides the trait definitions for the graph storage boundary
//! and the embedded SurrealDB implementation used by default.

pub mod errors;
pub mod surreal;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use surreal::{GraphStorage, GraphStorageConfig};
pub use traits::{BaseStore, GraphMutation, GraphStore, PersonStore, RelationshipStore};
