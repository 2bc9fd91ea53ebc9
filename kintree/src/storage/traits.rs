//! Trait definitions for the graph storage boundary
//!
//! The relationship and rendering cores consume these traits as
//! `Arc<dyn GraphStore>`; they never see how queries are transmitted or
//! persisted.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::{Custody, Direction, Person, PersonId, Relationship, RelationshipKind};
use crate::storage::errors::StorageError;

/// A single node or edge mutation, batched into a life-event operation.
///
/// A life event (marriage, birth, divorce) issues two or more of these; the
/// store applies a batch as one logical transaction when it can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphMutation {
    /// Create a person node. Fails the batch if the id is already taken.
    CreatePerson(Person),
    /// Create a directed edge. Both endpoints must already exist or be
    /// created earlier in the same batch.
    CreateEdge(Relationship),
    /// Create a directed edge unless an identical one exists
    /// (merge-by-existence, so re-applying never duplicates the edge).
    MergeEdge(Relationship),
    /// Delete the edge of the given kind between the two persons, matching
    /// either direction. Deleting an absent edge is a no-op.
    DeleteEdge {
        a: PersonId,
        b: PersonId,
        kind: RelationshipKind,
    },
    /// Set the custody attribute on a person.
    SetCustody { id: PersonId, custody: Custody },
    /// Delete a person and every incident edge.
    DeletePersonDetach { id: PersonId },
}

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StorageError>;

    /// Get metadata about the store
    async fn metadata(&self) -> Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> Result<(), StorageError>;
}

/// Trait for person node operations
#[async_trait]
pub trait PersonStore: BaseStore {
    /// Create a new person node
    async fn create_person(&self, person: Person) -> Result<Person, StorageError>;

    /// Get a person by id
    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, StorageError>;

    /// List all persons, ordered by id
    async fn list_persons(&self) -> Result<Vec<Person>, StorageError>;

    /// Count persons
    async fn count_persons(&self) -> Result<usize, StorageError>;

    /// Delete a person by id, returning whether the person existed.
    /// With `detach` set, all incident edges are removed first.
    async fn delete_person(&self, id: PersonId, detach: bool) -> Result<bool, StorageError>;
}

/// Trait for relationship edge operations
#[async_trait]
pub trait RelationshipStore: BaseStore {
    /// Create a directed edge
    async fn create_relationship(&self, relationship: Relationship) -> Result<(), StorageError>;

    /// Create a directed edge unless an identical one already exists
    async fn merge_relationship(&self, relationship: Relationship) -> Result<(), StorageError>;

    /// Delete the edge of the given kind between two persons, matching either
    /// direction. Returns whether anything was deleted.
    async fn delete_relationship_between(
        &self,
        a: PersonId,
        b: PersonId,
        kind: RelationshipKind,
    ) -> Result<bool, StorageError>;

    /// Find directed edges from one person to another, optionally narrowed to
    /// a single kind
    async fn find_relationships(
        &self,
        from: PersonId,
        to: PersonId,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<Relationship>, StorageError>;

    /// All edges touching a person in either direction, optionally narrowed
    /// to a single kind
    async fn person_relationships(
        &self,
        id: PersonId,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<Relationship>, StorageError>;

    /// Persons reachable from `id` over one edge of the given kind, ordered
    /// by id
    async fn find_related_persons(
        &self,
        id: PersonId,
        kind: RelationshipKind,
        direction: Direction,
    ) -> Result<Vec<Person>, StorageError>;
}

/// Combined trait for the persistence boundary the core consumes
#[async_trait]
pub trait GraphStore: PersonStore + RelationshipStore {
    /// Apply a batch of mutations.
    ///
    /// When `supports_transactions` is true the batch is all-or-nothing; the
    /// caller is otherwise responsible for surfacing partial application.
    async fn apply(&self, batch: Vec<GraphMutation>) -> Result<(), StorageError>;

    /// Whether `apply` runs batches atomically
    fn supports_transactions(&self) -> bool {
        false
    }
}
