//! Relationship edge storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId};

use super::base::GraphStorage;
use super::person::person_id_from_record;
use crate::models::{Direction, Person, PersonId, Relationship, RelationshipKind};
use crate::storage::errors::StorageError;
use crate::storage::traits::{PersonStore, RelationshipStore};

/// Internal representation of an edge record for SurrealDB
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct SurrealEdge {
    #[serde(rename = "in")]
    pub(crate) from: RecordId,
    #[serde(rename = "out")]
    pub(crate) to: RecordId,
}

impl SurrealEdge {
    pub(crate) fn into_relationship(
        self,
        kind: RelationshipKind,
    ) -> Result<Relationship, StorageError> {
        Ok(Relationship {
            from: person_id_from_record(&self.from)?,
            kind,
            to: person_id_from_record(&self.to)?,
        })
    }
}

#[async_trait]
impl<C> RelationshipStore for GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_relationship(&self, relationship: Relationship) -> Result<(), StorageError> {
        // Table name comes from the closed RelationshipKind enum, never from
        // caller input.
        let query = format!(
            r#"RELATE (type::thing("person", $from))->{table}->(type::thing("person", $to))"#,
            table = relationship.kind.as_str()
        );

        self.client
            .query(query)
            .bind(("from", relationship.from))
            .bind(("to", relationship.to))
            .await
            .map_err(|e| {
                StorageError::Query(format!(
                    "Failed to create {} edge: {}",
                    relationship.kind, e
                ))
            })?
            .check()
            .map_err(|e| {
                StorageError::Query(format!(
                    "Failed to create {} edge: {}",
                    relationship.kind, e
                ))
            })?;

        Ok(())
    }

    async fn merge_relationship(&self, relationship: Relationship) -> Result<(), StorageError> {
        let existing = self
            .find_relationships(relationship.from, relationship.to, Some(relationship.kind))
            .await?;

        if existing.is_empty() {
            self.create_relationship(relationship).await?;
        }

        Ok(())
    }

    async fn delete_relationship_between(
        &self,
        a: PersonId,
        b: PersonId,
        kind: RelationshipKind,
    ) -> Result<bool, StorageError> {
        let query = format!(
            r#"
            DELETE {table}
            WHERE (in = type::thing("person", $a) AND out = type::thing("person", $b))
               OR (in = type::thing("person", $b) AND out = type::thing("person", $a))
            RETURN BEFORE
            "#,
            table = kind.as_str()
        );

        let mut response = self
            .client
            .query(query)
            .bind(("a", a))
            .bind(("b", b))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete {} edge: {}", kind, e)))?;

        let deleted: Vec<SurrealEdge> = response.take(0).map_err(|e| {
            StorageError::Query(format!("Failed to extract deleted {} edges: {}", kind, e))
        })?;

        Ok(!deleted.is_empty())
    }

    async fn find_relationships(
        &self,
        from: PersonId,
        to: PersonId,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<Relationship>, StorageError> {
        let kinds: &[RelationshipKind] = match kind {
            Some(ref k) => std::slice::from_ref(k),
            None => &RelationshipKind::ALL,
        };

        let mut relationships = Vec::new();
        for kind in kinds.iter().copied() {
            let query = format!(
                r#"SELECT * FROM {table} WHERE in = type::thing("person", $from) AND out = type::thing("person", $to)"#,
                table = kind.as_str()
            );

            let mut response = self
                .client
                .query(query)
                .bind(("from", from))
                .bind(("to", to))
                .await
                .map_err(|e| {
                    StorageError::Query(format!("Failed to find {} edges: {}", kind, e))
                })?;

            let edges: Vec<SurrealEdge> = response.take(0).map_err(|e| {
                StorageError::Query(format!("Failed to extract {} edges: {}", kind, e))
            })?;

            for edge in edges {
                relationships.push(edge.into_relationship(kind)?);
            }
        }

        Ok(relationships)
    }

    async fn person_relationships(
        &self,
        id: PersonId,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<Relationship>, StorageError> {
        let kinds: &[RelationshipKind] = match kind {
            Some(ref k) => std::slice::from_ref(k),
            None => &RelationshipKind::ALL,
        };

        let mut relationships = Vec::new();
        for kind in kinds.iter().copied() {
            let query = format!(
                r#"SELECT * FROM {table} WHERE in = type::thing("person", $id) OR out = type::thing("person", $id)"#,
                table = kind.as_str()
            );

            let mut response = self
                .client
                .query(query)
                .bind(("id", id))
                .await
                .map_err(|e| {
                    StorageError::Query(format!("Failed to find {} edges: {}", kind, e))
                })?;

            let edges: Vec<SurrealEdge> = response.take(0).map_err(|e| {
                StorageError::Query(format!("Failed to extract {} edges: {}", kind, e))
            })?;

            for edge in edges {
                relationships.push(edge.into_relationship(kind)?);
            }
        }

        Ok(relationships)
    }

    async fn find_related_persons(
        &self,
        id: PersonId,
        kind: RelationshipKind,
        direction: Direction,
    ) -> Result<Vec<Person>, StorageError> {
        let mut related_ids: Vec<PersonId> = Vec::new();

        if matches!(direction, Direction::Outgoing | Direction::Both) {
            let query = format!(
                r#"SELECT VALUE out FROM {table} WHERE in = type::thing("person", $id)"#,
                table = kind.as_str()
            );

            let mut response = self.client.query(query).bind(("id", id)).await.map_err(
                |e| StorageError::Query(format!("Failed to find outgoing {} edges: {}", kind, e)),
            )?;

            let ids: Vec<RecordId> = response.take(0).map_err(|e| {
                StorageError::Query(format!("Failed to extract outgoing {} ids: {}", kind, e))
            })?;

            for record in &ids {
                related_ids.push(person_id_from_record(record)?);
            }
        }

        if matches!(direction, Direction::Incoming | Direction::Both) {
            let query = format!(
                r#"SELECT VALUE in FROM {table} WHERE out = type::thing("person", $id)"#,
                table = kind.as_str()
            );

            let mut response = self.client.query(query).bind(("id", id)).await.map_err(
                |e| StorageError::Query(format!("Failed to find incoming {} edges: {}", kind, e)),
            )?;

            let ids: Vec<RecordId> = response.take(0).map_err(|e| {
                StorageError::Query(format!("Failed to extract incoming {} ids: {}", kind, e))
            })?;

            for record in &ids {
                related_ids.push(person_id_from_record(record)?);
            }
        }

        related_ids.sort_unstable();
        related_ids.dedup();

        let mut persons = Vec::with_capacity(related_ids.len());
        for related_id in related_ids {
            if let Some(person) = self.get_person(related_id).await? {
                persons.push(person);
            }
        }

        Ok(persons)
    }
}
