//! Life-event mutations and the domain invariants that guard them

use std::sync::Arc;

use tracing::{debug, info};

use super::locks::PersonLocks;
use crate::models::{
    Custody, FamilyRelationship, FamilyTree, Person, PersonId, Relationship, RelationshipKind,
};
use crate::storage::traits::{GraphMutation, GraphStore};
use crate::{KintreeError, Result};

/// Enforces the relationship invariants and performs the node/edge mutations
/// for each life event.
///
/// Every operation acquires the affected persons' locks, runs its read-side
/// checks, and then applies the remaining mutations as one batch. Stores
/// that support transactions apply the batch atomically; otherwise mutations
/// run sequentially and a mid-batch failure surfaces as
/// [`KintreeError::PartialFailure`].
pub struct RelationshipManager {
    store: Arc<dyn GraphStore>,
    locks: PersonLocks,
}

impl RelationshipManager {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            locks: PersonLocks::new(),
        }
    }

    /// Create the two founding persons and the marriage between them.
    ///
    /// Founder genders are fixed by convention, not caller-supplied. Reusing
    /// an existing id is a conflict.
    pub async fn create_founders(
        &self,
        mother_id: PersonId,
        mother_name: &str,
        father_id: PersonId,
        father_name: &str,
    ) -> Result<FamilyTree> {
        let _guards = self.locks.acquire_many(&[mother_id, father_id]).await;

        if mother_id == father_id {
            return Err(KintreeError::Validation(format!(
                "Founders must have distinct ids, got {} twice",
                mother_id
            )));
        }
        self.ensure_id_free(mother_id).await?;
        self.ensure_id_free(father_id).await?;

        let mother = Person::new(mother_id, mother_name, "Female");
        let father = Person::new(father_id, father_name, "Male");

        self.apply_mutations(vec![
            GraphMutation::CreatePerson(mother.clone()),
            GraphMutation::CreatePerson(father.clone()),
            GraphMutation::CreateEdge(Relationship::new(
                mother_id,
                RelationshipKind::MarriedTo,
                father_id,
            )),
        ])
        .await?;

        info!(mother_id, father_id, "founded family tree");

        Ok(FamilyTree {
            root: FamilyRelationship {
                person1: mother,
                person2: father,
                kind: RelationshipKind::MarriedTo,
            },
        })
    }

    /// Marry an existing person to a newly created one.
    ///
    /// Fails with a conflict if the person already holds an active marriage
    /// or has at least one child; remarriage after having children is
    /// disallowed by policy, not just bigamy.
    pub async fn marry(
        &self,
        person_id: PersonId,
        other_id: PersonId,
        other_name: &str,
        other_gender: &str,
    ) -> Result<()> {
        let _guards = self.locks.acquire_many(&[person_id, other_id]).await;

        if self.store.get_person(person_id).await?.is_none() {
            return Err(KintreeError::NotFound(format!(
                "Person {} does not exist",
                person_id
            )));
        }
        self.ensure_id_free(other_id).await?;

        if self.is_married(person_id).await? || self.has_children(person_id).await? {
            return Err(KintreeError::Conflict(format!(
                "Person {} is already married or has kids from a previous marriage",
                person_id
            )));
        }

        let other = Person::new(other_id, other_name, other_gender);
        self.apply_mutations(vec![
            GraphMutation::CreatePerson(other),
            GraphMutation::CreateEdge(Relationship::new(
                person_id,
                RelationshipKind::MarriedTo,
                other_id,
            )),
        ])
        .await?;

        info!(person_id, other_id, "married");
        Ok(())
    }

    /// Create a child of the two parents.
    ///
    /// Both parents must exist, but they are not required to be married to
    /// each other; each `parentOf` edge is an independent mutation.
    pub async fn have_child(
        &self,
        mother_id: PersonId,
        father_id: PersonId,
        kid_id: PersonId,
        kid_name: &str,
        kid_gender: &str,
    ) -> Result<()> {
        let _guards = self
            .locks
            .acquire_many(&[mother_id, father_id, kid_id])
            .await;

        for parent_id in [mother_id, father_id] {
            if self.store.get_person(parent_id).await?.is_none() {
                return Err(KintreeError::NotFound(format!(
                    "Parent {} does not exist",
                    parent_id
                )));
            }
        }
        self.ensure_id_free(kid_id).await?;

        let kid = Person::new(kid_id, kid_name, kid_gender);
        self.apply_mutations(vec![
            GraphMutation::CreatePerson(kid),
            GraphMutation::CreateEdge(Relationship::new(
                mother_id,
                RelationshipKind::ParentOf,
                kid_id,
            )),
            GraphMutation::CreateEdge(Relationship::new(
                father_id,
                RelationshipKind::ParentOf,
                kid_id,
            )),
        ])
        .await?;

        info!(mother_id, father_id, kid_id, "child born");
        Ok(())
    }

    /// Dissolve the marriage between the two persons and assign custody of
    /// the custodial parent's children.
    ///
    /// Deleting an absent marriage edge is a no-op, not an error. Custody
    /// assignment merges by existence, so re-running a divorce with the same
    /// outcome never duplicates `hasCustody` edges.
    pub async fn divorce(
        &self,
        mother_id: PersonId,
        father_id: PersonId,
        custody: Custody,
    ) -> Result<()> {
        let _guards = self.locks.acquire_many(&[mother_id, father_id]).await;

        let custodial_id = match custody {
            Custody::WithMother => mother_id,
            Custody::WithFather => father_id,
        };

        let children = self
            .store
            .find_related_persons(
                custodial_id,
                RelationshipKind::ParentOf,
                crate::models::Direction::Outgoing,
            )
            .await?;

        let mut batch = vec![GraphMutation::DeleteEdge {
            a: mother_id,
            b: father_id,
            kind: RelationshipKind::MarriedTo,
        }];
        for child in &children {
            batch.push(GraphMutation::MergeEdge(Relationship::new(
                custodial_id,
                RelationshipKind::HasCustody,
                child.id,
            )));
            batch.push(GraphMutation::SetCustody {
                id: child.id,
                custody,
            });
        }

        self.apply_mutations(batch).await?;

        info!(
            mother_id,
            father_id,
            custody = %custody,
            children = children.len(),
            "divorced"
        );
        Ok(())
    }

    /// Remove a person entirely, detaching every incident edge first.
    pub async fn remove_person(&self, id: PersonId) -> Result<()> {
        let _guard = self.locks.acquire(id).await;

        if self.store.get_person(id).await?.is_none() {
            return Err(KintreeError::NotFound(format!(
                "Person {} does not exist",
                id
            )));
        }

        self.apply_mutations(vec![GraphMutation::DeletePersonDetach { id }])
            .await?;

        info!(id, "person removed");
        Ok(())
    }

    /// Any active marriage, regardless of which side of the edge the person
    /// is on.
    async fn is_married(&self, id: PersonId) -> Result<bool> {
        let marriages = self
            .store
            .person_relationships(id, Some(RelationshipKind::MarriedTo))
            .await?;
        Ok(!marriages.is_empty())
    }

    async fn has_children(&self, id: PersonId) -> Result<bool> {
        let edges = self
            .store
            .person_relationships(id, Some(RelationshipKind::ParentOf))
            .await?;
        Ok(edges.iter().any(|edge| edge.from == id))
    }

    async fn ensure_id_free(&self, id: PersonId) -> Result<()> {
        if self.store.get_person(id).await?.is_some() {
            return Err(KintreeError::Conflict(format!(
                "Person {} already exists",
                id
            )));
        }
        Ok(())
    }

    /// Apply a life event's mutations, atomically when the store allows it.
    async fn apply_mutations(&self, batch: Vec<GraphMutation>) -> Result<()> {
        if self.store.supports_transactions() {
            self.store.apply(batch).await?;
            return Ok(());
        }

        // No transactions: apply one at a time so a failure can report how
        // much of the event reached the store.
        let total = batch.len();
        for (applied, mutation) in batch.into_iter().enumerate() {
            if let Err(source) = self.store.apply(vec![mutation]).await {
                debug!(applied, total, "mutation batch partially applied");
                return Err(KintreeError::PartialFailure {
                    applied,
                    total,
                    source,
                });
            }
        }
        Ok(())
    }
}
