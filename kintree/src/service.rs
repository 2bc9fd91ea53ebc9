//! Thin orchestration over the relationship manager and tree renderer

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Custody, FamilyTree, PersonId};
use crate::relationships::RelationshipManager;
use crate::storage::traits::GraphStore;
use crate::tree::TreeRenderer;
use crate::{KintreeError, Result};

/// Orchestrates life events and rendering behind a small API.
///
/// Owns the current tree handle; a subsequent `create_family_tree` replaces
/// (never merges) the previous tree.
pub struct FamilyTreeService {
    store: Arc<dyn GraphStore>,
    manager: RelationshipManager,
    renderer: TreeRenderer,
    tree: RwLock<Option<FamilyTree>>,
}

impl FamilyTreeService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self {
            manager: RelationshipManager::new(Arc::clone(&store)),
            renderer: TreeRenderer::new(Arc::clone(&store)),
            store,
            tree: RwLock::new(None),
        }
    }

    /// Create a new family tree from two founders, replacing any current one.
    pub async fn create_family_tree(
        &self,
        mother_id: PersonId,
        mother_name: &str,
        father_id: PersonId,
        father_name: &str,
    ) -> Result<()> {
        let tree = self
            .manager
            .create_founders(mother_id, mother_name, father_id, father_name)
            .await?;

        *self.tree.write().await = Some(tree);
        Ok(())
    }

    pub async fn marry(
        &self,
        person_id: PersonId,
        other_id: PersonId,
        other_name: &str,
        other_gender: &str,
    ) -> Result<()> {
        self.manager
            .marry(person_id, other_id, other_name, other_gender)
            .await
    }

    pub async fn have_a_kid(
        &self,
        mother_id: PersonId,
        father_id: PersonId,
        kid_id: PersonId,
        kid_name: &str,
        kid_gender: &str,
    ) -> Result<()> {
        self.manager
            .have_child(mother_id, father_id, kid_id, kid_name, kid_gender)
            .await
    }

    /// Divorce two persons, assigning custody per the literal
    /// `"With Mother"` or `"With Father"`. Any other literal is a
    /// validation error.
    pub async fn divorce(
        &self,
        mother_id: PersonId,
        father_id: PersonId,
        custody: &str,
    ) -> Result<()> {
        let custody: Custody = custody.parse().map_err(KintreeError::Validation)?;
        self.manager.divorce(mother_id, father_id, custody).await
    }

    /// Render the current tree as indented text.
    pub async fn show(&self) -> Result<String> {
        let tree = self.tree.read().await;
        self.renderer.render(tree.as_ref()).await
    }

    /// Remove a person and every relationship they appear in.
    pub async fn remove_person(&self, id: PersonId) -> Result<()> {
        self.manager.remove_person(id).await
    }

    /// Delete all persons and relationships and drop the tree handle.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        *self.tree.write().await = None;
        Ok(())
    }

    /// The current tree handle, if a family tree has been created.
    pub async fn tree(&self) -> Option<FamilyTree> {
        self.tree.read().await.clone()
    }
}
