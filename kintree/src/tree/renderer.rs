//! Indented-text rendering of a family tree

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Direction, FamilyTree, Person, PersonId, RelationshipKind};
use crate::storage::traits::GraphStore;
use crate::Result;

/// Message rendered when no tree has been created yet.
pub const NO_TREE_MESSAGE: &str = "No family tree found.";

/// Walks the graph from a tree's root marriage and produces an indented
/// textual representation.
pub struct TreeRenderer {
    store: Arc<dyn GraphStore>,
}

impl TreeRenderer {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Render the tree, or the fixed no-tree message when there is none.
    pub async fn render(&self, tree: Option<&FamilyTree>) -> Result<String> {
        let Some(tree) = tree else {
            return Ok(NO_TREE_MESSAGE.to_string());
        };

        let root = &tree.root;
        let mut out = format!(
            "ROOT: {} ({}) married to {} ({})\n",
            root.person1.name, root.person1.gender, root.person2.name, root.person2.gender
        );

        // Divorce/remarriage histories can reintroduce already-seen persons;
        // the visited set guarantees the walk terminates on any graph the
        // store can represent.
        let mut visited = HashSet::new();
        self.traverse(&root.person1, 1, &mut visited, &mut out)
            .await?;

        Ok(out)
    }

    async fn traverse(
        &self,
        person: &Person,
        depth: usize,
        visited: &mut HashSet<PersonId>,
        out: &mut String,
    ) -> Result<()> {
        if !visited.insert(person.id) {
            return Ok(());
        }

        let spouses = self
            .store
            .find_related_persons(person.id, RelationshipKind::MarriedTo, Direction::Outgoing)
            .await?;
        let kids = self
            .store
            .find_related_persons(person.id, RelationshipKind::ParentOf, Direction::Outgoing)
            .await?;

        let indent = "\t".repeat(depth);

        for spouse in &spouses {
            out.push_str(&format!(
                "{}- {} ({}) married to {} ({})\n",
                indent, person.name, person.gender, spouse.name, spouse.gender
            ));
            Box::pin(self.traverse(spouse, depth + 1, visited, out)).await?;
        }

        for kid in &kids {
            out.push_str(&format!("{}- {} ({})\n", indent, kid.name, kid.gender));
            Box::pin(self.traverse(kid, depth + 1, visited, out)).await?;
        }

        Ok(())
    }
}
