//! Transactional mutation batches for the graph storage

use std::collections::BTreeMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use surrealdb::Connection;

use super::base::GraphStorage;
use crate::models::RelationshipKind;
use crate::storage::errors::StorageError;
use crate::storage::traits::{GraphMutation, GraphStore};

#[async_trait]
impl<C> GraphStore for GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Apply a batch of mutations as a single all-or-nothing transaction.
    ///
    /// The batch is rendered into one multi-statement query wrapped in
    /// `BEGIN`/`COMMIT`; a failing statement cancels the whole transaction,
    /// so a life event can never be left half-applied by this store.
    async fn apply(&self, batch: Vec<GraphMutation>) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut query = String::from("BEGIN TRANSACTION;\n");
        let mut params: BTreeMap<String, serde_json::Value> = BTreeMap::new();

        for (index, mutation) in batch.iter().enumerate() {
            render_mutation(&mut query, &mut params, index, mutation)?;
        }
        query.push_str("COMMIT TRANSACTION;");

        self.client
            .query(query)
            .bind(params)
            .await
            .map_err(|e| StorageError::Transaction(format!("Mutation batch failed: {}", e)))?
            .check()
            .map_err(|e| StorageError::Transaction(format!("Mutation batch rolled back: {}", e)))?;

        Ok(())
    }

    fn supports_transactions(&self) -> bool {
        true
    }
}

/// Append the statements for one mutation, binding its values under
/// `m{index}_*` parameter names so batched mutations never collide.
fn render_mutation(
    query: &mut String,
    params: &mut BTreeMap<String, serde_json::Value>,
    index: usize,
    mutation: &GraphMutation,
) -> Result<(), StorageError> {
    match mutation {
        GraphMutation::CreatePerson(person) => {
            params.insert(format!("m{index}_id"), serde_json::json!(person.id));
            params.insert(format!("m{index}_name"), serde_json::json!(person.name));
            params.insert(format!("m{index}_gender"), serde_json::json!(person.gender));

            let mut content = format!("name: $m{index}_name, gender: $m{index}_gender");
            if let Some(custody) = person.custody {
                params.insert(format!("m{index}_custody"), serde_json::to_value(custody)?);
                let _ = write!(content, ", custody: $m{index}_custody");
            }

            let _ = writeln!(
                query,
                r#"CREATE type::thing("person", $m{index}_id) CONTENT {{ {content} }};"#
            );
        }
        GraphMutation::CreateEdge(relationship) => {
            params.insert(format!("m{index}_from"), serde_json::json!(relationship.from));
            params.insert(format!("m{index}_to"), serde_json::json!(relationship.to));

            let _ = writeln!(
                query,
                r#"RELATE (type::thing("person", $m{index}_from))->{table}->(type::thing("person", $m{index}_to));"#,
                table = relationship.kind.as_str()
            );
        }
        GraphMutation::MergeEdge(relationship) => {
            params.insert(format!("m{index}_from"), serde_json::json!(relationship.from));
            params.insert(format!("m{index}_to"), serde_json::json!(relationship.to));
            let table = relationship.kind.as_str();

            // Merge-by-existence: drop any identical edge, then relate, so the
            // batch ends with exactly one edge however often it is re-applied.
            let _ = writeln!(
                query,
                r#"DELETE {table} WHERE in = type::thing("person", $m{index}_from) AND out = type::thing("person", $m{index}_to);"#
            );
            let _ = writeln!(
                query,
                r#"RELATE (type::thing("person", $m{index}_from))->{table}->(type::thing("person", $m{index}_to));"#
            );
        }
        GraphMutation::DeleteEdge { a, b, kind } => {
            params.insert(format!("m{index}_a"), serde_json::json!(a));
            params.insert(format!("m{index}_b"), serde_json::json!(b));

            let _ = writeln!(
                query,
                r#"DELETE {table} WHERE (in = type::thing("person", $m{index}_a) AND out = type::thing("person", $m{index}_b)) OR (in = type::thing("person", $m{index}_b) AND out = type::thing("person", $m{index}_a));"#,
                table = kind.as_str()
            );
        }
        GraphMutation::SetCustody { id, custody } => {
            params.insert(format!("m{index}_id"), serde_json::json!(id));
            params.insert(format!("m{index}_custody"), serde_json::to_value(custody)?);

            let _ = writeln!(
                query,
                r#"UPDATE type::thing("person", $m{index}_id) SET custody = $m{index}_custody;"#
            );
        }
        GraphMutation::DeletePersonDetach { id } => {
            params.insert(format!("m{index}_id"), serde_json::json!(id));

            for kind in RelationshipKind::ALL {
                let _ = writeln!(
                    query,
                    r#"DELETE {table} WHERE in = type::thing("person", $m{index}_id) OR out = type::thing("person", $m{index}_id);"#,
                    table = kind.as_str()
                );
            }
            let _ = writeln!(query, r#"DELETE type::thing("person", $m{index}_id);"#);
        }
    }

    Ok(())
}
