//! Schema initialization for the graph storage

use surrealdb::{Connection, Surreal};

use crate::models::RelationshipKind;
use crate::storage::errors::StorageError;

/// Initialize the person table and one relation table per edge kind.
///
/// Edge tables are declared `TYPE RELATION FROM person TO person`, so the
/// store itself rejects edges between anything other than person records.
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    let person_table_query = r#"
        DEFINE TABLE IF NOT EXISTS person SCHEMALESS
        COMMENT "Stores person nodes of the lineage graph";

        DEFINE INDEX IF NOT EXISTS person_name_idx ON person FIELDS name;
    "#;

    client
        .query(person_table_query)
        .await
        .map_err(|e| StorageError::Query(format!("Failed to define person table: {}", e)))?
        .check()
        .map_err(|e| StorageError::Query(format!("Failed to define person table: {}", e)))?;

    for kind in RelationshipKind::ALL {
        let edge_table_query = format!(
            "DEFINE TABLE IF NOT EXISTS {table} TYPE RELATION FROM person TO person;",
            table = kind.as_str()
        );

        client
            .query(edge_table_query)
            .await
            .map_err(|e| {
                StorageError::Query(format!("Failed to define {} table: {}", kind, e))
            })?
            .check()
            .map_err(|e| {
                StorageError::Query(format!("Failed to define {} table: {}", kind, e))
            })?;
    }

    Ok(())
}
