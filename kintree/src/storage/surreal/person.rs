//! Person storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId};

use super::base::GraphStorage;
use crate::models::{Custody, Person, PersonId, RelationshipKind};
use crate::storage::errors::StorageError;
use crate::storage::traits::PersonStore;

/// Internal representation of a Person record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub(crate) struct SurrealPerson {
    id: RecordId,
    name: String,
    gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custody: Option<Custody>,
}

/// Struct for creating persons (the record id carries the person id)
#[derive(Debug, Clone, serde::Serialize)]
struct CreatePerson {
    name: String,
    gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    custody: Option<Custody>,
}

/// Extract the numeric person id from a record id.
///
/// `RecordId::key().to_string()` wraps non-trivial keys in ⟨⟩ brackets, so
/// strip those before parsing.
pub(crate) fn person_id_from_record(id: &RecordId) -> Result<PersonId, StorageError> {
    let key_string = id.key().to_string();
    let clean = key_string
        .strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .unwrap_or(&key_string);

    clean.parse::<PersonId>().map_err(|e| {
        StorageError::Conversion(format!("Record key '{}' is not a person id: {}", key_string, e))
    })
}

impl TryFrom<SurrealPerson> for Person {
    type Error = StorageError;

    fn try_from(record: SurrealPerson) -> Result<Self, Self::Error> {
        Ok(Self {
            id: person_id_from_record(&record.id)?,
            name: record.name,
            gender: record.gender,
            custody: record.custody,
        })
    }
}

#[async_trait]
impl<C> PersonStore for GraphStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_person(&self, person: Person) -> Result<Person, StorageError> {
        let content = CreatePerson {
            name: person.name.clone(),
            gender: person.gender.clone(),
            custody: person.custody,
        };

        let created: Option<SurrealPerson> = self
            .client
            .create(("person", person.id))
            .content(content)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("already exists") {
                    StorageError::AlreadyExists(format!("Person {} already exists", person.id))
                } else {
                    StorageError::Query(format!("Failed to create person: {}", msg))
                }
            })?;

        created
            .map(Person::try_from)
            .transpose()?
            .ok_or_else(|| StorageError::Internal("No person created".to_string()))
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, StorageError> {
        let person: Option<SurrealPerson> = self
            .client
            .select(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get person: {}", e)))?;

        person.map(Person::try_from).transpose()
    }

    async fn list_persons(&self) -> Result<Vec<Person>, StorageError> {
        let records: Vec<SurrealPerson> = self
            .client
            .select("person")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list persons: {}", e)))?;

        let mut persons = records
            .into_iter()
            .map(Person::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        persons.sort_by_key(|p| p.id);

        Ok(persons)
    }

    async fn count_persons(&self) -> Result<usize, StorageError> {
        Ok(self.list_persons().await?.len())
    }

    async fn delete_person(&self, id: PersonId, detach: bool) -> Result<bool, StorageError> {
        if detach {
            for kind in RelationshipKind::ALL {
                let query = format!(
                    r#"DELETE {table} WHERE in = type::thing("person", $id) OR out = type::thing("person", $id)"#,
                    table = kind.as_str()
                );

                self.client
                    .query(query)
                    .bind(("id", id))
                    .await
                    .map_err(|e| {
                        StorageError::Query(format!("Failed to detach {} edges: {}", kind, e))
                    })?
                    .check()
                    .map_err(|e| {
                        StorageError::Query(format!("Failed to detach {} edges: {}", kind, e))
                    })?;
            }
        }

        let deleted: Option<SurrealPerson> = self
            .client
            .delete(("person", id))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete person: {}", e)))?;

        Ok(deleted.is_some())
    }
}
