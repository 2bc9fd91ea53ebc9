//! Person node model

use serde::{Deserialize, Serialize};

use super::relationship::Custody;

/// Caller-supplied person identifier, unique across the graph.
pub type PersonId = i64;

/// A node representing an individual in the lineage graph.
///
/// Persons are created by life events (founding, marriage, birth) and never
/// mutated afterwards except for the `custody` attribute, which is set when a
/// divorce assigns custody of this person to a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Free-form gender label. Founders are fixed to "Female"/"Male" by
    /// convention; everyone else carries whatever the caller supplied.
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custody: Option<Custody>,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gender: gender.into(),
            custody: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custody_is_absent_until_assigned() {
        let person = Person::new(301, "Alice", "Female");
        assert_eq!(person.custody, None);

        let json = serde_json::to_value(&person).expect("serialize person");
        assert!(json.get("custody").is_none());
    }
}
