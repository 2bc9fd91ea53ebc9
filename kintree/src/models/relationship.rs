//! Relationship edge model and the closed kind/custody enumerations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::person::{Person, PersonId};

/// Closed enumeration of the edge kinds the graph may hold.
///
/// Every store query interpolates the edge table name from this enum, so an
/// unknown or caller-constructed relationship type can never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Active marriage, stored directionally but symmetric in meaning.
    MarriedTo,
    /// Parent to child.
    ParentOf,
    /// Custodial parent to child, established at divorce.
    HasCustody,
    /// Transitional custody marker.
    WithMother,
    /// Transitional custody marker.
    WithFather,
}

impl RelationshipKind {
    /// Every kind, in a stable order. Used when an operation must sweep all
    /// edge tables (detach-delete, listing a person's relationships).
    pub const ALL: [RelationshipKind; 5] = [
        RelationshipKind::MarriedTo,
        RelationshipKind::ParentOf,
        RelationshipKind::HasCustody,
        RelationshipKind::WithMother,
        RelationshipKind::WithFather,
    ];

    /// The persisted edge table name.
    pub const fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::MarriedTo => "marriedTo",
            RelationshipKind::ParentOf => "parentOf",
            RelationshipKind::HasCustody => "hasCustody",
            RelationshipKind::WithMother => "withMother",
            RelationshipKind::WithFather => "withFather",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationshipKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown relationship kind '{s}'"))
    }
}

/// Custody outcome of a divorce.
///
/// Serialized as the literal strings `"With Mother"` / `"With Father"`, which
/// are also the values stored on the child's `custody` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Custody {
    #[serde(rename = "With Mother")]
    WithMother,
    #[serde(rename = "With Father")]
    WithFather,
}

impl Custody {
    pub const fn as_str(self) -> &'static str {
        match self {
            Custody::WithMother => "With Mother",
            Custody::WithFather => "With Father",
        }
    }
}

impl fmt::Display for Custody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Custody {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "With Mother" => Ok(Custody::WithMother),
            "With Father" => Ok(Custody::WithFather),
            other => Err(format!(
                "unknown custody literal '{other}' (expected 'With Mother' or 'With Father')"
            )),
        }
    }
}

/// Direction of edges relative to a person when querying related persons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// A directed, typed edge between two person identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: PersonId,
    pub kind: RelationshipKind,
    pub to: PersonId,
}

impl Relationship {
    pub const fn new(from: PersonId, kind: RelationshipKind, to: PersonId) -> Self {
        Self { from, kind, to }
    }
}

/// The founding marriage a tree is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRelationship {
    pub person1: Person,
    pub person2: Person,
    pub kind: RelationshipKind,
}

/// Explicit handle to a family tree, returned by `create_founders` and passed
/// into rendering. Holding the root here rather than in ambient process state
/// lets multiple trees and test instances coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree {
    pub root: FamilyRelationship,
}
