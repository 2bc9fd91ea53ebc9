//! Data model types for the family lineage graph

pub mod person;
pub mod relationship;

pub use person::{Person, PersonId};
pub use relationship::{
    Custody, Direction, FamilyRelationship, FamilyTree, Relationship, RelationshipKind,
};
