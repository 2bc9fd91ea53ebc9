//! Relationship consistency rules and life-event mutations

mod locks;
mod manager;

pub use locks::PersonLocks;
pub use manager::RelationshipManager;
