//! Embedded SurrealDB implementation of the graph storage boundary

mod base;
mod config;
mod graph;
mod person;
mod relationship;
mod schema;

pub use base::GraphStorage;
pub use config::GraphStorageConfig;
