//! Configuration for the kintree runtime

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::GraphStorageConfig;

/// Which embedded engine backs the graph store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphEngine {
    /// In-memory engine; state is lost when the process exits
    Memory,
    /// Persistent on-disk engine (requires the `rocksdb` feature)
    RocksDb { path: PathBuf },
}

impl Default for GraphEngine {
    fn default() -> Self {
        GraphEngine::Memory
    }
}

/// Log verbosity, mapped onto a tracing level filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub engine: GraphEngine,
    #[serde(skip)]
    pub graph: GraphStorageConfig,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Configuration for tests and ephemeral sessions: in-memory storage,
    /// quiet logging.
    pub fn for_testing() -> Self {
        Self {
            storage: StorageConfig {
                engine: GraphEngine::Memory,
                graph: GraphStorageConfig::default(),
            },
            logging: LoggingConfig {
                level: LogLevel::Warn,
            },
        }
    }
}
