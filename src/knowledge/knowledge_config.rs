//! Knowledge configuration for locating and loading the document.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the knowledge base, relative to the working directory.
pub const DEFAULT_KNOWLEDGE_PATH: &str = "lib/knowledge_base.json";

/// Configuration for the knowledge loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the JSON document.
    /// Defaults to `lib/knowledge_base.json`.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Keep the first successful load for the process lifetime instead of
    /// re-reading the file on every request.
    /// Defaults to false.
    #[serde(default)]
    pub cache: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_KNOWLEDGE_PATH)
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            cache: false,
        }
    }
}

impl KnowledgeConfig {
    /// Create a new KnowledgeConfig with custom values.
    pub fn new(path: Option<PathBuf>, cache: Option<bool>) -> Self {
        Self {
            path: path.unwrap_or_else(default_path),
            cache: cache.unwrap_or(false),
        }
    }
}
