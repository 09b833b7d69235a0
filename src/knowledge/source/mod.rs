//! Knowledge sources: where the knowledge base document is read from.
//!
//! A source yields a fully validated [`RenderedKnowledge`] or a [`LoadError`];
//! there is no partial result. [`FileKnowledgeSource`] re-reads the file on
//! every call. [`CachedKnowledgeSource`] wraps any source and keeps the first
//! successful load.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use thiserror::Error;

use super::knowledge::{KnowledgeBase, RenderedKnowledge};
use super::knowledge_config::KnowledgeConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce a knowledge base.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is missing or unreadable.
    #[error("failed to read knowledge base at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the schema.
    #[error("invalid knowledge base at {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Anything that can produce the rendered knowledge base.
///
/// Loading is synchronous; async callers run it on the blocking pool.
pub trait KnowledgeSource: Send + Sync + fmt::Debug {
    /// Human-readable name of this source, for logging.
    fn source_name(&self) -> String;

    /// Load, validate and render the knowledge base.
    fn load(&self) -> Result<RenderedKnowledge, LoadError>;
}

/// Build the source described by `config`.
pub fn from_config(config: &KnowledgeConfig) -> Arc<dyn KnowledgeSource> {
    let file = FileKnowledgeSource::new(config.path.clone());
    if config.cache {
        Arc::new(CachedKnowledgeSource::new(file))
    } else {
        Arc::new(file)
    }
}

// ---------------------------------------------------------------------------
// FileKnowledgeSource
// ---------------------------------------------------------------------------

/// Reads the knowledge base from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct FileKnowledgeSource {
    path: PathBuf,
}

impl FileKnowledgeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document without rendering it.
    pub fn read(&self) -> Result<KnowledgeBase, LoadError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        KnowledgeBase::from_json(&text).map_err(|source| LoadError::Invalid {
            path: self.path.clone(),
            source,
        })
    }
}

impl KnowledgeSource for FileKnowledgeSource {
    fn source_name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn load(&self) -> Result<RenderedKnowledge, LoadError> {
        let kb = self.read()?;
        log::debug!(
            "Loaded knowledge base from {} ({} skills, {} projects)",
            self.path.display(),
            kb.skills.len(),
            kb.projects.len()
        );
        Ok(kb.render())
    }
}

// ---------------------------------------------------------------------------
// CachedKnowledgeSource
// ---------------------------------------------------------------------------

/// Memoises the first successful load of the inner source.
///
/// The document is static for the process lifetime, so there is no
/// invalidation. Failures are not cached; the next call retries the inner
/// source.
#[derive(Debug)]
pub struct CachedKnowledgeSource<S> {
    inner: S,
    cell: OnceCell<RenderedKnowledge>,
}

impl<S: KnowledgeSource> CachedKnowledgeSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cell: OnceCell::new(),
        }
    }

    /// Whether a load has succeeded yet.
    pub fn is_warm(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<S: KnowledgeSource> KnowledgeSource for CachedKnowledgeSource<S> {
    fn source_name(&self) -> String {
        format!("cached:{}", self.inner.source_name())
    }

    fn load(&self) -> Result<RenderedKnowledge, LoadError> {
        self.cell.get_or_try_init(|| self.inner.load()).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
