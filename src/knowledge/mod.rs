//! Knowledge base loading and rendering.
//!
//! - [`knowledge`]: the document model and its flattening into prompt text
//! - [`source`]: where the document comes from (file, cached wrapper)
//! - [`knowledge_config`]: location and caching options

pub mod knowledge;
pub mod knowledge_config;
pub mod source;

pub use self::knowledge::{KnowledgeBase, Project, RenderedKnowledge};
pub use self::knowledge_config::KnowledgeConfig;
pub use self::source::{CachedKnowledgeSource, FileKnowledgeSource, KnowledgeSource, LoadError};
