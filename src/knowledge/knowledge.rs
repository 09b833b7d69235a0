//! Knowledge base document model and its prompt rendering.
//!
//! The document is a static JSON file describing the portfolio owner. It is
//! parsed into [`KnowledgeBase`] and flattened into [`RenderedKnowledge`],
//! which is what ends up inside the prompt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

impl Project {
    /// Render this project as a fixed three-line block.
    pub fn render(&self) -> String {
        format!(
            "Project: {}\nDescription: {}\nTechnologies: {}",
            self.title,
            self.description,
            self.technologies.join(", ")
        )
    }
}

/// The structured knowledge base document.
///
/// Every field is required. Deserialization fails as a whole if one is
/// missing or has the wrong type, so a partially valid document never
/// reaches the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Free-text background.
    pub about: String,
    /// Skills, in display order.
    pub skills: Vec<String>,
    /// Projects, in display order.
    pub projects: Vec<Project>,
    /// Platform name to URL. Ordered by platform so rendering is stable.
    pub contact: BTreeMap<String, String>,
    /// Behavioural rules for the assistant, in order.
    pub rules: Vec<String>,
}

impl KnowledgeBase {
    /// Parse a knowledge base from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Flatten the document into the five text blocks used by the prompt.
    pub fn render(&self) -> RenderedKnowledge {
        RenderedKnowledge {
            about: self.about.clone(),
            skills: self.skills.join(", "),
            projects: self
                .projects
                .iter()
                .map(Project::render)
                .collect::<Vec<_>>()
                .join("\n\n"),
            contact: self
                .contact
                .iter()
                .map(|(platform, url)| format!("{}: {}", platform, url))
                .collect::<Vec<_>>()
                .join("\n"),
            rules: self.rules.join("\n"),
        }
    }
}

/// Read-only flattening of a [`KnowledgeBase`] into prompt-ready text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedKnowledge {
    pub about: String,
    pub skills: String,
    pub projects: String,
    pub contact: String,
    pub rules: String,
}

impl RenderedKnowledge {
    /// Join the blocks under `=== SECTION ===` headers.
    pub fn to_prompt_text(&self) -> String {
        let sections = [
            ("ABOUT", &self.about),
            ("SKILLS", &self.skills),
            ("PROJECTS", &self.projects),
            ("CONTACT", &self.contact),
            ("RULES", &self.rules),
        ];

        sections
            .iter()
            .map(|(header, body)| format!("=== {} ===\n{}", header, body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
