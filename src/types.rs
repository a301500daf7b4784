//! Shared types used across pipeline stages.
//!
//! These types are serialized into the scan manifest and read back by the
//! generate stage, so both sides see identical shapes.

use serde::{Deserialize, Serialize};

/// A content record: one markdown file from a collection.
///
/// Records are produced by the scanner after front-matter validation and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Name of the collection the record belongs to (e.g. `pages`, `blog`).
    pub collection: String,
    /// Route path, always starting with `/` (e.g. `/about`, `/blog/first-post`).
    pub path: String,
    /// Title from front-matter, or the first `# heading` as fallback.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Navigation metadata from the `nav*` front-matter keys.
    #[serde(default)]
    pub nav: NavMeta,
    /// Markdown body with the front-matter block removed.
    pub body: String,
    /// Source file relative to the content root.
    pub source: String,
}

impl PageRecord {
    /// The first non-empty teaser field: excerpt, then summary, then description.
    pub fn teaser(&self) -> Option<&str> {
        [&self.excerpt, &self.summary, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }
}

/// Navigation metadata attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavMeta {
    /// Whether the record appears in the navigation menu.
    #[serde(default)]
    pub visible: bool,
    /// Display label override (`navTitle`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Sort order (`navOrder`); lower sorts first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// Parent key (`navParent`): a parent's path or label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Navigation tree item.
///
/// Used both for structural links declared in `config.toml` and for the
/// items derived from records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub label: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn new(label: impl Into<String>, to: impl Into<String>, order: Option<f64>) -> Self {
        Self {
            label: label.into(),
            to: to.into(),
            order,
            children: Vec::new(),
        }
    }
}
