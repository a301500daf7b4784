//! Content-collection schemas.
//!
//! A collection is a directory of markdown files sharing one front-matter
//! schema. Each file becomes a [`PageRecord`] routed under the collection's
//! URL prefix.
//!
//! ## Front-matter
//!
//! ```markdown
//! ---
//! title: About Us
//! description: Who we are
//! tags: [company]
//! nav: true
//! navTitle: About
//! navOrder: 30
//! navParent: company
//! ---
//!
//! # About Us
//! ```
//!
//! Every key is optional except `title`, which falls back to the first
//! `# heading` of the body. Unknown keys are ignored; wrong types are errors.
//!
//! ## Routes
//!
//! Routes are the file path under the collection directory, extension
//! dropped, joined onto the collection prefix:
//!
//! ```text
//! pages/about.md            prefix "/"      → /about
//! pages/about/index.md      prefix "/"      → /about
//! pages/index.md            prefix "/"      → /
//! blog/2.first-post.md      prefix "/blog"  → /blog/first-post
//! ```

use crate::config::CollectionConfig;
use crate::naming::route_segment;
use crate::types::{NavMeta, PageRecord};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Deserialize;
use std::path::{Component, Path};
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("front-matter block is not closed with '---'")]
    UnterminatedFrontmatter,
    #[error("invalid front-matter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
    #[error("no `title` in front-matter and no `# heading` in body")]
    MissingTitle,
}

/// Front-matter schema shared by all collections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub image: Option<String>,
    pub nav: Option<bool>,
    pub nav_title: Option<String>,
    pub nav_order: Option<f64>,
    pub nav_parent: Option<String>,
}

impl Frontmatter {
    /// Parse front-matter YAML. Blank input yields the empty schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, RecordError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn nav_meta(&self) -> NavMeta {
        NavMeta {
            visible: self.nav.unwrap_or(false),
            title: self.nav_title.clone(),
            order: self.nav_order,
            parent: self.nav_parent.clone(),
        }
    }
}

/// Split a markdown source into its front-matter YAML and body.
///
/// Front-matter is a first line of `---`, YAML, and a closing `---` line.
/// Sources that don't open with a fence have no front-matter.
pub fn split_frontmatter(source: &str) -> Result<(Option<&str>, &str), RecordError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = strip_fence_line(source) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }
    Err(RecordError::UnterminatedFrontmatter)
}

/// Returns the text after the opening fence line, if the source has one.
fn strip_fence_line(source: &str) -> Option<&str> {
    let first_len = source.find('\n').map_or(source.len(), |i| i + 1);
    let (first, rest) = source.split_at(first_len);
    (first.trim_end() == FENCE).then_some(rest)
}

/// Compute the route for a file at `rel_path` inside a collection.
pub fn route_for(prefix: &str, rel_path: &Path) -> String {
    let mut segments: Vec<String> = prefix
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let prefix_len = segments.len();

    for component in rel_path.with_extension("").components() {
        if let Component::Normal(name) = component {
            segments.push(route_segment(&name.to_string_lossy()).to_string());
        }
    }

    if segments.len() > prefix_len && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}

/// Parse one markdown source into a record.
///
/// `rel_path` is relative to the collection directory (drives the route),
/// `source_path` relative to the content root (kept for display).
pub fn parse_record(
    collection: &str,
    config: &CollectionConfig,
    rel_path: &Path,
    source_path: &str,
    content: &str,
) -> Result<PageRecord, RecordError> {
    let (yaml, body) = split_frontmatter(content)?;
    let fm = match yaml {
        Some(yaml) => Frontmatter::from_yaml(yaml)?,
        None => Frontmatter::default(),
    };

    let title = fm
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| first_heading(body))
        .ok_or(RecordError::MissingTitle)?;

    let nav = fm.nav_meta();
    Ok(PageRecord {
        collection: collection.to_string(),
        path: route_for(&config.prefix, rel_path),
        title,
        description: fm.description,
        summary: fm.summary,
        excerpt: fm.excerpt,
        tags: fm.tags,
        category: fm.category,
        date: fm.date,
        image: fm.image,
        nav,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
        source: source_path.to_string(),
    })
}

/// Text of the first non-empty level-1 heading. Code blocks are skipped.
pub fn first_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();
    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_heading = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = text.trim();
                if !title.is_empty() {
                    return Some(title.to_string());
                }
                in_heading = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }
    None
}

/// Whether the body's first block is a level-1 heading.
pub fn starts_with_heading(body: &str) -> bool {
    Parser::new(body)
        .find(|event| matches!(event, Event::Start(_)))
        .is_some_and(|event| {
            matches!(
                event,
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H1,
                    ..
                })
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn pages() -> CollectionConfig {
        SiteConfig::default().collections["pages"].clone()
    }

    fn blog() -> CollectionConfig {
        SiteConfig::default().collections["blog"].clone()
    }

    // =========================================================================
    // Front-matter splitting
    // =========================================================================

    #[test]
    fn split_extracts_yaml_and_body() {
        let (yaml, body) = split_frontmatter("---\ntitle: Hi\n---\n\nBody\n").unwrap();
        assert_eq!(yaml, Some("title: Hi\n"));
        assert_eq!(body, "\nBody\n");
    }

    #[test]
    fn split_without_fence_is_all_body() {
        let (yaml, body) = split_frontmatter("# Title\n\ntext").unwrap();
        assert_eq!(yaml, None);
        assert_eq!(body, "# Title\n\ntext");
    }

    #[test]
    fn split_handles_crlf() {
        let (yaml, body) = split_frontmatter("---\r\ntitle: Hi\r\n---\r\nBody").unwrap();
        assert_eq!(yaml, Some("title: Hi\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_strips_bom() {
        let (yaml, _) = split_frontmatter("\u{feff}---\ntitle: Hi\n---\n").unwrap();
        assert_eq!(yaml, Some("title: Hi\n"));
    }

    #[test]
    fn split_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_unterminated_is_error() {
        let result = split_frontmatter("---\ntitle: Hi\n\nBody");
        assert!(matches!(result, Err(RecordError::UnterminatedFrontmatter)));
    }

    #[test]
    fn horizontal_rule_later_in_body_is_not_a_fence() {
        let (yaml, body) = split_frontmatter("Intro\n---\nMore").unwrap();
        assert_eq!(yaml, None);
        assert_eq!(body, "Intro\n---\nMore");
    }

    // =========================================================================
    // Routes
    // =========================================================================

    #[test]
    fn route_under_root_prefix() {
        assert_eq!(route_for("/", Path::new("about.md")), "/about");
    }

    #[test]
    fn route_root_index() {
        assert_eq!(route_for("/", Path::new("index.md")), "/");
    }

    #[test]
    fn route_nested_index() {
        assert_eq!(route_for("/", Path::new("about/index.md")), "/about");
    }

    #[test]
    fn route_under_blog_prefix() {
        assert_eq!(
            route_for("/blog", Path::new("first-post.md")),
            "/blog/first-post"
        );
    }

    #[test]
    fn route_prefix_index_is_prefix() {
        assert_eq!(route_for("/blog/", Path::new("index.md")), "/blog");
    }

    #[test]
    fn route_strips_ordering_prefixes() {
        assert_eq!(
            route_for("/", Path::new("1.guides/02.setup.md")),
            "/guides/setup"
        );
    }

    // =========================================================================
    // Record parsing
    // =========================================================================

    #[test]
    fn parse_full_record() {
        let src = "---
title: First Post
excerpt: A test post.
tags: [nuxt, blog]
category: Blog
date: 2026-02-06
image: /images/symbol.png
---

Hello.
";
        let record = parse_record(
            "blog",
            &blog(),
            Path::new("first-post.md"),
            "blog/first-post.md",
            src,
        )
        .unwrap();
        assert_eq!(record.path, "/blog/first-post");
        assert_eq!(record.title, "First Post");
        assert_eq!(record.tags, vec!["nuxt", "blog"]);
        assert_eq!(record.date.as_deref(), Some("2026-02-06"));
        assert_eq!(record.image.as_deref(), Some("/images/symbol.png"));
        assert_eq!(record.body, "Hello.\n");
        assert!(!record.nav.visible);
    }

    #[test]
    fn parse_nav_metadata() {
        let src = "---
title: Our Team
nav: true
navTitle: Team
navOrder: 2.5
navParent: /About
---
";
        let record =
            parse_record("pages", &pages(), Path::new("about/team.md"), "pages/about/team.md", src)
                .unwrap();
        assert_eq!(record.path, "/about/team");
        assert!(record.nav.visible);
        assert_eq!(record.nav.title.as_deref(), Some("Team"));
        assert_eq!(record.nav.order, Some(2.5));
        assert_eq!(record.nav.parent.as_deref(), Some("/About"));
    }

    #[test]
    fn integer_nav_order_accepted() {
        let src = "---\ntitle: A\nnavOrder: 10\n---\n";
        let record = parse_record("pages", &pages(), Path::new("a.md"), "pages/a.md", src).unwrap();
        assert_eq!(record.nav.order, Some(10.0));
    }

    #[test]
    fn title_falls_back_to_heading() {
        let src = "---\nnav: true\n---\n# From Heading\n\ntext";
        let record = parse_record("pages", &pages(), Path::new("a.md"), "pages/a.md", src).unwrap();
        assert_eq!(record.title, "From Heading");
    }

    #[test]
    fn no_frontmatter_uses_heading() {
        let record = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "# Plain\n",
        )
        .unwrap();
        assert_eq!(record.title, "Plain");
        assert_eq!(record.nav, NavMeta::default());
    }

    #[test]
    fn heading_inside_code_block_is_not_a_title() {
        let src = "---\nnav: true\n---\n```sh\n# install\n```\n\n# Real Title\n";
        let record = parse_record("pages", &pages(), Path::new("a.md"), "pages/a.md", src).unwrap();
        assert_eq!(record.title, "Real Title");
    }

    #[test]
    fn setext_heading_and_inline_code_in_title() {
        assert_eq!(first_heading("Using `cargo`\n===\n"), Some("Using cargo".to_string()));
    }

    #[test]
    fn only_code_block_heading_is_missing_title() {
        let result = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "```\n# not a heading\n```\n",
        );
        assert!(matches!(result, Err(RecordError::MissingTitle)));
    }

    #[test]
    fn leading_heading_detection() {
        assert!(starts_with_heading("\n# Title\n\ntext"));
        assert!(!starts_with_heading("intro\n\n# Title"));
        assert!(!starts_with_heading("```\n# comment\n```"));
        assert!(!starts_with_heading("## Section"));
    }

    #[test]
    fn missing_title_is_error() {
        let result = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "---\nnav: true\n---\nno heading",
        );
        assert!(matches!(result, Err(RecordError::MissingTitle)));
    }

    #[test]
    fn wrong_type_is_error() {
        let result = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "---\ntitle: A\nnav: [1, 2]\n---\n",
        );
        assert!(matches!(result, Err(RecordError::Frontmatter(_))));
    }

    #[test]
    fn unknown_keys_ignored() {
        let record = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "---\ntitle: A\nlayout: wide\n---\n",
        )
        .unwrap();
        assert_eq!(record.title, "A");
    }

    #[test]
    fn tags_default_to_empty() {
        let record = parse_record(
            "pages",
            &pages(),
            Path::new("a.md"),
            "pages/a.md",
            "---\ntitle: A\n---\n",
        )
        .unwrap();
        assert!(record.tags.is_empty());
    }
}
