//! # Simple Site
//!
//! A minimal static site builder for markdown content collections. Markdown
//! files with YAML front-matter are grouped into collections, validated,
//! routed, and rendered to plain HTML with a navigation menu driven by the
//! pages' own front-matter.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (records + navigation + config)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so the scan result (including the
//! computed menu) can be inspected before anything is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the collections, produces the manifest |
//! | [`generate`] | Stage 2: renders the HTML site from the manifest using Maud |
//! | [`nav`] | Builds the nested, ordered menu from nav-tagged records and structural links |
//! | [`collection`] | Front-matter schema, front-matter splitting, route computation |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared types serialized between stages (`PageRecord`, `NavItem`) |
//! | [`naming`] | `N.name` ordering-prefix parser for route segments |
//! | [`output`] | CLI output formatting |
//!
//! # Navigation
//!
//! The menu combines two sources: structural links from `config.toml` (routes
//! like `/library` that aren't markdown pages) and records that opt in with
//! `nav: true`. A record may name a parent with `navParent`, matched against
//! top-level items by path or label. A parent that doesn't exist never drops
//! the record: it is shown at the top level instead. See [`nav`] for the
//! exact rules.
//!
//! # Collections
//!
//! Each collection maps a directory to a URL prefix. The stock config has
//! `pages` (routed at `/`, so `pages/about.md` is `/about`) and `blog`
//! (routed at `/blog`, with a generated listing page).
//!
//! ```text
//! content/pages/about.md        →  /about
//! content/blog/first-post.md    →  /blog/first-post
//! ```

pub mod collection;
pub mod config;
pub mod generate;
pub mod nav;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
