//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks every collection declared in
//! `config.toml`, parses each markdown file into a [`PageRecord`], and builds
//! the navigation menu from the result.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── public/                      # Static assets → output root
//! ├── pages/                       # `pages` collection, routed at /
//! │   ├── index.md                 # → /
//! │   ├── about.md                 # → /about
//! │   └── about/
//! │       └── team.md              # → /about/team
//! └── blog/                        # `blog` collection, routed at /blog
//!     └── first-post.md            # → /blog/first-post
//! ```
//!
//! ## Validation
//!
//! - Front-matter must parse against the collection schema
//! - Every record needs a title (front-matter or first heading)
//! - No two records may resolve to the same route
//!
//! A collection whose directory doesn't exist is simply empty.

use crate::collection::{self, RecordError};
use crate::config::{self, SiteConfig};
use crate::nav;
use crate::types::{NavItem, PageRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
    #[error("Route {route} is produced by both {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub pages: Vec<PageRecord>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Records of one collection, in manifest order.
    pub fn collection<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PageRecord> + 'a {
        self.pages.iter().filter(move |p| p.collection == name)
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut pages = Vec::new();
    for (name, settings) in &config.collections {
        let dir = root.join(&settings.include);
        if !dir.is_dir() {
            tracing::debug!(collection = %name, dir = %dir.display(), "Collection directory missing");
            continue;
        }
        let before = pages.len();
        scan_collection(root, &dir, name, settings, &mut pages)?;
        tracing::debug!(collection = %name, records = pages.len() - before, "Collection scanned");
    }

    check_duplicate_routes(&pages)?;
    pages.sort_by(|a, b| (&a.collection, &a.path).cmp(&(&b.collection, &b.path)));

    let navigation = nav::build_navigation(&pages, &config.nav);

    Ok(Manifest {
        navigation,
        pages,
        config,
    })
}

fn scan_collection(
    root: &Path,
    dir: &Path,
    name: &str,
    settings: &config::CollectionConfig,
    pages: &mut Vec<PageRecord>,
) -> Result<(), ScanError> {
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let rel_path = path.strip_prefix(dir).unwrap_or(path);
        let source_path = display_path(path.strip_prefix(root).unwrap_or(path));
        let content = fs::read_to_string(path)?;

        let record = collection::parse_record(name, settings, rel_path, &source_path, &content)
            .map_err(|source| ScanError::Record {
                path: path.to_path_buf(),
                source,
            })?;
        pages.push(record);
    }
    Ok(())
}

fn check_duplicate_routes(pages: &[PageRecord]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for page in pages {
        if let Some(first) = seen.insert(&page.path, &page.source) {
            return Err(ScanError::DuplicateRoute {
                route: page.path.clone(),
                first: first.to_string(),
                second: page.source.clone(),
            });
        }
    }
    Ok(())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Relative path with `/` separators regardless of platform.
fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
