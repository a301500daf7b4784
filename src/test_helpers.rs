//! Shared test utilities for the simple-site test suite.
//!
//! Provides fixture setup, record lookups, and navigation tree assertions
//! that work with scan-phase data (`Manifest`, `PageRecord`).
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let team = find_page(&manifest, "/about/team");
//! assert_eq!(team.title, "Our Team");
//!
//! assert_nav_shape(&manifest, &[
//!     ("Home", &[]),
//!     ("About", &["Team", "History"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::PageRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with a clear message on miss
// =========================================================================

/// Find a record by route. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, route: &str) -> &'a PageRecord {
    manifest
        .pages
        .iter()
        .find(|p| p.path == route)
        .unwrap_or_else(|| {
            let routes: Vec<&str> = manifest.pages.iter().map(|p| p.path.as_str()).collect();
            panic!("page '{route}' not found. Available: {routes:?}")
        })
}

/// Routes of one collection in manifest order.
pub fn page_paths<'a>(manifest: &'a Manifest, collection: &'a str) -> Vec<&'a str> {
    manifest
        .collection(collection)
        .map(|p| p.path.as_str())
        .collect()
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Top-level navigation labels in order.
pub fn nav_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .navigation
        .iter()
        .map(|n| n.label.as_str())
        .collect()
}

/// Child labels under a given nav parent. Panics if parent not found.
pub fn nav_children_titles<'a>(manifest: &'a Manifest, parent_label: &str) -> Vec<&'a str> {
    manifest
        .navigation
        .iter()
        .find(|n| n.label == parent_label)
        .map(|n| n.children.iter().map(|c| c.label.as_str()).collect())
        .unwrap_or_else(|| {
            let titles = nav_titles(manifest);
            panic!("nav item '{parent_label}' not found. Available: {titles:?}")
        })
}

/// Assert that the full navigation tree matches an expected shape.
///
/// Each entry is `(label, children)`. Use `&[]` for leaf nodes.
pub fn assert_nav_shape(manifest: &Manifest, expected: &[(&str, &[&str])]) {
    let actual: Vec<&str> = nav_titles(manifest);
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(actual, expected_titles, "nav top-level labels mismatch");

    for (label, children) in expected {
        let actual_children = nav_children_titles(manifest, label);
        assert_eq!(
            actual_children,
            children.to_vec(),
            "nav children of '{label}' mismatch"
        );
    }
}
