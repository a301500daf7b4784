//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity leads
//! with its positional index and title; routes and source files follow as
//! indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! blog (2 records)
//! 001 First Post
//!     Route: /blog/first-post
//!     Source: blog/first-post.md
//!
//! pages (8 records)
//! 001 Welcome [nav]
//!     Route: /
//!     Source: pages/index.md
//!
//! Config
//!     config.toml
//!     public/
//! ```
//!
//! ## Navigation
//!
//! ```text
//! 001 Home → / (1)
//! 002 Library → /library (10)
//! 003 About → /about (30)
//!     001 Team → /about/team (2)
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Welcome → index.html
//! 002 About Us → about/index.html
//! 003 Blog (listing) → blog/index.html
//!
//! Generated 10 pages, 1 listing
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::CONFIG_FILE;
use crate::generate::{GeneratedPage, PageKind};
use crate::scan::Manifest;
use crate::types::NavItem;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an order for display: integers without a fractional part.
fn format_order(order: f64) -> String {
    if order.fract() == 0.0 {
        format!("{}", order as i64)
    } else {
        format!("{}", order)
    }
}

/// Path display with forward slashes.
fn display_file(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan output: records grouped by collection, then config files.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for name in manifest.config.collections.keys() {
        let records: Vec<_> = manifest.collection(name).collect();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let noun = if records.len() == 1 { "record" } else { "records" };
        lines.push(format!("{} ({} {})", name, records.len(), noun));

        for (i, record) in records.iter().enumerate() {
            let marker = if record.nav.visible { " [nav]" } else { "" };
            lines.push(format!("{} {}{}", format_index(i + 1), record.title, marker));
            lines.push(format!("    Route: {}", record.path));
            lines.push(format!("    Source: {}", record.source));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILE).exists() {
        lines.push(format!("    {}", CONFIG_FILE));
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Navigation output
// ============================================================================

/// Format the navigation tree, one item per line, children indented.
pub fn format_nav_tree(items: &[NavItem], default_order: f64) -> Vec<String> {
    let mut lines = Vec::new();
    format_nav_level(items, 0, default_order, &mut lines);
    lines
}

fn format_nav_level(items: &[NavItem], depth: usize, default_order: f64, lines: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        let order = format_order(item.order.unwrap_or(default_order));
        lines.push(format!(
            "{}{} {} \u{2192} {} ({})",
            indent(depth),
            format_index(i + 1),
            item.label,
            item.to,
            order
        ));
        format_nav_level(&item.children, depth + 1, default_order, lines);
    }
}

/// Print the navigation tree to stdout.
pub fn print_nav_tree(items: &[NavItem], default_order: f64) {
    for line in format_nav_tree(items, default_order) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every written file with its title.
pub fn format_generate_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        let kind = match page.kind {
            PageKind::Record => "",
            PageKind::Listing => " (listing)",
        };
        lines.push(format!(
            "{} {}{} \u{2192} {}",
            format_index(i + 1),
            page.title,
            kind,
            display_file(&page.file)
        ));
    }

    let listings = pages.iter().filter(|p| p.kind == PageKind::Listing).count();
    let records = pages.len() - listings;
    lines.push(String::new());
    lines.push(format!(
        "Generated {} {}, {} {}",
        records,
        if records == 1 { "page" } else { "pages" },
        listings,
        if listings == 1 { "listing" } else { "listings" }
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(pages: &[GeneratedPage]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}
