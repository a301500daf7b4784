//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static HTML site.
//!
//! ## Generated Pages
//!
//! - **Record pages** (`/{route}/index.html`): one per markdown record
//! - **Listing pages** (`/{prefix}/index.html`): for collections with
//!   `listing = true`, unless a record already lives at the prefix
//!
//! Every page carries the site header with the navigation menu. The item
//! matching the current route (or one of its ancestors) is marked `current`.
//!
//! ## Features
//!
//! - **Title template**: `<title>` comes from `site.title_template`
//! - **Meta description**: page description, falling back to the site's
//! - **Post metadata**: date, category and tags under the page heading
//! - **Static assets**: `assets_dir` is copied verbatim into the output root
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Route /
//! ├── robots.txt                 # From public/
//! ├── about/
//! │   ├── index.html             # Route /about
//! │   └── team/
//! │       └── index.html         # Route /about/team
//! └── blog/
//!     ├── index.html             # Blog listing
//!     └── first-post/
//!         └── index.html
//! ```
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): templates are
//! type-checked Rust with automatic escaping.

use crate::collection;
use crate::config::{CollectionConfig, SiteConfig};
use crate::scan::Manifest;
use crate::types::{NavItem, PageRecord};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What kind of page a generated file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Record,
    Listing,
}

/// One generated HTML file, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub route: String,
    pub title: String,
    /// Output file relative to the output directory.
    pub file: PathBuf,
}

const CSS: &str = include_str!("../static/style.css");

/// Read the scan manifest and write the site.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    write_site(&manifest, source_root, output_dir)
}

/// Write every page of the manifest into `output_dir`.
pub fn write_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets = source_root.join(&manifest.config.assets_dir);
    if assets.is_dir() {
        copy_dir_recursive(&assets, output_dir)?;
        tracing::debug!(dir = %assets.display(), "Copied static assets");
    }

    let mut generated = Vec::new();

    for record in &manifest.pages {
        let html = render_record_page(record, manifest);
        generated.push(write_page(output_dir, PageKind::Record, &record.path, &record.title, html)?);
    }

    for (name, collection) in &manifest.config.collections {
        if !collection.listing {
            continue;
        }
        let route = listing_route(collection);
        if manifest.pages.iter().any(|p| p.path == route) {
            tracing::debug!(collection = %name, route = %route, "Listing skipped, page exists at prefix");
            continue;
        }
        let title = listing_title(name, collection);
        let html = render_listing_page(name, &route, &title, manifest);
        generated.push(write_page(output_dir, PageKind::Listing, &route, &title, html)?);
    }

    tracing::info!(pages = generated.len(), output = %output_dir.display(), "Site generated");
    Ok(generated)
}

fn write_page(
    output_dir: &Path,
    kind: PageKind,
    route: &str,
    title: &str,
    html: Markup,
) -> Result<GeneratedPage, GenerateError> {
    let file = route_to_file(route);
    let path = output_dir.join(&file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html.into_string())?;
    Ok(GeneratedPage {
        kind,
        route: route.to_string(),
        title: title.to_string(),
        file,
    })
}

/// Output file for a route: `/` → `index.html`, `/a/b` → `a/b/index.html`.
pub fn route_to_file(route: &str) -> PathBuf {
    let mut file = PathBuf::new();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        file.push(segment);
    }
    file.push("index.html");
    file
}

fn listing_route(collection: &CollectionConfig) -> String {
    let trimmed = collection.prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn listing_title(name: &str, collection: &CollectionConfig) -> String {
    collection.title.clone().unwrap_or_else(|| name.to_string())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Listing order: newest date first, undated last, then title.
///
/// Dates are compared as strings, which orders ISO-8601 dates correctly.
fn compare_listing(a: &PageRecord, b: &PageRecord) -> Ordering {
    match (&a.date, &b.date) {
        (Some(da), Some(db)) => db.cmp(da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    config: &SiteConfig,
    title: &str,
    description: Option<&str>,
    content: Markup,
) -> Markup {
    let description = description.unwrap_or(&config.site.description);
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(description);
                title { (config.page_title(title)) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with the site name and navigation menu
fn site_header(site_name: &str, nav: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (site_name) }
            nav.site-nav {
                (nav)
            }
        }
    }
}

/// Renders the navigation menu
pub fn render_nav(items: &[NavItem], current_path: &str) -> Markup {
    html! {
        ul.nav-menu {
            @for item in items {
                (render_nav_item(item, current_path))
            }
        }
    }
}

/// Renders a single navigation item (may have children)
fn render_nav_item(item: &NavItem, current_path: &str) -> Markup {
    let is_current = is_current(&item.to, current_path)
        || item.children.iter().any(|c| is_current(&c.to, current_path));

    html! {
        li class=[is_current.then_some("current")] {
            a href=(item.to) { (item.label) }
            @if !item.children.is_empty() {
                ul.nav-children {
                    @for child in &item.children {
                        (render_nav_item(child, current_path))
                    }
                }
            }
        }
    }
}

/// A nav target is current for its own route and every route below it.
/// The root only matches itself.
fn is_current(target: &str, current_path: &str) -> bool {
    let target = target.trim_end_matches('/');
    if target.is_empty() {
        return current_path == "/";
    }
    current_path == target
        || current_path
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Date, category and tags shown under a heading.
fn post_meta(record: &PageRecord) -> Markup {
    html! {
        @if record.date.is_some() || record.category.is_some() || !record.tags.is_empty() {
            p.post-meta {
                @if let Some(date) = &record.date {
                    time datetime=(date) { (date) }
                }
                @if let Some(category) = &record.category {
                    " · " span.post-category { (category) }
                }
                @if !record.tags.is_empty() {
                    " · "
                    span.post-tags {
                        @for (i, tag) in record.tags.iter().enumerate() {
                            @if i > 0 { ", " }
                            span.tag { (tag) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one record as a page
fn render_record_page(record: &PageRecord, manifest: &Manifest) -> Markup {
    let nav = render_nav(&manifest.navigation, &record.path);
    let body_html = markdown_to_html(&record.body);
    // Pages that open with their own H1 don't get a second one
    let has_heading = collection::starts_with_heading(&record.body);

    let content = html! {
        (site_header(&manifest.config.site.name, nav))
        main.page {
            article {
                @if !has_heading {
                    h1 { (record.title) }
                }
                (post_meta(record))
                @if let Some(image) = &record.image {
                    img.post-image src=(image) alt=(record.title);
                }
                (PreEscaped(body_html))
            }
        }
    };

    base_document(
        &manifest.config,
        &record.title,
        record.description.as_deref(),
        content,
    )
}

/// Renders a collection listing page
fn render_listing_page(name: &str, route: &str, title: &str, manifest: &Manifest) -> Markup {
    let nav = render_nav(&manifest.navigation, route);
    let mut records: Vec<&PageRecord> = manifest.collection(name).collect();
    records.sort_by(|a, b| compare_listing(a, b));

    let content = html! {
        (site_header(&manifest.config.site.name, nav))
        main.listing {
            h1 { (title) }
            @if records.is_empty() {
                p.empty { "Nothing here yet." }
            }
            @for record in &records {
                article.listing-entry {
                    @if let Some(image) = &record.image {
                        a href=(record.path) {
                            img.listing-image src=(image) alt=(record.title) loading="lazy";
                        }
                    }
                    h2 { a href=(record.path) { (record.title) } }
                    (post_meta(record))
                    @if let Some(teaser) = record.teaser() {
                        p.teaser { (teaser) }
                    }
                }
            }
        }
    };

    base_document(&manifest.config, title, None, content)
}

// ============================================================================
// Tests
// ============================================================================
