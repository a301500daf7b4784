//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered on top of stock defaults: user files only
//! need the keys they want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "public"     # Copied verbatim into the output root
//!
//! [site]
//! name = "My Site"
//! title_template = "%s · My Site"   # %s is replaced by the page title
//! description = "A fast site built from markdown content."
//! lang = "en"
//!
//! [nav]
//! default_order = 999       # Order for items without navOrder
//! collections = ["pages"]   # Collections whose records feed the menu
//! links = [                 # Structural links not backed by content
//!   { label = "Library", to = "/library", order = 10 },
//!   { label = "Blog", to = "/blog", order = 20 },
//! ]
//!
//! [collections.blog]
//! include = "blog"          # Directory under the content root
//! prefix = "/blog"          # URL prefix for routes
//! listing = true            # Generate an index page at the prefix
//! title = "Blog"
//!
//! [collections.pages]
//! include = "pages"
//! prefix = "/"              # "pages" is stripped from URLs
//! ```
//!
//! ## Merging
//!
//! Tables merge key-by-key; arrays and scalars replace. Setting `nav.links`
//! therefore replaces the stock structural links entirely, while adding a
//! `[collections.docs]` table keeps `blog` and `pages`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::NavItem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory under the content root copied into the output root.
    pub assets_dir: String,
    /// Site-wide metadata used in page heads.
    pub site: SiteMeta,
    /// Navigation menu settings.
    pub nav: NavConfig,
    /// Content collections keyed by name.
    pub collections: BTreeMap<String, CollectionConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut collections = BTreeMap::new();
        collections.insert(
            "blog".to_string(),
            CollectionConfig {
                include: "blog".to_string(),
                prefix: "/blog".to_string(),
                listing: true,
                title: Some("Blog".to_string()),
            },
        );
        collections.insert(
            "pages".to_string(),
            CollectionConfig {
                include: "pages".to_string(),
                prefix: "/".to_string(),
                listing: false,
                title: None,
            },
        );
        Self {
            assets_dir: "public".to_string(),
            site: SiteMeta::default(),
            nav: NavConfig::default(),
            collections,
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.nav.default_order.is_finite() {
            return Err(ConfigError::Validation(
                "nav.default_order must be a finite number".into(),
            ));
        }
        for link in &self.nav.links {
            validate_link(link)?;
        }

        let mut includes = BTreeSet::new();
        for (name, collection) in &self.collections {
            if collection.include.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "collections.{name}.include must not be empty"
                )));
            }
            if !collection.prefix.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "collections.{name}.prefix must start with '/'"
                )));
            }
            if !includes.insert(collection.include.trim_matches('/')) {
                return Err(ConfigError::Validation(format!(
                    "collections.{name}.include '{}' is used by another collection",
                    collection.include
                )));
            }
        }

        for name in &self.nav.collections {
            if !self.collections.contains_key(name) {
                return Err(ConfigError::Validation(format!(
                    "nav.collections references unknown collection '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Render a page `<title>` through the site title template.
    pub fn page_title(&self, title: &str) -> String {
        if self.site.title_template.contains("%s") {
            self.site.title_template.replace("%s", title)
        } else {
            title.to_string()
        }
    }
}

fn validate_link(link: &NavItem) -> Result<(), ConfigError> {
    if link.label.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "nav link to '{}' has an empty label",
            link.to
        )));
    }
    if link.to.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "nav link '{}' has an empty target",
            link.label
        )));
    }
    if link.order.is_some_and(|o| !o.is_finite()) {
        return Err(ConfigError::Validation(format!(
            "nav link '{}' has a non-finite order",
            link.label
        )));
    }
    link.children.iter().try_for_each(validate_link)
}

/// Site-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site name shown in the header.
    pub name: String,
    /// Page title template; `%s` is replaced by the page title.
    pub title_template: String,
    /// Fallback meta description for pages without one.
    pub description: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "My Site".to_string(),
            title_template: "%s · My Site".to_string(),
            description: "A fast site built from markdown content.".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// Navigation menu settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Order used for items that don't specify one. High values sort last.
    pub default_order: f64,
    /// Collections whose records may appear in the menu.
    pub collections: Vec<String>,
    /// Structural links that are not derived from content.
    pub links: Vec<NavItem>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_order: 999.0,
            collections: vec!["pages".to_string()],
            links: vec![
                NavItem::new("Library", "/library", Some(10.0)),
                NavItem::new("Blog", "/blog", Some(20.0)),
            ],
        }
    }
}

/// A content collection: a directory of markdown records sharing one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Directory under the content root, scanned recursively.
    pub include: String,
    /// URL prefix for record routes.
    pub prefix: String,
    /// Generate a listing page at the prefix route.
    #[serde(default)]
    pub listing: bool,
    /// Heading of the listing page (defaults to the collection name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(
        collections = config.collections.len(),
        links = config.nav.links.len(),
        "Config loaded"
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge with the defaults key by key; arrays replace them.
# Unknown keys will cause an error.

# Directory under the content root copied verbatim into the output root.
assets_dir = "public"

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
name = "My Site"

# Page <title>; %s is replaced by the page title.
title_template = "%s · My Site"

# Meta description for pages that don't set their own.
description = "A fast site built from markdown content."

lang = "en"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Order given to menu items without navOrder. Lower sorts first.
default_order = 999

# Collections whose records can appear in the menu (front-matter `nav: true`).
collections = ["pages"]

# Structural links that don't come from markdown pages.
# Setting this replaces the whole list.
links = [
  { label = "Library", to = "/library", order = 10 },
  { label = "Blog", to = "/blog", order = 20 },
]

# ---------------------------------------------------------------------------
# Collections
# ---------------------------------------------------------------------------
# Blog posts live in content/blog/* and route under /blog/*.
[collections.blog]
include = "blog"
prefix = "/blog"
listing = true
title = "Blog"

# Pages live in content/pages/* but route at /<slug>.
[collections.pages]
include = "pages"
prefix = "/"
listing = false
"##
}
