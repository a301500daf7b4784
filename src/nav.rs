//! Navigation tree builder.
//!
//! Turns flat, nav-tagged page records plus the structural links from
//! `config.toml` into the ordered, nested menu rendered on every page.
//!
//! ## Rules
//!
//! - Only records from the configured nav collections with `nav: true` appear.
//! - Label is `navTitle`, else `title`, else `(Untitled)`. Target is the
//!   record's route, else `/`.
//! - Records without `navParent` become top-level items. Records with one are
//!   nested under the top-level item whose path or label matches the key
//!   (case-insensitive, leading slash ignored).
//! - A record whose parent matches nothing becomes a top-level item.
//! - Every level is sorted by order (missing = `nav.default_order`), then by
//!   label. Structural links are merged into the top level before sorting.
//!
//! ```text
//! about.md      nav: true, navOrder: 30          About (30)
//! team.md       nav: true, navParent: /About      └── Team
//! contact.md    nav: true, navParent: company    Contact (999)
//! privacy.md    (no nav)                         -
//! ```

use crate::config::NavConfig;
use crate::types::{NavItem, PageRecord};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Label used when a record has neither `navTitle` nor `title`.
pub const UNTITLED_LABEL: &str = "(Untitled)";

/// A record reduced to what the menu needs.
#[derive(Debug, Clone, PartialEq)]
struct NavLink {
    label: String,
    to: String,
    order: f64,
    parent: Option<String>,
}

impl NavLink {
    fn from_record(record: &PageRecord, default_order: f64) -> Self {
        let to = if record.path.is_empty() {
            "/".to_string()
        } else {
            record.path.clone()
        };
        let label = [record.nav.title.as_deref(), Some(record.title.as_str())]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or(UNTITLED_LABEL)
            .to_string();
        Self {
            label,
            to,
            order: record.nav.order.unwrap_or(default_order),
            parent: record.nav.parent.clone().filter(|p| !p.is_empty()),
        }
    }

    fn into_item(self) -> NavItem {
        NavItem::new(self.label, self.to, Some(self.order))
    }
}

/// Normalize a parent key or candidate parent path/label for matching.
///
/// One leading slash is stripped before trimming, so `"/About "` and
/// `"about"` both become `"about"` while `" /about"` keeps its slash.
pub fn normalize_parent_key(key: &str) -> String {
    key.strip_prefix('/').unwrap_or(key).trim().to_lowercase()
}

/// Menu ordering: order ascending, then label.
///
/// Labels compare alphabetically ignoring case and accents, so `Équipe`
/// sorts with the `e`s. Unaccented before accented, then lowercase first.
pub fn compare_nav_items(a: &NavItem, b: &NavItem, default_order: f64) -> Ordering {
    let order_a = a.order.unwrap_or(default_order);
    let order_b = b.order.unwrap_or(default_order);
    order_a
        .total_cmp(&order_b)
        .then_with(|| compare_labels(&a.label, &b.label))
}

/// Lowercased label with diacritics removed (NFD, combining marks dropped).
fn collation_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Sort a level and every level below it.
fn sort_items(items: &mut [NavItem], default_order: f64) {
    items.sort_by(|a, b| compare_nav_items(a, b, default_order));
    for item in items.iter_mut() {
        sort_items(&mut item.children, default_order);
    }
}

/// Build the navigation menu from records and the configured structural links.
pub fn build_navigation(records: &[PageRecord], config: &NavConfig) -> Vec<NavItem> {
    let default_order = config.default_order;
    let links: Vec<NavLink> = records
        .iter()
        .filter(|r| r.nav.visible && config.collections.contains(&r.collection))
        .map(|r| NavLink::from_record(r, default_order))
        .collect();

    let (children, roots): (Vec<NavLink>, Vec<NavLink>) =
        links.into_iter().partition(|l| l.parent.is_some());

    let mut parents: Vec<NavItem> = roots.into_iter().map(NavLink::into_item).collect();

    // Later parents win on key collisions
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, parent) in parents.iter().enumerate() {
        index.insert(normalize_parent_key(&parent.to), i);
        index.insert(normalize_parent_key(&parent.label), i);
    }

    for child in children {
        let key = normalize_parent_key(child.parent.as_deref().unwrap_or_default());
        match index.get(&key) {
            Some(&i) => parents[i].children.push(child.into_item()),
            None => {
                tracing::warn!(
                    page = %child.to,
                    parent = child.parent.as_deref().unwrap_or_default(),
                    "Nav parent not found, showing page at top level"
                );
                parents.push(child.into_item());
            }
        }
    }

    let mut combined: Vec<NavItem> = config.links.clone();
    combined.extend(parents);
    sort_items(&mut combined, default_order);

    tracing::debug!(top_level = combined.len(), "Navigation built");
    combined
}
