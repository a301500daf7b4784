//! Route segment parsing for the `N.name` ordering convention.
//!
//! Content files and directories may carry a numeric ordering prefix
//! followed by a dot (`1.getting-started.md`, `020.guides/`). The prefix
//! orders files on disk and is dropped from the URL:
//!
//! - `1.getting-started` → route segment `getting-started`
//! - `020.guides` → route segment `guides`
//! - `about` → route segment `about`
//! - `2024.recap` → route segment `recap`
//!
//! Menu order comes from `navOrder` only, so the number itself is discarded.

/// Route segment for an entry name following the `N.name` convention.
///
/// A name that is only digits, or only digits and a dot, is kept whole
/// since there'd be nothing left to route on.
pub fn route_segment(name: &str) -> &str {
    match name.split_once('.') {
        Some((prefix, rest)) if !rest.is_empty() && prefix.parse::<u32>().is_ok() => rest,
        _ => name,
    }
}
