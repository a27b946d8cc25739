//! Escaped-fragment route parsing.
//!
//! Crawlers signal that they want a static snapshot of an SPA route by
//! sending the route in the `_escaped_fragment_` query parameter. Two
//! fragment shapes are recognized:
//!
//! - `/~/<mode>/<query-string>` — explicit mode plus `key=value` params
//!   (the SPA's long-form deep links), e.g. `/~/product/id=42&from=search`
//! - any path containing `/p/<digits>` or `/c/<digits>` — the short
//!   product/category permalinks, e.g. `/Electronics/p/42`
//!
//! Everything else yields no route and the caller falls back to the root
//! category listing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

#[allow(clippy::unwrap_used)] // patterns are literals, exercised by tests
static LONG_FORM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/~/([a-z]+)/(.*)$").unwrap());
#[allow(clippy::unwrap_used)]
static SHORT_FORM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r".*/(p|c)/([0-9]+)").unwrap());

/// Which entity kind a route addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    Product,
    Category,
}

/// A routing decision derived from the crawler fragment; consumed once per
/// request, never stored.
#[derive(Debug, Clone)]
pub struct Route {
    pub mode: RouteMode,
    pub id: u64,
    /// Extra `key=value` pairs from the long-form shape (`id` included).
    pub params: HashMap<String, String>,
}

/// Parse a raw (still percent-encoded) escaped fragment into a route.
///
/// Returns `None` for fragments that address neither a product nor a
/// category; the caller renders the root listing in that case.
#[must_use]
pub fn parse_route(raw_fragment: &str) -> Option<Route> {
    let fragment = urlencoding::decode(raw_fragment).ok()?;

    if let Some(caps) = LONG_FORM_RE.captures(&fragment) {
        let mode = match &caps[1] {
            "product" => RouteMode::Product,
            "category" => RouteMode::Category,
            _ => return None,
        };
        let params: HashMap<String, String> = url::form_urlencoded::parse(caps[2].as_bytes())
            .into_owned()
            .collect();
        let id = params.get("id")?.parse().ok()?;
        return Some(Route { mode, id, params });
    }

    if let Some(caps) = SHORT_FORM_RE.captures(&fragment) {
        let mode = if &caps[1] == "p" {
            RouteMode::Product
        } else {
            RouteMode::Category
        };
        let id = caps[2].parse().ok()?;
        return Some(Route {
            mode,
            id,
            params: HashMap::new(),
        });
    }

    None
}
