//! # shopsnap-core
//!
//! Core functionality for shopsnap - a crawler snapshot renderer for hash-routed
//! storefronts.
//!
//! Search crawlers that cannot execute the storefront SPA request a static
//! snapshot by passing the route in the `_escaped_fragment_` query parameter.
//! This crate fetches the addressed catalog entities from the store API and
//! renders the same content the SPA would show, as an indented HTML fragment
//! plus title, meta description, and canonical URL.
//!
//! ## Architecture
//!
//! The crate is organized around several key components:
//!
//! - **Transport**: A thin HTTP fetcher that reports statuses as data
//! - **Catalog Client**: Paginated, memoized access to store API resources
//! - **Catalog Facade**: Deterministic HTML rendering of products and categories
//! - **Fragment Router**: Escaped-fragment parsing into product/category routes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopsnap_core::{Catalog, StoreConfig};
//!
//! # async fn example() -> shopsnap_core::Result<()> {
//! let config = StoreConfig::new(1003, "public_token", "https://shop.example/");
//! let mut catalog = Catalog::new(config)?;
//!
//! let snapshot = catalog.render_snapshot(Some("/Kitchen/p/42")).await;
//! println!("{}", snapshot.html);
//! println!("title: {}", snapshot.title);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Hard failures (bad configuration, transport breakdown) surface as
//! [`Result<T, Error>`]. Catalog API refusals are soft: lookups return `None`
//! or partial lists, the failure is recorded on the client, and rendering
//! degrades to an empty fragment. A crawler request never turns into an
//! error page because one entity was unreachable.

/// Catalog facade rendering HTML snapshots
pub mod catalog;
/// Stateful catalog API client with pagination and caching
pub mod client;
/// Store configuration from TOML files or environment
pub mod config;
/// Error types and result aliases
pub mod error;
/// HTTP transport returning statuses as data
pub mod fetcher;
/// Indented fragment writing and HTML escaping
pub mod html;
/// Escaped-fragment route parsing
pub mod route;
/// Meta-description preparation
pub mod seo;
/// Core data types for catalog entities and snapshots
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use client::{ApiError, CatalogClient};
pub use config::{StoreConfig, DEFAULT_API_ENDPOINT};
pub use error::{Error, Result};
pub use fetcher::{FetchOutcome, Fetcher};
pub use html::{esc_attr, esc_html, FragmentWriter};
pub use route::{parse_route, Route, RouteMode};
pub use seo::{prepare_meta_description, META_DESCRIPTION_LIMIT};
pub use types::*;
