//! Catalog API client with per-instance memoization.
//!
//! The client wraps the raw [`Fetcher`] with three concerns:
//!
//! - URL construction for the store's API resources
//! - cursor pagination for list endpoints, transparently collecting all
//!   pages into one `Vec`
//! - per-entity caching so repeated lookups within one snapshot render hit
//!   the network at most once
//!
//! Failures are soft. A non-200 response or a transport error is recorded
//! in [`CatalogClient::last_error`] and the lookup returns `None` (or a
//! possibly-truncated list); the renderer degrades to silence instead of
//! aborting the crawler request. Failed lookups are never cached, so a
//! later call retries the network.

use crate::config::StoreConfig;
use crate::fetcher::Fetcher;
use crate::types::{Category, Page, Product, Profile};
use crate::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// The last soft failure the catalog API handed back.
///
/// `status` is `0` when the failure was transport-level (no response at
/// all) rather than an HTTP error status.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

/// Stateful catalog API client for one store.
///
/// Caches are per-instance and unbounded; a client is expected to live for
/// one snapshot render (a handful of entities), not as a long-running
/// shared service.
pub struct CatalogClient {
    fetcher: Fetcher,
    config: StoreConfig,
    products: HashMap<u64, Product>,
    categories: HashMap<u64, Category>,
    profile: Option<Profile>,
    last_error: Option<ApiError>,
}

impl CatalogClient {
    /// Create a client for the given store.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let fetcher = Fetcher::with_timeout(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self {
            fetcher,
            config,
            products: HashMap::new(),
            categories: HashMap::new(),
            profile: None,
            last_error: None,
        })
    }

    /// The store configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The most recent soft failure, if the last request had one.
    ///
    /// Cleared by every successful request, so after a call returns this
    /// reflects whether that call (or, for lists, its final page) failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Fetch a single product, memoized per client instance.
    pub async fn get_product(&mut self, id: u64) -> Option<Product> {
        if let Some(product) = self.products.get(&id) {
            return Some(product.clone());
        }
        let url = self.resource_url(&format!("products/{id}"), &[]);
        let product: Product = self.request_json(&url).await?;
        self.products.insert(id, product.clone());
        Some(product)
    }

    /// Fetch a single category, memoized per client instance.
    pub async fn get_category(&mut self, id: u64) -> Option<Category> {
        if let Some(category) = self.categories.get(&id) {
            return Some(category.clone());
        }
        let url = self.resource_url(&format!("categories/{id}"), &[]);
        let category: Category = self.request_json(&url).await?;
        self.categories.insert(id, category.clone());
        Some(category)
    }

    /// Fetch the store profile, memoized per client instance.
    pub async fn get_profile(&mut self) -> Option<Profile> {
        if let Some(profile) = &self.profile {
            return Some(profile.clone());
        }
        let url = self.resource_url("profile", &[]);
        let profile: Profile = self.request_json(&url).await?;
        self.profile = Some(profile.clone());
        Some(profile)
    }

    /// All enabled categories in the store, across every page.
    pub async fn get_all_categories(&mut self) -> Vec<Category> {
        let url = self.resource_url("categories", &[("enabled", "true")]);
        self.fetch_all_pages(&url).await
    }

    /// Enabled direct subcategories of a category. `parent = 0` lists the
    /// root categories.
    pub async fn get_subcategories(&mut self, parent: u64) -> Vec<Category> {
        let parent = parent.to_string();
        let url = self.resource_url("categories", &[("parent", &parent), ("enabled", "true")]);
        self.fetch_all_pages(&url).await
    }

    /// All enabled products in the store, across every page.
    pub async fn get_all_products(&mut self) -> Vec<Product> {
        let url = self.resource_url("products", &[("enabled", "true")]);
        self.fetch_all_pages(&url).await
    }

    /// Enabled products assigned to a category.
    pub async fn get_products_by_category(&mut self, category: u64) -> Vec<Product> {
        let category = category.to_string();
        let url = self.resource_url("products", &[("category", &category), ("enabled", "true")]);
        self.fetch_all_pages(&url).await
    }

    /// Whether the API answers for this store and token.
    ///
    /// Probes the profile endpoint (memoized like any other lookup) and
    /// reports whether it succeeded. Used to gate speculative fetches such
    /// as resolving a bare entity id to its public URL.
    pub async fn is_api_enabled(&mut self) -> bool {
        self.get_profile().await.is_some()
    }

    /// GET a resource and deserialize its JSON body.
    ///
    /// A 200 response parses and clears `last_error`; anything else records
    /// an [`ApiError`] and yields `None`. Transport failures are recorded
    /// with status `0`.
    async fn request_json<T: DeserializeOwned>(&mut self, url: &str) -> Option<T> {
        let outcome = match self.fetcher.fetch(url).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%url, error = %err, "catalog request failed in transport");
                self.last_error = Some(ApiError {
                    status: 0,
                    message: err.to_string(),
                });
                return None;
            }
        };

        if !outcome.is_ok() {
            debug!(%url, status = outcome.status, "catalog request rejected");
            self.last_error = Some(ApiError {
                status: outcome.status,
                message: outcome.body,
            });
            return None;
        }

        match serde_json::from_str(&outcome.body) {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                warn!(%url, error = %err, "catalog response body is not valid JSON");
                self.last_error = Some(ApiError {
                    status: outcome.status,
                    message: err.to_string(),
                });
                None
            }
        }
    }

    /// Collect every page of a list endpoint by advancing the offset cursor.
    ///
    /// Stops once `offset + count` reaches the reported total, or when a
    /// page comes back empty or fails. A mid-stream failure yields the
    /// pages collected so far; the truncation is observable through
    /// [`Self::last_error`].
    async fn fetch_all_pages<T: DeserializeOwned>(&mut self, base_url: &str) -> Vec<T> {
        let mut items = Vec::new();
        let mut cursor = 0u64;

        loop {
            let url = format!("{base_url}&offset={cursor}");
            let Some(page) = self.request_json::<Page<T>>(&url).await else {
                warn!(%base_url, collected = items.len(), "pagination stopped early");
                return items;
            };

            // A zero-count page cannot advance the cursor.
            if page.count == 0 {
                return items;
            }

            cursor = page.offset + page.count;
            items.extend(page.items);

            if cursor >= page.total {
                return items;
            }
        }
    }

    /// Build `<endpoint>/<store_id>/<resource>?<filters>&token=<token>`.
    fn resource_url(&self, resource: &str, filters: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}/{}?",
            self.config.api_endpoint, self.config.store_id, resource
        );
        for (key, value) in filters {
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("token=");
        url.push_str(&urlencoding::encode(&self.config.token));
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> StoreConfig {
        StoreConfig::new(1003, "test-token", "https://shop.example/")
            .with_endpoint(server.uri())
    }

    fn product_json(id: u64) -> serde_json::Value {
        json!({"id": id, "name": format!("Product {id}"), "sku": format!("SKU-{id}"), "price": 9.5})
    }

    #[tokio::test]
    async fn pagination_walks_every_page_in_order() {
        let server = MockServer::start().await;
        // 157 items served in pages of 50; offsets 0, 50, 100, 150.
        for (offset, count) in [(0u64, 50u64), (50, 50), (100, 50), (150, 7)] {
            let items: Vec<_> = (offset..offset + count).map(product_json).collect();
            Mock::given(method("GET"))
                .and(path("/1003/products"))
                .and(query_param("offset", offset.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "total": 157, "count": count, "offset": offset, "items": items
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        let products = client.get_all_products().await;

        assert_eq!(products.len(), 157);
        assert_eq!(products[0].id, 0);
        assert_eq!(products[156].id, 156);
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn pagination_failure_keeps_collected_prefix() {
        let server = MockServer::start().await;
        for offset in [0u64, 50] {
            let items: Vec<_> = (offset..offset + 50).map(product_json).collect();
            Mock::given(method("GET"))
                .and(path("/1003/products"))
                .and(query_param("offset", offset.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "total": 157, "count": 50, "offset": offset, "items": items
                })))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/1003/products"))
            .and(query_param("offset", "100"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        let products = client.get_all_products().await;

        // First two pages survive; the truncation is visible on the client.
        assert_eq!(products.len(), 100);
        let err = client.last_error().unwrap();
        assert_eq!(err.status, 500);
    }

    #[tokio::test]
    async fn zero_count_page_terminates_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 10, "count": 0, "offset": 0, "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        assert!(client.get_all_products().await.is_empty());
    }

    #[tokio::test]
    async fn product_lookups_are_memoized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/products/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(42)))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        let first = client.get_product(42).await.unwrap();
        let second = client.get_product(42).await.unwrap();

        assert_eq!(first.name, "Product 42");
        assert_eq!(second.name, "Product 42");
    }

    #[tokio::test]
    async fn failed_lookups_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/products/42"))
            .respond_with(ResponseTemplate::new(500).set_body_string("flake"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1003/products/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(42)))
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();

        assert!(client.get_product(42).await.is_none());
        assert_eq!(client.last_error().unwrap().status, 500);

        // Retry reaches the network again and succeeds.
        let product = client.get_product(42).await.unwrap();
        assert_eq!(product.id, 42);
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn resource_urls_carry_filters_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/products"))
            .and(query_param("category", "7"))
            .and(query_param("enabled", "true"))
            .and(query_param("token", "test-token"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1, "count": 1, "offset": 0, "items": [product_json(1)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        let products = client.get_products_by_category(7).await;
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn api_enabled_reflects_profile_reachability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/profile"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad token"))
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        assert!(!client.is_api_enabled().await);
        assert_eq!(client.last_error().unwrap().status, 403);
    }

    #[tokio::test]
    async fn malformed_json_is_a_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1003/products/9"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let mut client = CatalogClient::new(test_config(&server)).unwrap();
        assert!(client.get_product(9).await.is_none());
        assert_eq!(client.last_error().unwrap().status, 200);
    }
}
