//! End-to-end snapshot rendering against a mocked store API.

use serde_json::json;
use shopsnap_core::{Catalog, StoreConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> Catalog {
    let mut config =
        StoreConfig::new(1003, "test-token", "https://shop.example/").with_endpoint(server.uri());
    config.timeout_seconds = 2;
    Catalog::new(config).expect("catalog construction")
}

async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/1003/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "formatsAndUnits": {"currency": "USD"}
        })))
        .mount(server)
        .await;
}

async fn mount_empty_list(server: &MockServer, resource: &str) {
    Mock::given(method("GET"))
        .and(path(resource))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0, "count": 0, "offset": 0, "items": []
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn product_snapshot_from_short_permalink() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/1003/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Copper Whisk",
            "sku": "CW-42",
            "price": 14.5,
            "quantity": 3,
            "description": "<p>Balloon whisk, copper wire.</p>",
            "seoTitle": "Copper Whisk | Example Kitchen",
            "seoDescription": "A hand-tinned copper balloon whisk.",
            "url": "https://store.example/shop#!/Copper-Whisk/p/42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server);
    let snapshot = catalog.render_snapshot(Some("/Kitchen/p/42")).await;

    assert!(snapshot
        .html
        .starts_with("<div itemscope itemtype=\"http://schema.org/Product\">"));
    assert!(snapshot.html.contains("itemprop=\"name\">Copper Whisk</h2>"));
    assert!(snapshot.html.contains("Price: <span itemprop=\"price\">14.5</span>"));
    assert!(snapshot.html.contains("In stock"));
    assert!(snapshot
        .html
        .contains("document.location.hash = '!/Kitchen/p/42';"));

    assert_eq!(snapshot.title, "Copper Whisk | Example Kitchen");
    assert_eq!(snapshot.description, "A hand-tinned copper balloon whisk.");
    assert_eq!(snapshot.canonical_url, "https://shop.example/#!/Copper-Whisk/p/42");
}

#[tokio::test]
async fn category_snapshot_walks_paginated_product_list() {
    let server = MockServer::start().await;
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path("/1003/categories/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Kitchen", "description": "Tools for cooks"
        })))
        .mount(&server)
        .await;
    mount_empty_list(&server, "/1003/categories").await;
    // Products arrive in two pages.
    for (offset, ids) in [(0u64, 1..=2), (2, 3..=3)] {
        let items: Vec<_> = ids
            .map(|id| json!({"id": id, "name": format!("Tool {id}"), "sku": format!("T-{id}"), "price": id}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/1003/products"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 3, "count": items.len(), "offset": offset, "items": items
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut catalog = catalog_for(&server);
    let snapshot = catalog.render_snapshot(Some("/~/category/id=7")).await;

    assert!(snapshot.html.starts_with("<h2>Kitchen</h2>\n"));
    for id in 1..=3 {
        assert!(snapshot
            .html
            .contains(&format!("<a href=\"https://shop.example/#!/p/{id}\">Tool {id}</a>")));
    }
    assert!(snapshot.html.contains("<span class=\"product_price\">3 USD</span>"));
    assert_eq!(snapshot.title, "Kitchen");
    assert_eq!(snapshot.description, "Tools for cooks");
}

#[tokio::test]
async fn unreachable_store_degrades_to_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("token rejected"))
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server);
    let snapshot = catalog.render_snapshot(Some("/p/42")).await;

    // The fragment body is empty apart from the hash-restore script and the
    // metadata falls back to blanks; no error escapes to the caller.
    assert!(snapshot.html.starts_with("<script"));
    assert_eq!(snapshot.title, "");
    assert_eq!(snapshot.description, "empty");
    assert_eq!(snapshot.canonical_url, "https://shop.example/#!/p/42");
}
