//! Integration tests for the catalog synchronizer: refresh with fallback,
//! favorite durability across refreshes, and the submission flow.

use serde_json::json;
use shelfarr::clients::catalog::CatalogClient;
use shelfarr::config::CatalogConfig;
use shelfarr::db::Store;
use shelfarr::models::product::{NewProduct, ProductType};
use shelfarr::services::sync::{CatalogSynchronizer, RefreshSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn memory_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("in-memory store should initialize")
}

fn client_for(base_url: &str) -> CatalogClient {
    CatalogClient::new(&CatalogConfig {
        base_url: base_url.to_string(),
        request_timeout_seconds: 5,
    })
    .expect("client construction should not fail")
}

async fn synchronizer_for(base_url: &str) -> CatalogSynchronizer {
    CatalogSynchronizer::new(client_for(base_url), memory_store().await)
}

fn product_json(name: &str, price: f64) -> serde_json::Value {
    json!({
        "product_name": name,
        "product_type": "Product",
        "price": price,
        "tax": 18.0,
        "image": ""
    })
}

fn new_product(name: &str, price: f64, tax: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        product_type: ProductType::Electronics,
        price,
        tax,
    }
}

#[tokio::test]
async fn refresh_populates_working_set_and_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Laptop", 899.0),
            product_json("Mouse", 19.5),
            product_json("Keyboard", 49.0),
        ])))
        .mount(&server)
        .await;

    let store = memory_store().await;
    let sync = CatalogSynchronizer::new(client_for(&server.uri()), store.clone());
    let outcome = sync.refresh().await;

    assert_eq!(outcome.source, RefreshSource::Remote);
    assert_eq!(outcome.count, 3);
    assert!(outcome.remote_error.is_none());
    assert!(!sync.is_loading());

    let products = sync.products().await;
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|p| !p.is_favorite));

    let view = sync.filtered_products("").await;
    assert_eq!(view.len(), 3);

    // Every fetched product was written through to the cache by name.
    let mut cached: Vec<String> = store
        .fetch_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product_name)
        .collect();
    cached.sort();
    assert_eq!(cached, vec!["Keyboard", "Laptop", "Mouse"]);
}

#[tokio::test]
async fn refresh_failure_falls_back_to_cached_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Laptop", 899.0),
            product_json("Mouse", 19.5),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let store = memory_store().await;

    // First refresh succeeds and seeds the cache.
    let sync = CatalogSynchronizer::new(client.clone(), store.clone());
    let outcome = sync.refresh().await;
    assert_eq!(outcome.source, RefreshSource::Remote);

    // A fresh session against a now-failing remote serves the cache.
    let offline = CatalogSynchronizer::new(client, store);
    let outcome = offline.refresh().await;

    assert_eq!(outcome.source, RefreshSource::Cache);
    assert_eq!(outcome.count, 2);
    assert!(outcome.remote_error.is_some());
    assert!(!offline.is_loading());

    let mut names: Vec<String> = offline
        .products()
        .await
        .into_iter()
        .map(|p| p.product_name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Laptop", "Mouse"]);
}

#[tokio::test]
async fn refresh_failure_with_empty_cache_yields_empty_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sync = synchronizer_for(&server.uri()).await;
    let outcome = sync.refresh().await;

    assert_eq!(outcome.source, RefreshSource::Cache);
    assert_eq!(outcome.count, 0);
    assert!(sync.products().await.is_empty());
}

#[tokio::test]
async fn favorites_survive_a_successful_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Alpha", 10.0),
            product_json("Beta", 20.0),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Second fetch: Beta is gone, Gamma is new.
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Gamma", 30.0),
            product_json("Alpha", 10.0),
        ])))
        .mount(&server)
        .await;

    let sync = synchronizer_for(&server.uri()).await;
    sync.refresh().await;

    assert!(sync.toggle_favorite("Alpha").await);

    let outcome = sync.refresh().await;
    assert_eq!(outcome.source, RefreshSource::Remote);
    assert_eq!(outcome.count, 2);

    let products = sync.products().await;
    let names: Vec<&str> = products.iter().map(|p| p.product_name.as_str()).collect();

    // Alpha kept its flag and sorts first; Beta dropped out of the set.
    assert_eq!(names, vec!["Alpha", "Gamma"]);
    assert!(products[0].is_favorite);
    assert!(!products[1].is_favorite);
}

#[tokio::test]
async fn toggle_favorite_flips_only_the_named_product() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Alpha", 10.0),
            product_json("Beta", 20.0),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let store = memory_store().await;
    let sync = CatalogSynchronizer::new(client, store.clone());
    sync.refresh().await;

    assert!(sync.toggle_favorite("Beta").await);

    let products = sync.products().await;
    for product in &products {
        assert_eq!(product.is_favorite, product.product_name == "Beta");
    }

    let favorites = store.favorite_names().await.unwrap();
    assert_eq!(favorites.get("Beta"), Some(&true));
    assert_eq!(favorites.get("Alpha"), None);

    // Toggling again flips it back and persists the new value.
    assert!(sync.toggle_favorite("Beta").await);
    let favorites = store.favorite_names().await.unwrap();
    assert_eq!(favorites.get("Beta"), Some(&false));
}

#[tokio::test]
async fn toggle_favorite_on_absent_product_is_a_no_op() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("Alpha", 10.0),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let store = memory_store().await;
    let sync = CatalogSynchronizer::new(client, store.clone());
    sync.refresh().await;

    assert!(!sync.toggle_favorite("Nope").await);

    let products = sync.products().await;
    assert_eq!(products.len(), 1);
    assert!(!products[0].is_favorite);
    assert!(store.favorite_names().await.unwrap().is_empty());
}

#[tokio::test]
async fn validation_failure_blocks_submission_before_any_network_call() {
    let server = MockServer::start().await;

    let sync = synchronizer_for(&server.uri()).await;

    let outcome = sync.add_product(new_product("", 10.0, 5.0), None).await;
    assert!(!outcome.success);
    assert_eq!(outcome.title, "Error");
    assert_eq!(outcome.message, "Product name is required");

    let outcome = sync.add_product(new_product("Desk", 0.0, 5.0), None).await;
    assert_eq!(outcome.message, "Invalid price");

    let outcome = sync.add_product(new_product("Desk", 10.0, -1.0), None).await;
    assert_eq!(outcome.message, "Invalid tax rate");

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn successful_submission_reports_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Product added Successfully!"
        })))
        .mount(&server)
        .await;

    let sync = synchronizer_for(&server.uri()).await;
    let outcome = sync.add_product(new_product("Desk", 120.0, 5.0), None).await;

    assert!(outcome.success);
    assert_eq!(outcome.title, "Success");
    assert_eq!(outcome.message, "Product added successfully");
}

#[tokio::test]
async fn rejected_submission_reports_failure_without_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sync = synchronizer_for(&server.uri()).await;
    let outcome = sync.add_product(new_product("Desk", 120.0, 5.0), None).await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Product not added");
}
