//! Integration tests for the eBay adapter.
//!
//! These tests run the client against a wiremock server standing in for the
//! Sell Inventory API and check the fetch-merge-put flow, error
//! classification and the group lookup fallback.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use shopify_ebay_sync::auth::{StaticTokenProvider, Token};
use shopify_ebay_sync::ebay::EbayClient;
use shopify_ebay_sync::{EbayConfig, HostUrl, SyncError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "/sell/inventory/v1";

fn create_client(server: &MockServer) -> EbayClient {
    create_client_with_token(server, Token::new("test-token"))
}

fn create_client_with_token(server: &MockServer, token: Token) -> EbayClient {
    let config = EbayConfig::builder()
        .api_url(HostUrl::new(server.uri()).unwrap())
        .marketplace_id("EBAY_US")
        .build()
        .unwrap();
    EbayClient::new(config, Arc::new(StaticTokenProvider::new(token))).unwrap()
}

fn error_envelope(error_id: i64, message: &str) -> Value {
    json!({"errors": [{"errorId": error_id, "domain": "API_INVENTORY", "category": "REQUEST", "message": message}]})
}

async fn mount_get(server: &MockServer, resource: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/{resource}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_get_inventory_item_sends_bearer_and_marketplace_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/inventory_item/LAMP-01")))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("X-EBAY-C-MARKETPLACE-ID", "EBAY_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sku": "LAMP-01",
            "condition": "USED_EXCELLENT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let item = client.get_inventory_item("LAMP-01").await.unwrap();

    assert_eq!(item["sku"], "LAMP-01");
    assert_eq!(item["condition"], "USED_EXCELLENT");
}

#[tokio::test]
async fn test_get_inventory_item_not_found() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "inventory_item/MISSING",
        404,
        error_envelope(25702, "SKU MISSING was not found"),
    )
    .await;

    let client = create_client(&server);
    let err = client.get_inventory_item("MISSING").await.unwrap_err();

    match err {
        SyncError::ItemNotFound { message } => assert_eq!(message, "SKU MISSING was not found"),
        other => panic!("expected ItemNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_token_is_authentication_failure() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "inventory_item/LAMP-01",
        401,
        error_envelope(1001, "Invalid access token"),
    )
    .await;

    let client = create_client(&server);
    let err = client.get_inventory_item("LAMP-01").await.unwrap_err();

    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_expired_token_is_still_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/inventory_item/LAMP-01")))
        .and(header("Authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_envelope(1001, "expired")))
        .expect(1)
        .mount(&server)
        .await;

    let token = Token::with_expiry("stale-token", Utc::now() - Duration::hours(1));
    let client = create_client_with_token(&server, token);

    let err = client.get_inventory_item("LAMP-01").await.unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client_with_token(&server, Token::new(""));
    let err = client.get_inventory_item("LAMP-01").await.unwrap_err();

    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_unknown_error_code_carries_raw_reply() {
    let server = MockServer::start().await;
    let reply = error_envelope(25001, "A system error has occurred");
    mount_get(&server, "inventory_item/LAMP-01", 500, reply.clone()).await;

    let client = create_client(&server);
    let err = client.get_inventory_item("LAMP-01").await.unwrap_err();

    match err {
        SyncError::UnexpectedRemoteError { status, raw } => {
            assert_eq!(status, 500);
            assert_eq!(raw, reply);
        }
        other => panic!("expected UnexpectedRemoteError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/inventory_item/LAMP-01")))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client.get_inventory_item("LAMP-01").await.unwrap_err();

    match err {
        SyncError::TransportFailure { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("Service Unavailable"));
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_offers_lists_offers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/offer")))
        .and(query_param("sku", "LAMP-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "offers": [
                {"offerId": "1001", "sku": "LAMP-01", "marketplaceId": "EBAY_US"},
                {"offerId": "1002", "sku": "LAMP-01", "marketplaceId": "EBAY_GB"}
            ]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let offers = client.get_offers("LAMP-01").await.unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[1]["marketplaceId"], "EBAY_GB");
}

#[tokio::test]
async fn test_get_offers_404_is_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE}/offer")))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_envelope(25713, "This Offer is not available")))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let offers = client.get_offers("NOPE").await.unwrap();

    assert!(offers.is_empty());
}

#[tokio::test]
async fn test_sku_is_percent_encoded_in_path() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "inventory_item/LAMP%2001",
        200,
        json!({"sku": "LAMP 01"}),
    )
    .await;

    let client = create_client(&server);
    let item = client.get_inventory_item("LAMP 01").await.unwrap();

    assert_eq!(item["sku"], "LAMP 01");
}

// ============================================================================
// Fetch-merge-put writes
// ============================================================================

#[tokio::test]
async fn test_update_inventory_item_merges_before_put() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/LAMP-01",
        200,
        json!({
            "sku": "LAMP-01",
            "condition": "USED_GOOD",
            "availability": {"shipToLocationAvailability": {"quantity": 3}},
            "product": {"title": "Lamp", "aspects": {"Color": ["Brass"]}}
        }),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(format!("{BASE}/inventory_item/LAMP-01")))
        .and(header("Content-Language", "en-US"))
        .and(body_json(json!({
            "sku": "LAMP-01",
            "condition": "USED_EXCELLENT",
            "availability": {"shipToLocationAvailability": {"quantity": 3}},
            "product": {"title": "Brass Lamp", "aspects": {"Color": ["Brass"]}}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .update_inventory_item(
            "LAMP-01",
            &json!({"condition": "USED_EXCELLENT", "product": {"title": "Brass Lamp"}}),
        )
        .await
        .unwrap();

    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_update_missing_item_never_puts() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "inventory_item/GHOST",
        404,
        error_envelope(25702, "SKU GHOST was not found"),
    )
    .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .update_inventory_item("GHOST", &json!({"condition": "NEW"}))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_offer_returns_parsed_body() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "offer/1001",
        200,
        json!({"offerId": "1001", "sku": "LAMP-01", "availableQuantity": 1}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(format!("{BASE}/offer/1001")))
        .and(body_json(json!({"offerId": "1001", "sku": "LAMP-01", "availableQuantity": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"warnings": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .update_offer("1001", &json!({"availableQuantity": 4}))
        .await
        .unwrap();

    assert_eq!(result, json!({"warnings": []}));
}

#[tokio::test]
async fn test_put_rejected_with_known_code_is_typed() {
    let server = MockServer::start().await;

    mount_get(&server, "offer/1001", 200, json!({"offerId": "1001"})).await;

    Mock::given(method("PUT"))
        .and(path(format!("{BASE}/offer/1001")))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_envelope(1100, "Access denied")))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .update_offer("1001", &json!({"availableQuantity": 4}))
        .await
        .unwrap_err();

    match err {
        SyncError::AuthenticationFailure { message } => assert_eq!(message, "Access denied"),
        other => panic!("expected AuthenticationFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_group_strips_variants() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item_group/LAMPS",
        200,
        json!({
            "inventoryItemGroupKey": "LAMPS",
            "title": "Lamps",
            "variantSKUs": ["LAMP-01", "LAMP-02"]
        }),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(format!("{BASE}/inventory_item_group/LAMPS")))
        .and(body_json(json!({
            "inventoryItemGroupKey": "LAMPS",
            "title": "Brass Lamps",
            "variantSKUs": ["LAMP-01", "LAMP-02"]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let partial = json!({
        "title": "Brass Lamps",
        "variants": {"LAMP-01": {"condition": "NEW"}}
    });
    client
        .update_inventory_item_group("LAMPS", &partial)
        .await
        .unwrap();

    // The caller's document is left alone.
    assert!(partial.get("variants").is_some());
}

// ============================================================================
// Product lookup with group fallback
// ============================================================================

#[tokio::test]
async fn test_get_ebay_product_returns_single_item() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "inventory_item/LAMP-01",
        200,
        json!({"sku": "LAMP-01", "condition": "NEW"}),
    )
    .await;

    let client = create_client(&server);
    let product = client.get_ebay_product("LAMP-01").await.unwrap();

    assert_eq!(product, json!({"sku": "LAMP-01", "condition": "NEW"}));
}

#[tokio::test]
async fn test_get_ebay_product_falls_back_to_group() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/GROUPSKU",
        404,
        error_envelope(25702, "SKU GROUPSKU was not found"),
    )
    .await;
    mount_get(
        &server,
        "inventory_item_group/GROUPSKU",
        200,
        json!({"inventoryItemGroupKey": "GROUPSKU", "variantSKUs": ["A", "B"]}),
    )
    .await;
    mount_get(
        &server,
        "inventory_item/A",
        200,
        json!({"sku": "A", "condition": "NEW"}),
    )
    .await;
    mount_get(
        &server,
        "inventory_item/B",
        200,
        json!({"sku": "B", "condition": "USED_GOOD"}),
    )
    .await;

    let client = create_client(&server);
    let product = client.get_ebay_product("GROUPSKU").await.unwrap();

    assert_eq!(product["inventoryItemGroupKey"], "GROUPSKU");
    assert_eq!(
        product["variants"],
        json!({
            "A": {"sku": "A", "condition": "NEW"},
            "B": {"sku": "B", "condition": "USED_GOOD"}
        })
    );
}

#[tokio::test]
async fn test_group_variant_without_sku_is_skipped() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/GROUPSKU",
        404,
        error_envelope(25702, "not found"),
    )
    .await;
    mount_get(
        &server,
        "inventory_item_group/GROUPSKU",
        200,
        json!({"variantSKUs": ["A", "B"]}),
    )
    .await;
    mount_get(&server, "inventory_item/A", 200, json!({"sku": "A"})).await;
    mount_get(&server, "inventory_item/B", 200, json!({"condition": "NEW"})).await;

    let client = create_client(&server);
    let product = client.get_ebay_product("GROUPSKU").await.unwrap();

    assert_eq!(product["variants"], json!({"A": {"sku": "A"}}));
}

#[tokio::test]
async fn test_get_ebay_product_missing_everywhere() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/NOPE",
        404,
        error_envelope(25702, "not found"),
    )
    .await;
    mount_get(
        &server,
        "inventory_item_group/NOPE",
        404,
        error_envelope(25710, "group not found"),
    )
    .await;

    let client = create_client(&server);
    let err = client.get_ebay_product("NOPE").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_ebay_product_does_not_fall_back_on_auth_failure() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/LAMP-01",
        401,
        error_envelope(1002, "Missing access token"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/inventory_item_group/LAMP-01")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client.get_ebay_product("LAMP-01").await.unwrap_err();

    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_get_ebay_product_unknown_404_code_is_not_a_missing_item() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "inventory_item/A",
        404,
        error_envelope(25001, "A system error has occurred"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/inventory_item_group/A")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"inventoryItemGroupKey": "A"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let err = client.get_inventory_item("A").await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::UnexpectedRemoteError { status: 404, .. }
    ));

    let err = client.get_ebay_product("A").await.unwrap_err();
    match err {
        SyncError::UnexpectedRemoteError { status, raw } => {
            assert_eq!(status, 404);
            assert_eq!(raw["errors"][0]["errorId"], 25001);
        }
        other => panic!("expected UnexpectedRemoteError, got {other:?}"),
    }
}
