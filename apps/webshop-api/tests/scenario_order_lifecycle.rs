//! In-process scenarios for the order endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;
use webshop_core::Product;

use common::{line_items, spawn_app, spawn_app_with, RateOutcome};

#[tokio::test]
async fn test_create_submit_read_round_trip() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;
    let cable = app.create_product("CBL-000001", 199, true).await;

    let (status, created) = app.create_order(&customer, &[(keyboard.as_str(), 2), (cable.as_str(), 50)]).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["status"], "DRAFT");
    assert!(created["totalPriceLocalCents"].is_null());
    assert!(created["totalPriceReferenceCents"].is_null());
    assert_eq!(created["customerFirstName"], "Ana");
    assert_eq!(created["orderItemList"][0]["totalItemPriceCents"], 29998);
    assert_eq!(created["orderItemList"][1]["totalItemPriceCents"], 9950);

    let order_id = created["orderId"].as_str().unwrap().to_string();

    let (status, submitted) = app
        .call("POST", &format!("/api/v1/submit-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{submitted}");
    assert_eq!(submitted["status"], "SUBMITTED");
    assert_eq!(submitted["totalPriceLocalCents"], 39948);
    assert_eq!(submitted["totalPriceReferenceCents"], 5326);
    assert_eq!(app.rates.calls(), 1);

    let (status, read) = app
        .call("GET", &format!("/api/v1/read-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["totalPriceLocalCents"], 39948);
    assert_eq!(read["totalPriceReferenceCents"], 5326);
    assert_eq!(read["orderItemList"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_resubmit_is_idempotent() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let uri = format!("/api/v1/submit-order/{}", created["orderId"].as_str().unwrap());

    let (_, first) = app.call("POST", &uri, None).await;
    app.rates.set(RateOutcome::Rate("1,000000"));
    let (status, second) = app.call("POST", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["totalPriceReferenceCents"], second["totalPriceReferenceCents"]);
    assert_eq!(first["totalPriceLocalCents"], second["totalPriceLocalCents"]);
    assert_eq!(app.rates.calls(), 1);
}

#[tokio::test]
async fn test_zero_total_skips_rate_provider() {
    let app = spawn_app_with(RateOutcome::Unavailable).await;
    let customer = app.create_customer("Ana").await;
    let freebie = app.create_product("FREE-00001", 0, true).await;

    let (_, created) = app.create_order(&customer, &[(freebie.as_str(), 3)]).await;
    let (status, submitted) = app
        .call(
            "POST",
            &format!("/api/v1/submit-order/{}", created["orderId"].as_str().unwrap()),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{submitted}");
    assert_eq!(submitted["totalPriceLocalCents"], 0);
    assert_eq!(submitted["totalPriceReferenceCents"], 0);
    assert_eq!(app.rates.calls(), 0);
}

#[tokio::test]
async fn test_one_unavailable_product_rejects_batch() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;
    let retired = app.create_product("KBD-000002", 9999, false).await;

    let (status, body) = app.create_order(&customer, &[(keyboard.as_str(), 1), (retired.as_str(), 1)]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");
    assert_eq!(app.state.db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_product_rejects_batch_before_customer_lookup() {
    let app = spawn_app().await;
    let ghost_product = Uuid::new_v4().to_string();
    let ghost_customer = Uuid::new_v4().to_string();

    let (status, body) = app.create_order(&ghost_customer, &[(ghost_product.as_str(), 1)]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");

    let (status, body) = app.create_order(&ghost_customer, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_rate_failure_leaves_order_draft() {
    let app = spawn_app_with(RateOutcome::Unavailable).await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();

    let (status, body) = app
        .call("POST", &format!("/api/v1/submit-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "RATE_UNAVAILABLE");

    let (_, read) = app
        .call("GET", &format!("/api/v1/read-order/{order_id}"), None)
        .await;
    assert_eq!(read["status"], "DRAFT");
    assert!(read["totalPriceLocalCents"].is_null());

    app.rates.set(RateOutcome::Rate("7,5"));
    let (status, submitted) = app
        .call("POST", &format!("/api/v1/submit-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["totalPriceReferenceCents"], 2000);
}

#[tokio::test]
async fn test_non_positive_rate_is_reported() {
    let app = spawn_app_with(RateOutcome::NonPositive).await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let (status, body) = app
        .call(
            "POST",
            &format!("/api/v1/submit-order/{}", created["orderId"].as_str().unwrap()),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "INVALID_RATE");
}

#[tokio::test]
async fn test_update_replaces_draft_items() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;
    let cable = app.create_product("CBL-000001", 199, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/api/v1/update-order/{order_id}"),
            Some(json!({ "orderItemList": line_items(&[(cable.as_str(), 2), (keyboard.as_str(), 1)]) })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    let items = updated["orderItemList"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["productId"], cable.as_str());
    assert_eq!(items[0]["totalItemPriceCents"], 398);
}

#[tokio::test]
async fn test_update_after_submit_is_ignored() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;
    let cable = app.create_product("CBL-000001", 199, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();
    app.call("POST", &format!("/api/v1/submit-order/{order_id}"), None)
        .await;

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/api/v1/update-order/{order_id}"),
            Some(json!({ "orderItemList": line_items(&[(cable.as_str(), 5)]) })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "SUBMITTED");
    assert_eq!(updated["orderItemList"][0]["productId"], keyboard.as_str());
    assert_eq!(updated["totalPriceLocalCents"], 14999);
}

#[tokio::test]
async fn test_update_unknown_order() {
    let app = spawn_app().await;

    let (status, body) = app
        .call(
            "PUT",
            &format!("/api/v1/update-order/{}", Uuid::new_v4()),
            Some(json!({ "orderItemList": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_later_price_change_keeps_submitted_totals() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;
    let cable = app.create_product("CBL-000001", 199, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 2), (cable.as_str(), 50)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();
    app.call("POST", &format!("/api/v1/submit-order/{order_id}"), None)
        .await;

    let mut product: Product = app.state.db.products().get_by_id(&keyboard).await.unwrap().unwrap();
    product.price_cents = 1;
    app.state.db.products().update(&product).await.unwrap();

    let (_, read) = app
        .call("GET", &format!("/api/v1/read-order/{order_id}"), None)
        .await;
    assert_eq!(read["totalPriceLocalCents"], 39948);
    assert_eq!(read["totalPriceReferenceCents"], 5326);
}

#[tokio::test]
async fn test_delete_order() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();

    let (status, _) = app
        .call("DELETE", &format!("/api/v1/delete-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .call("GET", &format!("/api/v1/read-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The product is no longer referenced
    let (status, _) = app
        .call("DELETE", &format!("/api/v1/product/{keyboard}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_missing_order_is_no_op() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    app.create_order(&customer, &[]).await;

    let (status, body) = app
        .call("DELETE", &format!("/api/v1/delete-order/{}", Uuid::new_v4()), None)
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(app.state.db.orders().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_read_missing_and_malformed_ids() {
    let app = spawn_app().await;

    let (status, body) = app
        .call("GET", &format!("/api/v1/read-order/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = app.call("GET", "/api/v1/read-order/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app
        .call("POST", &format!("/api/v1/submit-order/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("POST", "/api/v1/submit-order/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(
            "PUT",
            "/api/v1/update-order/not-a-uuid",
            Some(json!({ "orderItemList": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overflowing_create_stores_nothing() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (status, body) = app
        .create_order(&customer, &[(keyboard.as_str(), i64::MAX / 100)])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.state.db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_overflowing_update_keeps_previous_items() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (_, created) = app.create_order(&customer, &[(keyboard.as_str(), 1)]).await;
    let order_id = created["orderId"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(
            "PUT",
            &format!("/api/v1/update-order/{order_id}"),
            Some(json!({ "orderItemList": line_items(&[(keyboard.as_str(), i64::MAX / 100)]) })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, read) = app
        .call("GET", &format!("/api/v1/read-order/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{read}");
    assert_eq!(read["orderItemList"][0]["quantity"], 1);
    assert_eq!(read["orderItemList"][0]["totalItemPriceCents"], 14999);
}

#[tokio::test]
async fn test_negative_quantity_rejected() {
    let app = spawn_app().await;
    let customer = app.create_customer("Ana").await;
    let keyboard = app.create_product("KBD-000001", 14999, true).await;

    let (status, body) = app.create_order(&customer, &[(keyboard.as_str(), -1)]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = spawn_app().await;

    let (status, body) = app
        .call("POST", "/api/v1/create-order", Some(json!({ "orderItemList": [] })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
