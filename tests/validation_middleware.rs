//! Integration tests for the validation pipeline stage.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::{MethodRouter, get, post},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pulsartrack_guard::api::{ValidationConfig, ValidationState, validation_middleware};
use pulsartrack_guard::app::{RequestValidator, catalog};
use pulsartrack_guard::domain::{ValidationRejection, ValidationSchema};
use pulsartrack_guard::infra::StrkeyAddressValidator;
use pulsartrack_guard::test_utils::MockAddressValidator;

/// SEP-23 strkey test vector, used as a syntactically valid advertiser
const ADVERTISER: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

async fn ok_handler() -> StatusCode {
    StatusCode::OK
}

async fn echo_handler(body: String) -> String {
    body
}

fn guarded_route(path: &str, handler: MethodRouter, schema: ValidationSchema) -> Router {
    let validator = Arc::new(RequestValidator::new(
        schema,
        Arc::new(StrkeyAddressValidator::new()),
    ));
    Router::new().route(path, handler).route_layer(
        middleware::from_fn_with_state(ValidationState::new(validator), validation_middleware),
    )
}

async fn rejection_from(response: axum::response::Response) -> ValidationRejection {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_campaign_body_passes_through() {
    let router = guarded_route("/api/campaigns", post(ok_handler), catalog::create_campaign());

    let payload = serde_json::json!({
        "name": "Spring launch",
        "advertiser": ADVERTISER,
        "budget_stroops": 250_000_000,
        "cpi_stroops": 50_000,
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaigns")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejection_carries_every_violation_in_order() {
    let router = guarded_route("/api/campaigns", post(ok_handler), catalog::create_campaign());

    // Three violations at once: short name, malformed address, missing budget
    let payload = serde_json::json!({
        "name": "ad",
        "advertiser": "not-an-address",
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaigns")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejection = rejection_from(response).await;
    assert_eq!(rejection.error, "Validation failed");

    let reported: Vec<(&str, &str)> = rejection
        .details
        .iter()
        .map(|v| (v.field.as_str(), v.message.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![
            ("name", "name must be at least 3 characters"),
            ("advertiser", "advertiser must be a valid Stellar public key"),
            ("budget_stroops", "budget_stroops is required"),
        ]
    );
}

#[tokio::test]
async fn test_absent_body_reports_required_fields_only() {
    let router = guarded_route("/api/campaigns", post(ok_handler), catalog::create_campaign());

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaigns")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejection = rejection_from(response).await;
    let fields: Vec<&str> = rejection.details.iter().map(|v| v.field.as_str()).collect();
    // cpi_stroops is optional and stays silent when absent
    assert_eq!(fields, vec!["name", "advertiser", "budget_stroops"]);
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected_before_validation() {
    let router = guarded_route("/api/campaigns", post(ok_handler), catalog::create_campaign());

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaigns")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_query_surface_is_screened() {
    let router = guarded_route("/api/campaigns", get(ok_handler), catalog::list_campaigns());

    let request = Request::builder()
        .uri("/api/campaigns?limit=500")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejection = rejection_from(response).await;
    assert_eq!(rejection.details[0].message, "limit must be at most 100");

    let request = Request::builder()
        .uri("/api/campaigns?limit=20")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Optional query fields stay silent when omitted
    let request = Request::builder()
        .uri("/api/campaigns")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_path_params_surface_is_screened() {
    let router = guarded_route(
        "/api/campaigns/{id}",
        get(ok_handler),
        catalog::get_campaign(),
    );

    let request = Request::builder()
        .uri("/api/campaigns/abc")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejection = rejection_from(response).await;
    assert_eq!(rejection.details[0].message, "id must be a number");

    let request = Request::builder()
        .uri("/api/campaigns/7")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_body_is_restored_for_the_inner_handler() {
    let router = guarded_route(
        "/api/impressions",
        post(echo_handler),
        catalog::record_impression(),
    );

    let payload = serde_json::json!({
        "campaign_id": 12,
        "publisher": ADVERTISER,
    })
    .to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/impressions")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.clone()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), payload);
}

#[tokio::test]
async fn test_oversized_body_is_capped() {
    let validator = Arc::new(RequestValidator::new(
        catalog::create_campaign(),
        Arc::new(StrkeyAddressValidator::new()),
    ));
    let state = ValidationState::with_config(
        validator,
        ValidationConfig { max_body_bytes: 16 },
    );
    let router = Router::new()
        .route("/api/campaigns", post(ok_handler))
        .route_layer(middleware::from_fn_with_state(state, validation_middleware));

    let request = Request::builder()
        .method("POST")
        .uri("/api/campaigns")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::json!({"name": "well beyond sixteen bytes"}).to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_address_seam_uses_injected_predicate() {
    let validator = Arc::new(RequestValidator::new(
        catalog::place_bid(),
        Arc::new(MockAddressValidator::rejecting(["GBAD"])),
    ));
    let router = Router::new()
        .route("/api/auctions/{auction_id}/bids", post(ok_handler))
        .route_layer(middleware::from_fn_with_state(
            ValidationState::new(validator),
            validation_middleware,
        ));

    let payload = serde_json::json!({
        "bidder": "GBAD",
        "amount_stroops": 5_000_000,
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/auctions/3/bids")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rejection = rejection_from(response).await;
    assert_eq!(
        rejection.details[0].message,
        "bidder must be a valid Stellar public key"
    );
}
