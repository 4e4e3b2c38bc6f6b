use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::repository::MarketplaceRepository;
use crate::marketplace::{marketplace_router, MarketplaceService};

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn register_caregiver_returns_created_record_without_password() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let payload = serde_json::to_value(caregiver_payload("Dana", "dana@example.com"))
        .expect("serialize payload");

    let response = router
        .oneshot(json_request(Method::POST, "/caregivers", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["first_name"], "Dana");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn missing_caregiver_yields_not_found_detail() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(Method::GET, "/caregivers/41"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "detail": "Caregiver not found" }));
}

#[tokio::test]
async fn delete_family_answers_no_content_then_not_found() {
    let (service, _) = build_service();
    let family = service
        .create_family(family_payload("Aminova", "amina@example.com"))
        .expect("registers");
    let router = router_with_service(service);
    let uri = format!("/families/{}", family.id);

    let first = router
        .clone()
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .expect("router responds");
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = router
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .expect("router responds");
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn caregiver_listing_applies_query_filters() {
    let (service, _) = build_service();
    let mut sitter = caregiver_payload("Timur", "timur@example.com");
    sitter.caregiver_type = "Babysitter".to_string();
    sitter.hourly_rate = 11.0;
    service.create_caregiver(sitter).expect("registers");
    service
        .create_caregiver(caregiver_payload("Dana", "dana@example.com"))
        .expect("registers");
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            Method::GET,
            "/caregivers?caregiver_type=Babysitter&max_rate=11.5",
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["first_name"], "Timur");
}

#[tokio::test]
async fn job_post_response_embeds_family_summary() {
    let (service, _) = build_service();
    let family = service
        .create_family(family_payload("Aminova", "amina@example.com"))
        .expect("registers");
    let router = router_with_service(service);
    let payload = serde_json::to_value(job_post_payload(family.id, "Evening Babysitter"))
        .expect("serialize payload");

    let response = router
        .oneshot(json_request(Method::POST, "/job-posts", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["family_id"], family.id.0);
    assert_eq!(body["family"]["last_name"], "Aminova");
    assert_eq!(body["preferred_time_slots"], json!(["Weekdays 18:00-21:00"]));
}

#[tokio::test]
async fn patch_appointment_accepts_short_time_and_keeps_references() {
    let (service, _) = build_service();
    let family = service
        .create_family(family_payload("Bolatov", "bolat@example.com"))
        .expect("registers");
    let caregiver = service
        .create_caregiver(caregiver_payload("Dana", "dana@example.com"))
        .expect("registers");
    let appointment = service
        .create_appointment(appointment_payload(caregiver.id, family.id, 12))
        .expect("books");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            Method::PATCH,
            &format!("/appointments/{}", appointment.id),
            &json!({ "start_time": "14:30", "status": "confirmed", "family_id": 999 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["start_time"], "14:30:00");
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["family_id"], family.id.0);
    assert_eq!(body["caregiver"]["first_name"], "Dana");
}

#[tokio::test]
async fn field_violations_map_to_unprocessable_entity() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let mut payload = serde_json::to_value(caregiver_payload("Dana", "dana@example.com"))
        .expect("serialize payload");
    payload["password"] = json!("abc");

    let response = router
        .oneshot(json_request(Method::POST, "/caregivers", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["detail"], "password must be at least 6 characters");
}

#[tokio::test]
async fn message_without_sender_is_a_bad_request() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/messages",
            &json!({ "receiver_family_id": 1, "content": "Hello" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["detail"], "Sender is required");
}

#[tokio::test]
async fn duplicate_registration_is_a_bad_request() {
    let (service, _) = build_service();
    service
        .create_family(family_payload("Aminova", "amina@example.com"))
        .expect("registers");
    let router = router_with_service(service);
    let payload = serde_json::to_value(family_payload("Other", "amina@example.com"))
        .expect("serialize payload");

    let response = router
        .oneshot(json_request(Method::POST, "/families", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["detail"], "Email already registered");
}

#[tokio::test]
async fn repository_outage_is_an_internal_error() {
    let router = marketplace_router(Arc::new(MarketplaceService::new(Arc::new(
        UnavailableRepository,
    ))));

    let response = router
        .oneshot(empty_request(Method::GET, "/job-posts"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("database offline")));
}

#[tokio::test]
async fn patch_with_null_clears_the_column() {
    let (service, _) = build_service();
    let caregiver = service
        .create_caregiver(caregiver_payload("Dana", "dana@example.com"))
        .expect("registers");
    let router = router_with_service(service);
    let uri = format!("/caregivers/{}", caregiver.id);

    let response = router
        .clone()
        .oneshot(json_request(Method::PATCH, &uri, &json!({ "bio": null })))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["bio"].is_null());
    assert_eq!(body["gender"], "Female");

    let stored = router
        .oneshot(empty_request(Method::GET, &uri))
        .await
        .expect("router responds");
    assert!(read_json_body(stored).await["bio"].is_null());
}

#[tokio::test]
async fn body_missing_a_required_field_is_unprocessable_with_detail() {
    let (service, repository) = build_service();
    let router = router_with_service(service);
    let mut payload = serde_json::to_value(caregiver_payload("Dana", "dana@example.com"))
        .expect("serialize payload");
    payload
        .as_object_mut()
        .expect("object payload")
        .remove("password");

    let response = router
        .oneshot(json_request(Method::POST, "/caregivers", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("password")));
    let stored = repository
        .read(|tables| tables.caregivers.len())
        .expect("read succeeds");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_with_detail() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/families")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"first_name\": "))
        .expect("request");

    let response = router.oneshot(request).await.expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json_body(response).await["detail"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_unprocessable_with_detail() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(Method::GET, "/caregivers/abc"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| !detail.is_empty()));
}

#[tokio::test]
async fn rate_filters_must_be_non_negative_numbers() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let negative = router
        .clone()
        .oneshot(empty_request(Method::GET, "/caregivers?min_rate=-1"))
        .await
        .expect("router responds");
    assert_eq!(negative.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        read_json_body(negative).await,
        json!({ "detail": "min_rate must be greater than or equal to zero" })
    );

    let unparsable = router
        .oneshot(empty_request(Method::GET, "/caregivers?max_rate=cheap"))
        .await
        .expect("router responds");
    assert_eq!(unparsable.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(read_json_body(unparsable).await["detail"].is_string());
}
