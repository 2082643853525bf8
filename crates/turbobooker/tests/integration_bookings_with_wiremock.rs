//! Booking endpoints against a mocked booking API
//!
//! Run with: cargo test --test integration_bookings_with_wiremock

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use turbobooker::{BookingFixture, BookingPatch, Error, Session, schema::assert_valid_schema};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn authenticated(server: &MockServer) -> Session {
    common::mount_auth(server).await;
    let mut session = Session::builder()
        .base_url(server.uri())
        .open()
        .expect("Failed to open session");
    session
        .authenticate(&common::test_config(server).valid_user)
        .await
        .expect("Failed to authenticate");
    session
}

#[tokio::test]
async fn test_get_booking() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/booking/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("booking")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let booking = session.bookings().get("1").await.unwrap();

    assert_eq!(booking.first_name, "Sally");
    assert_eq!(booking.total_price, 111);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_get_booking_body_matches_schema() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/booking/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::load_response_fixture("booking")),
        )
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let response = session.get("/booking/1").unwrap().send().await.unwrap();

    assert!(response.ok());
    assert_valid_schema(&response.json_value().unwrap(), "schemas/booking-data.json");
}

#[tokio::test]
async fn test_get_missing_booking_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/booking/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let err = session.bookings().get("999999").await.unwrap_err();

    assert_matches!(err, Error::Api { status: 404, ref body } if body == "Not Found");
}

#[tokio::test]
async fn test_create_booking_echoes_payload() {
    let mock_server = MockServer::start().await;
    let proper = BookingFixture::proper_booking().unwrap();

    Mock::given(method("POST"))
        .and(path("/booking"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::to_value(&proper).unwrap()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("created_booking")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let created = session.bookings().create(&proper).await.unwrap();

    assert_eq!(created.booking_id, "1001");
    assert_eq!(created.booking, proper);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_update_booking_requires_cookie() {
    let mock_server = MockServer::start().await;

    let mut updated = BookingFixture::proper_booking().unwrap();
    updated.first_name = "UpdatedName".to_string();
    updated.additional_needs = Some("Updated additional needs".to_string());

    Mock::given(method("PUT"))
        .and(path("/booking/1001"))
        .and(header("cookie", "token=abc123"))
        .and(body_json(serde_json::to_value(&updated).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let echoed = session.bookings().update("1001", &updated).await.unwrap();

    assert_eq!(echoed.first_name, "UpdatedName");
    assert_eq!(
        echoed.additional_needs.as_deref(),
        Some("Updated additional needs")
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_partial_update_sends_only_set_fields() {
    let mock_server = MockServer::start().await;

    let mut patched = BookingFixture::proper_booking().unwrap();
    patched.total_price = 999;

    Mock::given(method("PATCH"))
        .and(path("/booking/1001"))
        .and(header("cookie", "token=abc123"))
        .and(body_json(serde_json::json!({"totalprice": 999})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&patched))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let echoed = session
        .bookings()
        .partial_update("1001", &BookingPatch::new().total_price(999))
        .await
        .unwrap();

    assert_eq!(echoed.total_price, 999);
    assert_eq!(echoed.first_name, "Jim");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_partial_update_with_invalid_token_is_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/booking/1001"))
        .and(header("cookie", "token=invalid_abc123"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let cookie = format!("token=invalid_{}", session.auth_token().unwrap());
    let response = session
        .patch("/booking/1001")
        .unwrap()
        .header("Cookie", cookie)
        .unwrap()
        .json(&BookingPatch::new().total_price(999))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    assert!(!response.ok());
}

#[tokio::test]
async fn test_delete_expects_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/booking/1001"))
        .and(header("cookie", "token=abc123"))
        .respond_with(ResponseTemplate::new(201).set_body_string("Created"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    session.bookings().delete("1001").await.unwrap();
    mock_server.verify().await;
}

#[tokio::test]
async fn test_delete_with_other_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/booking/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let session = authenticated(&mock_server).await;
    let err = session.bookings().delete("1001").await.unwrap_err();
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_mutations_without_token_never_reach_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Session::builder().base_url(mock_server.uri()).open().unwrap();
    let proper = BookingFixture::proper_booking().unwrap();

    assert_matches!(
        session.bookings().update("1", &proper).await,
        Err(Error::NotAuthenticated)
    );
    assert_matches!(
        session.bookings().delete("1").await,
        Err(Error::NotAuthenticated)
    );
    mock_server.verify().await;
}
