//! Booking API suite against the in-process mock
//!
//! Mirrors the suite run against a real instance: list, read, create,
//! update, patch, delete, schema conformance and the negative cases.
//!
//! Run with: cargo test -p turbobooker-integration-tests --test booking_api -- --nocapture

use rstest::rstest;
use serde_json::json;
use turbobooker::{
    BookingFixture, BookingPatch, Error, http::Method, observability::init_tracing,
    schema::assert_valid_schema,
};
use turbobooker_integration_tests::{MockBooker, SEEDED_BOOKINGS};

const BOOKING_SCHEMA: &str = "schemas/booking-data.json";

async fn setup() -> (MockBooker, BookingFixture) {
    init_tracing();
    let booker = MockBooker::start().await;
    let fixture = booker.fixture().await.expect("Fixture setup failed");
    (booker, fixture)
}

#[tokio::test]
async fn test_list_bookings() {
    let (_booker, fixture) = setup().await;

    let response = fixture.session().get("/booking").unwrap().send().await.unwrap();
    assert!(response.ok());

    let ids = fixture.booking_ids().await.unwrap();
    assert_eq!(ids.len(), SEEDED_BOOKINGS);
}

#[rstest]
#[case::first(0)]
#[case::second(1)]
#[case::third(2)]
#[tokio::test]
async fn test_get_booking_by_random_id(#[case] index: usize) {
    let (_booker, fixture) = setup().await;
    let ids = fixture.random_booking_ids(3).await.unwrap();

    let response = fixture
        .session()
        .get(&format!("/booking/{}", ids[index]))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert!(response.ok());
    assert_valid_schema(&response.json_value().unwrap(), BOOKING_SCHEMA);
}

#[tokio::test]
async fn test_every_listed_booking_matches_schema() {
    let (_booker, fixture) = setup().await;

    for id in fixture.booking_ids().await.unwrap() {
        let booking = fixture.bookings().get(&id.booking_id).await.unwrap();
        assert_valid_schema(&serde_json::to_value(&booking).unwrap(), BOOKING_SCHEMA);
    }
}

#[tokio::test]
async fn test_create_booking() {
    let (booker, fixture) = setup().await;
    let proper = BookingFixture::proper_booking().unwrap();

    let response = fixture
        .session()
        .post("/booking")
        .unwrap()
        .json(&proper)
        .unwrap()
        .send()
        .await
        .unwrap();
    assert!(response.ok());

    let body = response.json_value().unwrap();
    assert!(body.get("bookingid").is_some());
    assert_eq!(body["booking"], serde_json::to_value(&proper).unwrap());
    assert_valid_schema(&body["booking"], BOOKING_SCHEMA);
    assert_eq!(booker.booking_count(), SEEDED_BOOKINGS + 1);
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let (booker, fixture) = setup().await;
    let bookings = fixture.bookings();

    let created = bookings
        .create(&BookingFixture::proper_booking().unwrap())
        .await
        .unwrap();
    let id = created.booking_id.clone();

    let mut replacement = created.booking.clone();
    replacement.first_name = "UpdatedName".to_string();
    replacement.additional_needs = Some("Updated additional needs".to_string());
    let updated = bookings.update(&id, &replacement).await.unwrap();
    assert_eq!(updated, replacement);

    let patched = bookings
        .partial_update(&id, &BookingPatch::new().total_price(999))
        .await
        .unwrap();
    assert_eq!(patched.total_price, 999);
    assert_eq!(patched.first_name, "UpdatedName");

    bookings.delete(&id).await.unwrap();
    assert!(booker.booking(&id).is_none());

    let err = bookings.get(&id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_update_with_raw_cookie_header() {
    let (_booker, fixture) = setup().await;
    let id = fixture.random_booking_id().await.unwrap();

    let response = fixture
        .session()
        .put(&format!("/booking/{}", id))
        .unwrap()
        .header("Cookie", fixture.auth_cookie().unwrap())
        .unwrap()
        .json(&json!({
            "firstname": "UpdatedName",
            "lastname": "Brown",
            "totalprice": 111,
            "depositpaid": true,
            "bookingdates": {"checkin": "2018-01-01", "checkout": "2019-01-01"},
            "additionalneeds": "Updated additional needs"
        }))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert!(response.ok());
    let body = response.json_value().unwrap();
    assert_eq!(body["firstname"], "UpdatedName");
    assert_eq!(body["additionalneeds"], "Updated additional needs");
}

#[tokio::test]
async fn test_delete_returns_created() {
    let (_booker, fixture) = setup().await;
    let id = fixture.random_booking_id().await.unwrap();

    let response = fixture
        .session()
        .authorized(Method::DELETE, &format!("/booking/{}", id))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_improper_path_is_not_found() {
    let (_booker, fixture) = setup().await;

    let response = fixture
        .session()
        .get("/bookingImproper")
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn test_patch_with_invalid_token_is_forbidden() {
    let (booker, fixture) = setup().await;
    let id = fixture.random_booking_id().await.unwrap();
    let before = booker.booking(&id);

    let response = fixture
        .session()
        .patch(&format!("/booking/{}", id))
        .unwrap()
        .header(
            "Cookie",
            format!("token=invalid_{}", fixture.auth_token().unwrap()),
        )
        .unwrap()
        .json(&BookingPatch::new().total_price(999))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    assert_eq!(booker.booking(&id), before);
}

#[tokio::test]
async fn test_more_ids_than_bookings() {
    let (_booker, fixture) = setup().await;

    let err = fixture
        .random_booking_ids(SEEDED_BOOKINGS + 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::SampleConstraint { available, requested }
            if available == SEEDED_BOOKINGS && requested == SEEDED_BOOKINGS + 1
    ));
}

#[tokio::test]
async fn test_wrong_credentials_abort_setup() {
    init_tracing();
    let booker = MockBooker::start().await;
    let mut config = booker.config();
    config.valid_user = turbobooker::Credentials::new("admin", "wrong");

    let session = turbobooker::Session::builder()
        .base_url(booker.uri())
        .open()
        .unwrap();
    let err = BookingFixture::with_session(config, session)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Authentication(ref reason) if reason == "Bad credentials"));
}

#[tokio::test]
#[should_panic(expected = "Schema validation failed - ")]
async fn test_incomplete_booking_fails_schema() {
    let (_booker, fixture) = setup().await;
    let id = fixture.random_booking_id().await.unwrap();

    let mut body = fixture
        .session()
        .get(&format!("/booking/{}", id))
        .unwrap()
        .send()
        .await
        .unwrap()
        .json_value()
        .unwrap();
    body.as_object_mut().unwrap().remove("bookingdates");

    assert_valid_schema(&body, BOOKING_SCHEMA);
}
