//! End-to-end suite for the TurboBooker workspace
//!
//! The suite runs against [`MockBooker`], an in-process server that keeps
//! state the way restful-booker does: bookings created by one test can be
//! read, updated and deleted by the next call. Live runs against a real
//! instance are in `tests/real_world.rs` and are `#[ignore]`d.
//!
//! Behaviour reproduced from restful-booker:
//! - `POST /auth` answers 200 with either `{"token"}` or
//!   `{"reason": "Bad credentials"}`
//! - `GET /booking` lists ids, `GET /booking/{id}` answers 404 `Not Found`
//!   for unknown ids
//! - `PUT`/`PATCH`/`DELETE` need `Cookie: token=<token>` and answer 403
//!   `Forbidden` otherwise; unknown ids answer 405 `Method Not Allowed`
//! - a successful `DELETE` answers 201 `Created`
//! - every other path answers 404 `Not Found`

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Value, json};
use tracing::debug;
use turbobooker::{BookingFixture, Config, Credentials, Session};
use turbobooker_protocol::{BookingRecord, decode_booking_record};
use wiremock::matchers::{any, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Username accepted by [`MockBooker`]
pub const USERNAME: &str = "admin";

/// Password accepted by [`MockBooker`]
pub const PASSWORD: &str = "password123";

/// Number of bookings present when the server starts
pub const SEEDED_BOOKINGS: usize = 5;

#[derive(Debug, Default)]
struct BookerState {
    bookings: BTreeMap<u64, Value>,
    next_id: u64,
    tokens: HashSet<String>,
}

impl BookerState {
    fn seeded() -> Self {
        let mut state = Self {
            next_id: 1,
            ..Self::default()
        };
        let names = [
            ("Sally", "Brown"),
            ("Jim", "Jones"),
            ("Mark", "Ericsson"),
            ("Susan", "Wilson"),
            ("Eric", "Smith"),
        ];
        for (i, (first, last)) in names.into_iter().take(SEEDED_BOOKINGS).enumerate() {
            state.insert(json!({
                "firstname": first,
                "lastname": last,
                "totalprice": 100 + i as i64 * 50,
                "depositpaid": i % 2 == 0,
                "bookingdates": {"checkin": "2024-01-01", "checkout": "2024-01-05"},
                "additionalneeds": "Breakfast"
            }));
        }
        state
    }

    fn insert(&mut self, booking: Value) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.bookings.insert(id, booking);
        id
    }

    fn issue_token(&mut self) -> String {
        let token = format!("{:015x}", 0x5eed_u64.wrapping_mul(self.tokens.len() as u64 + 1));
        self.tokens.insert(token.clone());
        token
    }

    fn is_authorized(&self, request: &Request) -> bool {
        request
            .headers
            .get_all("cookie")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix("token="))
            .any(|token| self.tokens.contains(token))
    }
}

type SharedState = Arc<Mutex<BookerState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, BookerState> {
    // A panicking responder must not take the rest of the suite down with it.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn text(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "text/plain; charset=utf-8")
        .set_body_string(body)
}

fn parse_booking(body: &[u8]) -> Option<(Value, BookingRecord)> {
    let raw = std::str::from_utf8(body).ok()?;
    let record = decode_booking_record(raw).ok()?;
    let value = serde_json::to_value(&record).ok()?;
    Some((value, record))
}

fn booking_id(request: &Request) -> Option<u64> {
    request
        .url
        .path()
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

struct AuthResponder(SharedState);

impl Respond for AuthResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let accepted = serde_json::from_slice::<Value>(&request.body)
            .map(|body| body["username"] == USERNAME && body["password"] == PASSWORD)
            .unwrap_or(false);

        if accepted {
            let token = lock(&self.0).issue_token();
            ResponseTemplate::new(200).set_body_json(json!({ "token": token }))
        } else {
            ResponseTemplate::new(200).set_body_json(json!({"reason": "Bad credentials"}))
        }
    }
}

struct CollectionResponder(SharedState);

impl Respond for CollectionResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = lock(&self.0);
        match request.method.as_str() {
            "GET" => {
                let ids: Vec<Value> = state
                    .bookings
                    .keys()
                    .map(|id| json!({ "bookingid": id }))
                    .collect();
                ResponseTemplate::new(200).set_body_json(Value::Array(ids))
            }
            "POST" => match parse_booking(&request.body) {
                Some((value, _)) => {
                    let id = state.insert(value.clone());
                    debug!(booking_id = id, "Mock booking created");
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "bookingid": id, "booking": value }))
                }
                None => text(500, "Internal Server Error"),
            },
            _ => text(404, "Not Found"),
        }
    }
}

struct ItemResponder(SharedState);

impl ItemResponder {
    fn get(state: &BookerState, id: Option<u64>) -> ResponseTemplate {
        match id.and_then(|id| state.bookings.get(&id)) {
            Some(booking) => ResponseTemplate::new(200).set_body_json(booking),
            None => text(404, "Not Found"),
        }
    }

    fn put(state: &mut BookerState, id: u64, body: &[u8]) -> ResponseTemplate {
        match parse_booking(body) {
            Some((value, _)) => {
                state.bookings.insert(id, value.clone());
                ResponseTemplate::new(200).set_body_json(value)
            }
            None => text(400, "Bad Request"),
        }
    }

    fn patch(state: &mut BookerState, id: u64, body: &[u8]) -> ResponseTemplate {
        let Ok(Value::Object(changes)) = serde_json::from_slice::<Value>(body) else {
            return text(400, "Bad Request");
        };
        let Some(Value::Object(current)) = state.bookings.get(&id).cloned() else {
            return text(405, "Method Not Allowed");
        };

        let mut merged = current;
        merged.extend(changes);
        match parse_booking(Value::Object(merged).to_string().as_bytes()) {
            Some((value, _)) => {
                state.bookings.insert(id, value.clone());
                ResponseTemplate::new(200).set_body_json(value)
            }
            None => text(400, "Bad Request"),
        }
    }
}

impl Respond for ItemResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = lock(&self.0);
        let id = booking_id(request);

        let verb = request.method.as_str();
        if verb == "GET" {
            return Self::get(&state, id);
        }
        if !matches!(verb, "PUT" | "PATCH" | "DELETE") {
            return text(404, "Not Found");
        }
        if !state.is_authorized(request) {
            return text(403, "Forbidden");
        }
        let Some(id) = id.filter(|id| state.bookings.contains_key(id)) else {
            return text(405, "Method Not Allowed");
        };

        match verb {
            "PUT" => Self::put(&mut state, id, &request.body),
            "PATCH" => Self::patch(&mut state, id, &request.body),
            _ => {
                state.bookings.remove(&id);
                debug!(booking_id = id, "Mock booking deleted");
                text(201, "Created")
            }
        }
    }
}

/// Stateful stand-in for a restful-booker instance.
pub struct MockBooker {
    server: MockServer,
    state: SharedState,
}

impl MockBooker {
    /// Start a server seeded with [`SEEDED_BOOKINGS`] bookings.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state: SharedState = Arc::new(Mutex::new(BookerState::seeded()));

        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(AuthResponder(Arc::clone(&state)))
            .mount(&server)
            .await;

        Mock::given(path("/booking"))
            .respond_with(CollectionResponder(Arc::clone(&state)))
            .mount(&server)
            .await;

        Mock::given(path_regex(r"^/booking/[^/]+$"))
            .respond_with(ItemResponder(Arc::clone(&state)))
            .mount(&server)
            .await;

        Mock::given(any())
            .respond_with(text(404, "Not Found"))
            .with_priority(u8::MAX)
            .mount(&server)
            .await;

        Self { server, state }
    }

    /// Base URL of the server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Configuration pointing at this server with the accepted credentials.
    pub fn config(&self) -> Config {
        Config::new(self.uri(), Credentials::new(USERNAME, PASSWORD))
    }

    /// An authenticated fixture bound to this server.
    ///
    /// The session is opened on [`uri`](Self::uri) directly, so a
    /// `BOOKER_BASE_URL` in the environment cannot redirect the suite.
    pub async fn fixture(&self) -> turbobooker::Result<BookingFixture> {
        let session = Session::builder().base_url(self.uri()).open()?;
        BookingFixture::with_session(self.config(), session).await
    }

    /// Number of bookings currently stored.
    pub fn booking_count(&self) -> usize {
        lock(&self.state).bookings.len()
    }

    /// Stored booking, if it exists.
    pub fn booking(&self, id: &str) -> Option<Value> {
        let id: u64 = id.parse().ok()?;
        lock(&self.state).bookings.get(&id).cloned()
    }
}
