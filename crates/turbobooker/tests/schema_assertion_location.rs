//! Schema assertion failures point at the calling test
//!
//! Installs a panic hook, so this lives in its own test binary with a single
//! test.

use std::panic;
use std::sync::{Arc, Mutex};

use serde_json::json;
use turbobooker::schema::assert_valid_schema;

#[test]
fn test_failure_is_reported_at_call_site() {
    let location: Arc<Mutex<Option<(String, u32)>>> = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&location);

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if let Some(loc) = info.location() {
            *captured.lock().unwrap() = Some((loc.file().to_string(), loc.line()));
        }
    }));

    let expected_line = line!() + 2;
    let result = panic::catch_unwind(|| {
        assert_valid_schema(&json!({"firstname": "Jim"}), "schemas/booking-data.json");
    });

    panic::set_hook(previous);

    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.starts_with("Schema validation failed - "));
    assert!(message.contains("/lastname"));

    let (file, line) = location.lock().unwrap().clone().unwrap();
    assert!(file.ends_with("schema_assertion_location.rs"), "{}", file);
    assert_eq!(line, expected_line);
}
