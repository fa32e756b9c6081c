//! Batch response fixtures shared by unit tests.

use serde_json::{Value, json};

/// A successful sub-response. The API double-encodes bodies as strings.
pub fn ok(body: Value) -> Value {
    json!({
        "code": 200,
        "headers": [{"name": "Content-Type", "value": "text/javascript; charset=UTF-8"}],
        "body": body.to_string(),
    })
}

/// A failed sub-response carrying the API's error envelope.
pub fn failed(code: u16) -> Value {
    json!({
        "code": code,
        "headers": [],
        "body": json!({"error": {"message": "failure", "type": "OAuthException", "code": 190}}).to_string(),
    })
}

pub fn me_body() -> Value {
    json!({
        "id": "100001",
        "name": "Ada Example",
        "first_name": "Ada",
        "last_name": "Example",
        "email": "ada@example.com",
        "timezone": -7,
        "picture": {"data": {"url": "https://cdn.example/ada.jpg", "is_silhouette": false}}
    })
}

pub fn reference_body() -> Value {
    json!({"data": [{"id": "200", "name": "Grace"}], "paging": {"next": "https://graph.example/next"}})
}

pub fn friends_body() -> Value {
    json!({
        "200": {"id": "200", "name": "Grace", "gender": "female"},
        "300": {"id": "300", "name": "Alan"}
    })
}

pub fn likes_body() -> Value {
    json!({
        "400": {
            "id": "400",
            "name": "Rust",
            "category": "Software",
            "likes": 90210,
            "cover": {"cover_id": "10151592683026732", "offset_x": 0, "offset_y": 0}
        }
    })
}

pub fn timeline_body() -> Value {
    json!({
        "data": [{"id": "100001_1", "type": "status", "message": "hello"}],
        "paging": {"next": "https://graph.example/next"}
    })
}

pub fn media_body() -> Value {
    json!({
        "data": [{"id": "m1", "images": [{"height": 10, "width": 20, "source": "https://cdn.example/m1"}]}]
    })
}

/// Sub-responses for every position of the profile template, all successful.
pub fn profile_elements() -> Vec<Value> {
    vec![
        ok(me_body()),
        ok(reference_body()),
        ok(reference_body()),
        ok(friends_body()),
        ok(likes_body()),
        ok(timeline_body()),
        ok(timeline_body()),
        ok(media_body()),
        ok(media_body()),
    ]
}

pub fn to_bytes(elements: &[Value]) -> Vec<u8> {
    serde_json::to_vec(elements).unwrap()
}
