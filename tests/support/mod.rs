#![allow(dead_code)]

use guest_list::config::{ApiConfig, AppConfig, Config, GuestListConfig};
use guest_list::GuestListState;
use serde_json::{json, Value};
use std::path::PathBuf;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EVENT_ID: &str = "e-1";
pub const TOKEN: &str = "organizer-token";

pub fn config(base_url: &str) -> Config {
    Config {
        app: AppConfig {
            rust_log: "guest_list=debug".to_string(),
            log_format: "pretty".to_string(),
        },
        api: ApiConfig {
            base_url: base_url.to_string(),
            token: TOKEN.to_string(),
            request_timeout_seconds: Some(5),
        },
        guest_list: GuestListConfig {
            event_id: EVENT_ID.to_string(),
            page_size: 10,
            poll_interval_seconds: 5,
            export_dir: PathBuf::from("."),
        },
    }
}

pub fn state(server: &MockServer) -> GuestListState {
    let config = config(&server.uri());
    let client = guest_list::api_client::ApiClient::from_config(&config.api).expect("http client");
    GuestListState::with_client(config, client)
}

pub fn registration_json(id: &str, status: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "status": status,
        "guest": {
            "name": name,
            "student_id": format!("S-{id}"),
            "email": format!("{id}@uni.edu"),
        },
        "created_at": "2026-03-02T09:30:00Z",
        "event_id": EVENT_ID,
    })
}

pub fn review_json(id: &str, rating: u8) -> Value {
    json!({
        "_id": id,
        "rating": rating,
        "comment": "Great talk",
        "student_name": "Siti",
        "createdAt": "2026-03-03T18:00:00Z",
    })
}

/// Монтирует GET списка регистраций и отзывов события.
pub async fn mount_lists(server: &MockServer, registrations: Value, reviews: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/registrations/event/{EVENT_ID}")))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(registrations))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/events/organizer/reviews"))
        .and(query_param("event_id", EVENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews))
        .mount(server)
        .await;
}
