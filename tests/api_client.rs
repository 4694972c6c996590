mod support;

use guest_list::api_client::{ApiClient, AuthToken};
use guest_list::error::ApiError;
use guest_list::models::{RegistrationId, RegistrationStatus};
use serde_json::json;
use support::{mount_lists, registration_json, review_json, EVENT_ID, TOKEN};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lists_registrations_and_reviews_with_bearer_token() {
    let server = MockServer::start().await;
    mount_lists(
        &server,
        json!([
            registration_json("r-1", "confirmed", "Ali Hassan"),
            registration_json("r-2", "checked-in", "Siti"),
        ]),
        json!([review_json("rv-1", 5)]),
    )
    .await;

    let client = ApiClient::new(server.uri(), AuthToken::new(TOKEN)).unwrap();

    let registrations = client.list_registrations(EVENT_ID).await.unwrap();
    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[1].status, RegistrationStatus::CheckedIn);
    assert_eq!(registrations[0].guest.name, "Ali Hassan");

    let reviews = client.list_reviews(EVENT_ID).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].reviewer_name.as_deref(), Some("Siti"));
}

#[tokio::test]
async fn update_status_sends_wire_value_and_returns_registration() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/registrations/r-1/status"))
        .and(header("authorization", "Bearer organizer-token"))
        .and(body_json(json!({ "status": "checked_in" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "registration": registration_json("r-1", "checked_in", "Ali Hassan"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/", server.uri()), AuthToken::new(TOKEN)).unwrap();
    let updated = client
        .update_status(&RegistrationId::from("r-1"), RegistrationStatus::CheckedIn)
        .await
        .unwrap();

    assert_eq!(updated.status, RegistrationStatus::CheckedIn);
}

#[tokio::test]
async fn server_errors_carry_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/registrations/event/e-1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Not your event" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/organizer/reviews"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), AuthToken::new(TOKEN)).unwrap();

    match client.list_registrations(EVENT_ID).await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message.as_deref(), Some("Not your event"));
        }
        other => panic!("expected server error, got {:?}", other),
    }

    match client.list_reviews(EVENT_ID).await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, None);
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/registrations/event/e-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), AuthToken::new(TOKEN)).unwrap();
    assert!(matches!(client.list_registrations(EVENT_ID).await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn ids_are_encoded_as_single_path_segments() {
    let server = MockServer::start().await;
    for (id, encoded) in [("r#1", "r%231"), ("a/b", "a%2Fb"), ("x?y", "x%3Fy")] {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/registrations/{encoded}/status")))
            .and(body_json(json!({ "status": "cancelled" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "registration": registration_json(id, "cancelled", "Ali Hassan"),
            })))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/registrations/event/e%2F2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), AuthToken::new(TOKEN)).unwrap();
    for id in ["r#1", "a/b", "x?y"] {
        let updated = client
            .update_status(&RegistrationId::from(id), RegistrationStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(updated.id.as_str(), id);
    }
    assert!(client.list_registrations("e/2").await.unwrap().is_empty());

    for request in server.received_requests().await.unwrap() {
        assert_eq!(request.url.query(), None);
        assert_eq!(request.url.fragment(), None);
    }
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campus/api/registrations/event/e-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/campus/", server.uri()), AuthToken::new(TOKEN)).unwrap();
    assert!(client.list_registrations(EVENT_ID).await.unwrap().is_empty());
}

#[test]
fn rejects_unusable_base_url() {
    for raw in ["not a url", "mailto:organizer@uni.edu"] {
        assert!(matches!(
            ApiClient::new(raw, AuthToken::new(TOKEN)),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}

#[test]
fn token_is_not_printed() {
    let token = AuthToken::new("secret-value");
    assert_eq!(format!("{:?}", token), "AuthToken(***)");
}
