//! Integration tests for the articles API client.
//!
//! These tests run the HTTP client against a wiremock server to verify
//! request shapes (envelope, headers, endpoints) and error mapping.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkpress::remote::{ArticlePayload, DevtoClient, PublishError, Publisher};

fn payload(title: &str) -> ArticlePayload {
    ArticlePayload {
        title: title.into(),
        body_markdown: "Hello.".into(),
        published: false,
        tags: vec!["rust".into()],
        series: None,
        main_image: None,
        canonical_url: None,
        description: String::new(),
        organization_id: None,
    }
}

async fn client(server: &MockServer) -> DevtoClient {
    DevtoClient::with_api_base("test-key", server.uri())
}

#[tokio::test]
async fn create_posts_enveloped_payload_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "article": {
                "title": "New Post",
                "body_markdown": "Hello.",
                "published": false,
                "tags": ["rust"]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "title": "New Post",
            "url": "https://dev.to/me/new-post",
            "published": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .await
        .create(&payload("New Post"))
        .await
        .unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(created.url, "https://dev.to/me/new-post");
}

#[tokio::test]
async fn update_puts_to_article_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/articles/7"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "article": { "title": "Edited" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "Edited",
            "url": "https://dev.to/me/edited",
            "published": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server)
        .await
        .update(7, &payload("Edited"))
        .await
        .unwrap();
    assert_eq!(updated.url, "https://dev.to/me/edited");
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "title": "Nine",
            "url": "https://dev.to/me/nine",
            "published": true
        })))
        .mount(&server)
        .await;

    let article = client(&server).await.get_by_id(9).await.unwrap();
    assert_eq!(article.id, 9);
    assert_eq!(article.title, "Nine");
    assert!(article.published);
}

#[tokio::test]
async fn list_mine_hits_me_all() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/me/all"))
        .and(header("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "A", "url": "https://dev.to/me/a", "published": true },
            { "id": 2, "title": "B", "url": "https://dev.to/me/b", "published": false }
        ])))
        .mount(&server)
        .await;

    let articles = client(&server).await.list_mine().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, 1);
    assert!(!articles[1].published);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "unauthorized" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create(&payload("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::AuthFailed(_)));
}

#[tokio::test]
async fn not_found_maps_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/articles/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .update(404, &payload("x"))
        .await
        .unwrap_err();
    match err {
        PublishError::NotFound(message) => assert_eq!(message, "not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create(&payload("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::RateLimited));
}

#[tokio::test]
async fn validation_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "error": "Title can't be blank" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create(&payload(""))
        .await
        .unwrap_err();
    match err {
        PublishError::ApiError { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Title can't be blank");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_api_key_short_circuits_without_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and surface differently.
    let client = DevtoClient::with_api_base("", server.uri());
    let err = client.create(&payload("x")).await.unwrap_err();
    assert!(matches!(err, PublishError::AuthRequired));
}

#[tokio::test]
async fn optional_fields_are_omitted_from_the_wire() {
    let server = MockServer::start().await;
    // Matches only when the serialized article has no "series" key.
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "url": "https://dev.to/me/a"
        })))
        .mount(&server)
        .await;

    let received = client(&server).await.create(&payload("A")).await.unwrap();
    assert_eq!(received.id, 1);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["article"].get("series").is_none());
    assert!(body["article"].get("organization_id").is_none());
}
