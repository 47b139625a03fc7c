use std::time::Duration;

use application::{BridgeError, FederationBridge};
use domain::{AvatarFile, AvatarMetadata, ContentUrl, ExternalId};
use infrastructure::{MatrixBridge, MatrixBridgeConfig};
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "as_token";

fn bridge(server: &MockServer) -> MatrixBridge {
    MatrixBridge::new(MatrixBridgeConfig {
        homeserver_url: server.uri(),
        access_token: TOKEN.into(),
        request_timeout: Duration::from_millis(500),
        typing_timeout: Duration::from_secs(30),
    })
    .unwrap()
}

fn avatar() -> (AvatarFile, AvatarMetadata) {
    (
        AvatarFile::new(vec![0x89, 0x50, 0x4e, 0x47]),
        AvatarMetadata::new("image/png", "avatar.png").unwrap(),
    )
}

fn alice() -> ExternalId {
    ExternalId::parse("@alice:example.org").unwrap()
}

#[tokio::test]
async fn upload_posts_file_and_returns_content_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_matrix/media/v3/upload"))
        .and(query_param("filename", "avatar.png"))
        .and(header("authorization", "Bearer as_token"))
        .and(header("content-type", "image/png"))
        .and(body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "content_uri": "mxc://example.org/abc" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (file, metadata) = avatar();
    let url = bridge(&server).upload_content(&file, &metadata).await.unwrap();

    assert_eq!(url, Some(ContentUrl::parse("mxc://example.org/abc").unwrap()));
}

#[tokio::test]
async fn rejected_upload_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_matrix/media/v3/upload"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({
            "errcode": "M_TOO_LARGE",
            "error": "Upload is too large"
        })))
        .mount(&server)
        .await;

    let (file, metadata) = avatar();
    let url = bridge(&server).upload_content(&file, &metadata).await.unwrap();

    assert_eq!(url, None);
}

async fn upload_with_success_body(body: ResponseTemplate) -> Result<Option<ContentUrl>, BridgeError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_matrix/media/v3/upload"))
        .respond_with(body)
        .mount(&server)
        .await;

    let (file, metadata) = avatar();
    bridge(&server).upload_content(&file, &metadata).await
}

#[tokio::test]
async fn upload_without_content_uri_is_unavailable() {
    let result = upload_with_success_body(ResponseTemplate::new(200).set_body_json(json!({}))).await;

    assert!(matches!(result, Err(BridgeError::Unavailable(_))));
}

#[tokio::test]
async fn upload_with_blank_content_uri_is_unavailable() {
    let result = upload_with_success_body(
        ResponseTemplate::new(200).set_body_json(json!({ "content_uri": "  " })),
    )
    .await;

    assert!(matches!(result, Err(BridgeError::Unavailable(_))));
}

#[tokio::test]
async fn upload_with_unreadable_body_is_unavailable() {
    let result = upload_with_success_body(
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string("<html>proxy error</html>"),
    )
    .await;

    assert!(matches!(result, Err(BridgeError::Unavailable(_))));
}

#[tokio::test]
async fn upload_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_matrix/media/v3/upload"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (file, metadata) = avatar();
    let result = bridge(&server).upload_content(&file, &metadata).await;

    assert!(matches!(result, Err(BridgeError::Unavailable(_))));
}

#[tokio::test]
async fn set_remote_avatar_puts_profile_avatar_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/_matrix/client/v3/profile/@alice:example.org/avatar_url"))
        .and(query_param("user_id", "@alice:example.org"))
        .and(header("authorization", "Bearer as_token"))
        .and(body_json(json!({ "avatar_url": "mxc://example.org/abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    bridge(&server)
        .set_remote_avatar(&alice(), &ContentUrl::parse("mxc://example.org/abc").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn set_remote_avatar_failure_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errcode": "M_FORBIDDEN",
            "error": "Application service has not registered this user"
        })))
        .mount(&server)
        .await;

    let result = bridge(&server)
        .set_remote_avatar(&alice(), &ContentUrl::parse("mxc://example.org/abc").unwrap())
        .await;

    match result {
        Err(BridgeError::Unavailable(message)) => assert!(message.contains("403")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn notify_typing_sends_timeout_only_when_typing() {
    let server = MockServer::start().await;
    let room = ExternalId::parse("!general:example.org").unwrap();
    Mock::given(method("PUT"))
        .and(path("/_matrix/client/v3/rooms/!general:example.org/typing/@alice:example.org"))
        .and(query_param("user_id", "@alice:example.org"))
        .and(body_json(json!({ "typing": true, "timeout": 30000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/_matrix/client/v3/rooms/!general:example.org/typing/@alice:example.org"))
        .and(body_json(json!({ "typing": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let bridge = bridge(&server);
    bridge.notify_typing(&room, &alice(), true).await.unwrap();
    bridge.notify_typing(&room, &alice(), false).await.unwrap();
}

#[tokio::test]
async fn slow_homeserver_times_out_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let room = ExternalId::parse("!general:example.org").unwrap();
    let result = bridge(&server).notify_typing(&room, &alice(), true).await;

    assert!(matches!(result, Err(BridgeError::Unavailable(_))));
}
