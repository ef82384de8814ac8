//! Tests for UpstreamClient.

use super::*;

fn client_for(url: Option<String>, key: Option<&str>) -> UpstreamClient {
    UpstreamClient::from_config(&UpstreamConfig {
        url,
        master_key: key.map(str::to_string),
        timeout_secs: 5,
    })
    .unwrap()
}

/// Listener that accepts connections and never answers them.
async fn silent_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn sends_master_key_as_bearer_token() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/models")
        .match_header("authorization", "Bearer sk-master")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let upstream = client_for(Some(server.url()), Some("sk-master"));
    let reply = upstream.fetch_models().await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, 200);
}

#[tokio::test]
async fn returns_upstream_body_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let raw = "{ \"object\": \"list\",\n  \"data\": [ {\"id\":\"gpt-4\", \"owned_by\":\"openai\"} ] }";

    let _mock = server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(raw)
        .create_async()
        .await;

    let upstream = client_for(Some(server.url()), Some("sk-master"));
    let reply = upstream.fetch_models().await.unwrap();

    assert_eq!(&reply.body[..], raw.as_bytes());
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let upstream = client_for(Some(format!("{}/", server.url())), Some("sk-master"));
    upstream.fetch_models().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_upstream_status_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/models")
        .with_status(401)
        .with_body(r#"{"error":"invalid key"}"#)
        .create_async()
        .await;

    let upstream = client_for(Some(server.url()), Some("wrong-key"));
    let result = upstream.fetch_models().await;

    mock.assert_async().await;
    assert_eq!(result.unwrap_err(), RelayError::UpstreamStatus(401));
}

#[tokio::test]
async fn non_json_body_is_malformed_payload() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body("<html>gateway error</html>")
        .create_async()
        .await;

    let upstream = client_for(Some(server.url()), Some("sk-master"));
    let err = upstream.fetch_models().await.unwrap_err();

    assert_eq!(err.kind(), "malformed_payload");
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    let upstream = client_for(Some("http://127.0.0.1:1".to_string()), Some("sk-master"));

    let err = upstream.fetch_models().await.unwrap_err();

    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn silent_upstream_is_timeout_error() {
    let upstream = UpstreamClient::from_config(&UpstreamConfig {
        url: Some(silent_upstream().await),
        master_key: Some("sk-master".to_string()),
        timeout_secs: 1,
    })
    .unwrap();

    let err = upstream.fetch_models().await.unwrap_err();

    assert_eq!(err.kind(), "timeout");
    assert_eq!(err, RelayError::Timeout);
}

#[tokio::test]
async fn missing_url_or_key_is_not_configured() {
    let no_url = client_for(None, Some("sk-master"));
    let no_key = client_for(Some("http://localhost:4000".to_string()), None);

    assert!(!no_url.is_configured());
    assert!(!no_key.is_configured());
    assert_eq!(no_url.fetch_models().await.unwrap_err(), RelayError::NotConfigured);
    assert_eq!(no_key.fetch_models().await.unwrap_err(), RelayError::NotConfigured);
}

#[tokio::test]
async fn every_call_reaches_upstream() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(r#"{"data":[{"id":"gpt-4"}]}"#)
        .expect(3)
        .create_async()
        .await;

    let upstream = client_for(Some(server.url()), Some("sk-master"));
    for _ in 0..3 {
        upstream.fetch_models().await.unwrap();
    }

    mock.assert_async().await;
}

#[test]
fn models_url_joins_base_and_path() {
    let upstream = client_for(Some("http://litellm:4000".to_string()), Some("k"));
    assert_eq!(upstream.models_url().as_deref(), Some("http://litellm:4000/v1/models"));
}
