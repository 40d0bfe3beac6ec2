//! Tests for the upstream HTTP client against local stand-ins for SiliconFlow.

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use autogen_api::domain::reply_content;
use autogen_api::{ChatClient, ChatMessage, CompletionRequest, DomainError, Operation, SiliconFlowClient};

const PATH: &str = "/v1/chat/completions";

fn request() -> CompletionRequest {
    CompletionRequest::new(
        "Qwen/Qwen2.5-7B-Instruct",
        vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
        Operation::Chat.sampling(),
    )
}

fn client(key: Option<&str>, endpoint: String, timeout: Duration) -> SiliconFlowClient {
    SiliconFlowClient::new(key.map(str::to_string), endpoint, timeout)
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_posts_payload_with_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "Qwen/Qwen2.5-7B-Instruct",
            "max_tokens": 1000,
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(
        Some("sk-test"),
        format!("{}{PATH}", server.url()),
        Duration::from_secs(5),
    );
    let body = client.complete(&request()).await.expect("Request failed");

    assert_eq!(reply_content(&body).unwrap(), Some("hello"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let client = client(
        Some("sk-bad"),
        format!("{}{PATH}", server.url()),
        Duration::from_secs(5),
    );
    let err = client.complete(&request()).await.unwrap_err();

    match err {
        DomainError::Upstream { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client(
        Some("sk-test"),
        format!("{}{PATH}", server.url()),
        Duration::from_secs(5),
    );
    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, DomainError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_missing_key_never_touches_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client(None, format!("{}{PATH}", server.url()), Duration::from_secs(5));
    let err = client.complete(&request()).await.unwrap_err();

    assert!(matches!(err, DomainError::Configuration(_)));
    assert!(err.to_string().contains("SILICONFLOW_API_KEY"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timeout_aborts_and_closes_connection() {
    // Accepts the connection, swallows the request and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent_server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
    });

    let timeout = Duration::from_millis(300);
    let client = client(Some("sk-test"), format!("http://{addr}{PATH}"), timeout);
    let err = client.complete(&request()).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(matches!(err, DomainError::Timeout(d) if d == timeout));

    tokio::time::timeout(Duration::from_secs(5), silent_server)
        .await
        .expect("connection was left open after timeout")
        .unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(
        Some("sk-test"),
        format!("http://{addr}{PATH}"),
        Duration::from_secs(5),
    );
    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, DomainError::Transport(_)), "got {err:?}");
}
