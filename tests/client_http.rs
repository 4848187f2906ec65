//! End-to-end tests for the HTTP client against canned backend responses.
//!
//! A throwaway TCP listener answers exactly one request with a fixed
//! response, which is enough to exercise the status, body, and error mapping
//! of each endpoint without a real backend.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use codetalk::{Backend, RagClient, Source};
use tokio_test::{assert_err, assert_ok};

/// Serve one connection with a canned response; resolves to the request head.
async fn canned_server(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = stream.read(&mut buf).await.unwrap_or(0);
        let head = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status_line}\r\n\
             content-type: application/json\r\n\
             content-length: {}\r\n\
             connection: close\r\n\
             \r\n\
             {body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        head
    });
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn ingest_decodes_files_processed() {
    let (base_url, head) = canned_server(
        "200 OK",
        r#"{"status":"completed","repo":"r","files_processed":42,"chunks_stored":512}"#,
    )
    .await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    let response = assert_ok!(client.ingest("https://github.com/user/repo").await);
    assert_eq!(response.files_processed, 42);
    assert_eq!(response.chunks_stored, Some(512));

    assert!(head.await.unwrap().starts_with("POST /ingest HTTP/1.1"));
}

#[tokio::test]
async fn ingest_rejection_surfaces_detail() {
    let (base_url, _head) =
        canned_server("400 Bad Request", r#"{"detail":"not a git repo"}"#).await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    let err = assert_err!(client.ingest("bad-url").await);
    assert!(err.is_validation());
    assert_eq!(err.message(), "not a git repo");
}

#[tokio::test]
async fn ingest_failure_without_detail_is_api_error() {
    let (base_url, _head) = canned_server("500 Internal Server Error", "oops").await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    let err = assert_err!(client.ingest("https://github.com/user/repo").await);
    assert!(err.is_api());
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn ingest_garbled_success_body_is_serialization_error() {
    let (base_url, _head) = canned_server("200 OK", r#"{"unexpected":true}"#).await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    let err = assert_err!(client.ingest("https://github.com/user/repo").await);
    assert!(err.is_serialization());
}

#[tokio::test]
async fn chat_decodes_answer_and_sources() {
    let (base_url, head) = canned_server(
        "200 OK",
        r#"{"status":"success","answer":"X does Y","sources":[{"file_path":"x.go"}]}"#,
    )
    .await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    let response = assert_ok!(client.chat("What does X do?", &[]).await);
    assert_eq!(response.answer, "X does Y");
    assert_eq!(response.sources, vec![Source::new("x.go")]);

    assert!(head.await.unwrap().starts_with("POST /chat HTTP/1.1"));
}

#[tokio::test]
async fn reset_ignores_response_body() {
    let (base_url, head) =
        canned_server("200 OK", r#"{"status":"success","message":"Database cleared"}"#).await;
    let client = RagClient::with_options(Some(base_url), None).unwrap();

    assert_ok!(client.reset().await);
    assert!(head.await.unwrap().starts_with("DELETE /delete HTTP/1.1"));
}

#[tokio::test]
async fn unreachable_backend_is_connection_error() {
    // Bind then drop to find a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RagClient::with_options(Some(format!("http://{addr}")), None).unwrap();
    let err = assert_err!(client.ingest("https://github.com/user/repo").await);
    assert!(err.is_connection());
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn silent_backend_is_timeout_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let _ = stream.read(&mut buf).await;
        // Never answer; the client's bounded wait has to expire.
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = RagClient::with_options(
        Some(format!("http://{addr}")),
        Some(Duration::from_millis(300)),
    )
    .unwrap();
    let err = assert_err!(client.chat("hello?", &[]).await);
    assert!(err.is_timeout());
    assert!(err.is_connectivity());

    server.abort();
}
