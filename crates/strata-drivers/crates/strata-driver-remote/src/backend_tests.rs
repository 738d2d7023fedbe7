//! Unit tests for the remote proxy backend

use super::*;
use pretty_assertions::assert_eq;
use strata_core::{Cell, QueryBackend, StrataError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Serve exactly one canned HTTP response on an ephemeral port.
async fn serve_once(status_line: &str, body: String) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 8192];
        let _ = socket.read(&mut buf).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    addr
}

#[test]
fn test_backend_accessors() {
    let backend = RemoteBackend::new("/proxy/strata/query", "default").unwrap();
    assert_eq!(backend.name(), "remote");
    assert_eq!(backend.endpoint(), "/proxy/strata/query");
    assert_eq!(backend.database(), "default");
}

#[tokio::test]
async fn test_successful_response_is_decoded() {
    let body = concat!(
        r#"{"columns":[{"name":"id","data_type":"INTEGER","nullable":false}],"#,
        r#""rows":[[1],[2]],"row_count":2,"execution_time_ms":12}"#
    )
    .to_string();
    let addr = serve_once("200 OK", body).await;

    let backend = RemoteBackend::new(format!("http://{}/query", addr), "default").unwrap();
    let result = backend.execute("SELECT id FROM t").await.unwrap();

    assert_eq!(result.columns[0].name, "id");
    assert_eq!(result.rows, vec![vec![Cell::Number(1.0)], vec![Cell::Number(2.0)]]);
    assert_eq!(result.row_count, 2);
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_proxy_reported_error_passes_through() {
    let body = concat!(
        r#"{"columns":[],"rows":[],"row_count":0,"execution_time_ms":3,"#,
        r#""error":"table t does not exist"}"#
    )
    .to_string();
    let addr = serve_once("200 OK", body).await;

    let backend = RemoteBackend::new(format!("http://{}/query", addr), "default").unwrap();
    let result = backend.execute("SELECT * FROM t").await.unwrap();

    assert!(!result.is_ok());
    assert_eq!(result.error.as_deref(), Some("table t does not exist"));
}

#[tokio::test]
async fn test_http_failure_carries_status_and_body() {
    let addr = serve_once("500 Internal Server Error", "kaput".to_string()).await;

    let backend = RemoteBackend::new(format!("http://{}/query", addr), "default").unwrap();
    let err = backend.execute("SELECT 1").await.unwrap_err();

    match err {
        StrataError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "kaput");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_transport_error() {
    let addr = serve_once("200 OK", "not json".to_string()).await;

    let backend = RemoteBackend::new(format!("http://{}/query", addr), "default").unwrap();
    let err = backend.execute("SELECT 1").await.unwrap_err();
    assert!(err.to_string().contains("Invalid proxy response"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = RemoteBackend::new(format!("http://{}/query", addr), "default").unwrap();
    let err = backend.execute("SELECT 1").await.unwrap_err();
    assert!(matches!(err, StrataError::Transport(_)));
}
