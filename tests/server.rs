//! End-to-end tests driving the real listener and accept loop over TCP.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

use greeting_server::config::{AppState, Config, LoggingConfig, ServerConfig};
use greeting_server::server::Server;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        logging: LoggingConfig {
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
    }
}

/// Bind an ephemeral port, run the accept loop in the background, and
/// return the bound address.
async fn spawn_server() -> SocketAddr {
    let state = Arc::new(AppState::new(test_config()));
    let server = Server::bind("127.0.0.1:0".parse().unwrap(), state).unwrap();
    let addr = server.local_addr().unwrap();

    let shutdown = Arc::new(Notify::new());
    tokio::spawn(async move {
        let _ = server.serve(shutdown).await;
    });

    addr
}

struct RawResponse {
    status: u16,
    /// Status line and headers, lowercased for assertions
    head: String,
    body: String,
}

async fn send_request(addr: SocketAddr, method: &str, target: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request =
        format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let text = String::from_utf8_lossy(&raw).into_owned();
    let (head, body) = text.split_once("\r\n\r\n").expect("malformed response");
    let status = head
        .split_whitespace()
        .nth(1)
        .expect("missing status code")
        .parse()
        .expect("non-numeric status code");

    RawResponse {
        status,
        head: head.to_ascii_lowercase(),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_get_root_returns_hello_world() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Hello world");
    assert!(resp.head.contains("content-type: text/plain; charset=utf-8"));
}

#[tokio::test]
async fn test_get_evening_returns_good_evening() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/evening").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Good evening");
    assert!(resp.head.contains("content-type: text/plain; charset=utf-8"));
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/missing").await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, "404 Not Found");
    assert!(resp.head.contains("content-type: text/plain; charset=utf-8"));
}

#[tokio::test]
async fn test_post_root_returns_405() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "POST", "/").await;
    assert_eq!(resp.status, 405);
    assert_eq!(resp.body, "405 Method Not Allowed");
    assert!(resp.head.contains("allow: get"));
}

#[tokio::test]
async fn test_delete_evening_returns_405() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "DELETE", "/evening").await;
    assert_eq!(resp.status, 405);
    assert_eq!(resp.body, "405 Method Not Allowed");
}

#[tokio::test]
async fn test_put_returns_405_on_known_paths() {
    let addr = spawn_server().await;
    for target in ["/", "/evening"] {
        let resp = send_request(addr, "PUT", target).await;
        assert_eq!(resp.status, 405, "PUT {target}");
    }
}

#[tokio::test]
async fn test_path_matching_is_case_sensitive() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/EVENING").await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, "404 Not Found");
}

#[tokio::test]
async fn test_query_string_is_ignored_for_matching() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/?x=1").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Hello world");

    let resp = send_request(addr, "GET", "/evening?greeting=late").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Good evening");
}

#[tokio::test]
async fn test_trailing_slash_is_not_normalized() {
    let addr = spawn_server().await;
    let resp = send_request(addr, "GET", "/evening/").await;
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let addr = spawn_server().await;
    for _ in 0..5 {
        let resp = send_request(addr, "GET", "/").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "Hello world");
    }
    for _ in 0..5 {
        let resp = send_request(addr, "GET", "/evening").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "Good evening");
    }
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let state = Arc::new(AppState::new(test_config()));
    let first = Server::bind("127.0.0.1:0".parse().unwrap(), Arc::clone(&state)).unwrap();
    let addr = first.local_addr().unwrap();

    // The port is held by the first listener, so a second bind must fail.
    assert!(Server::bind(addr, state).is_err());
}
