//! End-to-end tests over a real TCP socket.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use vitalis::config::CorsConfig;
use vitalis::error::AppError;
use vitalis::routes::create_router;
use vitalis::server::{bind, serve};

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn test_health_over_tcp_and_graceful_shutdown() {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(&CorsConfig::default()).unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, app, async move {
        let _ = shutdown_rx.await;
    }));

    let response = raw_request(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nOrigin: http://example.com\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    let lower = response.to_ascii_lowercase();
    assert!(lower.contains("access-control-allow-origin: *"));
    assert!(lower.contains("content-type: application/json"));
    assert!(response.ends_with(r#"{"status":"ok"}"#));

    let preflight = raw_request(
        addr,
        "OPTIONS /health HTTP/1.1\r\nHost: localhost\r\nOrigin: http://example.com\r\n\
         Access-Control-Request-Method: GET\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(preflight.starts_with("HTTP/1.1 200 OK"), "{preflight}");
    assert!(preflight
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: *"));

    let missing = raw_request(
        addr,
        "GET /healthx HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

    shutdown_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_shutdown_drains_in_flight_request() {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(&CorsConfig::default()).unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, app, async move {
        let _ = shutdown_rx.await;
    }));

    // Request line only; the headers arrive after shutdown has begun
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    shutdown_tx.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    stream
        .write_all(b"Connection: close\r\n\r\n")
        .await
        .unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("in-flight request was not answered")
        .unwrap();
    let response = String::from_utf8_lossy(&response);
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with(r#"{"status":"ok"}"#));

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after draining")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_to_used_port_fails() {
    let first = bind("127.0.0.1:0").await.unwrap();
    let addr = first.local_addr().unwrap().to_string();

    let err = bind(&addr).await.unwrap_err();
    match err {
        AppError::Bind { addr: reported, .. } => assert_eq!(reported, addr),
        other => panic!("expected bind error, got {other:?}"),
    }
}
