//! End-to-end tests over a real listener.
//!
//! Exercises the full path: real TCP server, real HTTP client, SSE frames
//! on the wire.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::timeout;

use pulse_channel::{install_session_count_notifier, Channel};
use pulse_server::{create_router, AppState, ServerConfig};

/// Start a server on an ephemeral port; returns its base URL and channel.
async fn start_server() -> (String, Channel) {
    let channel = Channel::new();
    install_session_count_notifier(&channel);

    let app = create_router(AppState::new(channel.clone(), ServerConfig::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), channel)
}

/// Poll until the channel settles at the expected session count.
async fn wait_for_count(channel: &Channel, expected: usize) {
    let settled = timeout(Duration::from_secs(5), async {
        loop {
            if channel.session_count() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(
        settled.is_ok(),
        "session count did not settle at {expected} (currently {})",
        channel.session_count()
    );
}

#[tokio::test]
async fn sse_delivers_triggered_events() {
    let (base, channel) = start_server().await;
    let client = reqwest::Client::new();

    let sse = client.get(format!("{base}/sse")).send().await.unwrap();
    assert_eq!(sse.status(), 200);
    assert_eq!(
        sse.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );
    wait_for_count(&channel, 1).await;

    let resp = client
        .post(format!("{base}/trigger-event"))
        .json(&serde_json::json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let ack: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(ack["success"], true);

    // Read the stream until the custom-event frame arrives
    let mut stream = sse.bytes_stream();
    let mut received = String::new();
    let found = timeout(Duration::from_secs(5), async {
        while let Some(chunk) = stream.next().await {
            received.push_str(&String::from_utf8_lossy(&chunk.unwrap()));
            if received.contains("event: custom-event") && received.contains("hello") {
                return true;
            }
        }
        false
    })
    .await;

    assert!(found.unwrap_or(false), "no custom-event frame in: {received}");
}

#[tokio::test]
async fn reconnecting_client_is_counted_once() {
    let (base, channel) = start_server().await;
    let client = reqwest::Client::new();

    let first = client.get(format!("{base}/sse")).send().await.unwrap();
    wait_for_count(&channel, 1).await;

    let _second = client.get(format!("{base}/sse")).send().await.unwrap();
    wait_for_count(&channel, 2).await;

    // Sever the first connection; the registry settles back to one
    drop(first);
    wait_for_count(&channel, 1).await;
}
