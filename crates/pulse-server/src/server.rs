//! HTTP server implementation using axum.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use futures_util::StreamExt;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info};

use pulse_channel::{install_session_count_notifier, run_ticker, Channel, EVENT_CUSTOM};

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::types::{CustomEvent, TriggerEventBody, TriggerResponse};

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    channel: Channel,
    config: ServerConfig,
}

impl AppState {
    pub fn new(channel: Channel, config: ServerConfig) -> Self {
        Self { channel, config }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    // Mirror the request origin so credentialed requests pass. Intentionally
    // permissive: this is a local demo, not a security boundary.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(serve_root))
        .route("/test", get(serve_test))
        .route("/dashboard", get(serve_dashboard))
        .route("/sse", get(sse_handler))
        .route("/trigger-event", post(trigger_event))
        .layer(cors)
        .with_state(state)
}

/// Liveness placeholder.
async fn serve_root() -> &'static str {
    "404 Dude!"
}

/// Timestamped liveness check.
async fn serve_test() -> String {
    let date_str = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S");
    format!("It worked! - {date_str}")
}

/// Serve the embedded dashboard page.
async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// SSE subscription endpoint.
///
/// Registers the caller on the broadcast channel and streams frames until
/// either side disconnects. Dropping the stream deregisters the session.
async fn sse_handler(State(state): State<AppState>) -> impl IntoResponse {
    let subscriber = state.channel.attach();
    info!(
        session_id = %subscriber.id(),
        subscribers = state.channel.session_count(),
        "SSE client connected"
    );

    let stream = subscriber
        .map(|frame| Ok::<Event, Infallible>(Event::default().event(frame.event).data(frame.data)));

    (
        [
            (header::CACHE_CONTROL, "no-cache, no-transform"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(stream).keep_alive(
            KeepAlive::new().interval(Duration::from_secs(state.config.keep_alive_secs)),
        ),
    )
}

/// Trigger a `custom-event` broadcast.
///
/// The acknowledgment is independent of delivery: the broadcast is
/// fire-and-forget and no subscriber confirmation is awaited. An empty
/// body falls back to the configured default message.
async fn trigger_event(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<TriggerResponse>) {
    let parsed: Result<TriggerEventBody, serde_json::Error> = if body.is_empty() {
        Ok(TriggerEventBody::default())
    } else {
        serde_json::from_slice(&body)
    };

    match parsed {
        Ok(body) => {
            let message = body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| state.config.default_message.clone());
            let record = CustomEvent::now(message);
            state.channel.broadcast(&record, EVENT_CUSTOM);
            (
                StatusCode::OK,
                Json(TriggerResponse::ok("Event triggered successfully")),
            )
        }
        Err(e) => {
            error!(error = %e, "Error triggering event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TriggerResponse::error(e.to_string())),
            )
        }
    }
}

/// Run the broadcast server.
///
/// Installs the session-count notifier, spawns the tick emitter, binds the
/// listener and serves until the process exits. There is no drain on
/// shutdown; open sessions close when the process does.
pub async fn run_server(channel: Channel, config: ServerConfig) -> ServerResult<()> {
    install_session_count_notifier(&channel);

    let ticker_channel = channel.clone();
    let tick_interval_ms = config.tick_interval_ms;
    tokio::spawn(async move {
        run_ticker(ticker_channel, tick_interval_ms).await;
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(port = config.port, "Starting broadcast server");

    let app = create_router(AppState::new(channel, config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
