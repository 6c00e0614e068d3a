//! pulse-server - HTTP surface of the broadcast demo.
//!
//! Wires the broadcast channel to the outside world:
//!
//! - `GET /` — liveness placeholder
//! - `GET /test` — timestamped liveness check
//! - `GET /dashboard` — embedded HTML dashboard
//! - `GET /sse` — persistent `text/event-stream` subscription
//! - `POST /trigger-event` — broadcast a user-supplied message
//!
//! # Usage
//!
//! ```ignore
//! use pulse_channel::Channel;
//! use pulse_server::{run_server, ServerConfig};
//!
//! let channel = Channel::new();
//! run_server(channel, ServerConfig::default()).await?;
//! ```

mod config;
mod error;
mod server;
mod types;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{create_router, run_server, AppState};
pub use types::{CustomEvent, TriggerEventBody, TriggerResponse};
