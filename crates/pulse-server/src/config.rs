//! Server configuration.

use serde::{Deserialize, Serialize};

/// Broadcast server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Interval between tick broadcasts in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// SSE keep-alive comment interval in seconds.
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
    /// Message broadcast when a trigger request carries none.
    #[serde(default = "default_message")]
    pub default_message: String,
}

fn default_port() -> u16 {
    8080
}

fn default_tick_interval_ms() -> u64 {
    2500
}

fn default_keep_alive_secs() -> u64 {
    15
}

fn default_message() -> String {
    "Button clicked!".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            tick_interval_ms: default_tick_interval_ms(),
            keep_alive_secs: default_keep_alive_secs(),
            default_message: default_message(),
        }
    }
}
