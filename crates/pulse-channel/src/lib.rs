//! pulse-channel - one-to-many broadcast over persistent streams.
//!
//! This crate holds the broadcast core of the demo server:
//!
//! - [`Session`]: the sender half of one open subscriber stream
//! - [`Channel`]: the registry of open sessions plus fan-out logic
//! - [`run_ticker`]: periodic counter broadcast (`tick` events)
//! - [`install_session_count_notifier`]: rebroadcasts the registry size
//!   on every membership change (`session-count` events)
//!
//! # Usage
//!
//! ```ignore
//! use pulse_channel::{install_session_count_notifier, Channel, EVENT_TICK};
//!
//! let channel = Channel::new();
//! install_session_count_notifier(&channel);
//!
//! let mut subscriber = channel.attach();
//! channel.broadcast(&42u64, EVENT_TICK);
//!
//! let frame = subscriber.recv().await.unwrap();
//! assert_eq!(frame.data, "42");
//! ```

mod channel;
mod session;
mod ticker;

pub use channel::{
    install_session_count_notifier, Channel, SessionChange, Subscriber, EVENT_CUSTOM,
    EVENT_SESSION_COUNT, EVENT_TICK,
};
pub use session::{EventFrame, Session, SessionId};
pub use ticker::run_ticker;
