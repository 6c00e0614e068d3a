//! Stream sessions.
//!
//! A session is the sender half of one open subscriber stream. Frames are
//! queued on an unbounded mpsc channel so `send` never blocks the
//! broadcaster; the HTTP layer drains the receiver half into the wire.

use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique identity of one subscriber session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One named event frame queued toward a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    /// Event name (`tick`, `session-count`, `custom-event`).
    pub event: String,
    /// Serialized payload.
    pub data: String,
}

/// The sender half of one open subscriber stream.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    tx: mpsc::UnboundedSender<EventFrame>,
}

impl Session {
    /// Open a new session, returning the sender half and the frame
    /// receiver the transport drains.
    pub fn open() -> (Self, mpsc::UnboundedReceiver<EventFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            id: SessionId::new(),
            tx,
        };
        (session, rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Queue one frame toward the subscriber.
    ///
    /// Returns `false` when the receiver half is gone, which the channel
    /// treats as the session having closed. Never blocks.
    pub fn send(&self, event: &str, data: &str) -> bool {
        self.tx
            .send(EventFrame {
                event: event.to_string(),
                data: data.to_string(),
            })
            .is_ok()
    }

    /// Whether the subscriber side has disconnected.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
