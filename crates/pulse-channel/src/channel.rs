//! Broadcast channel.
//!
//! A [`Channel`] owns the registry of open sessions and fans named events
//! out to all of them. Membership changes are reported synchronously to
//! registered listeners, which is how the session-count notifier works.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::session::{EventFrame, Session, SessionId};

/// Event name for the periodic counter broadcast.
pub const EVENT_TICK: &str = "tick";
/// Event name for membership-size broadcasts.
pub const EVENT_SESSION_COUNT: &str = "session-count";
/// Event name for user-triggered broadcasts.
pub const EVENT_CUSTOM: &str = "custom-event";

/// Membership change reported to channel listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Registered(SessionId),
    Deregistered(SessionId),
}

type Listener = Arc<dyn Fn(&Channel, SessionChange) + Send + Sync>;

/// Registry of open sessions plus fan-out logic for one logical stream.
///
/// Cheap to clone; all clones share the same registry. Construct one per
/// server and pass it to whatever needs it - there is no global instance.
#[derive(Clone, Default)]
pub struct Channel {
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    sessions: Mutex<HashMap<SessionId, Session>>,
    listeners: Mutex<Vec<Listener>>,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session to the registry. Membership listeners run
    /// synchronously before this returns.
    pub fn register(&self, session: Session) {
        let id = session.id();
        self.shared.sessions.lock().insert(id, session);
        debug!(session_id = %id, "Session registered");
        self.notify(SessionChange::Registered(id));
    }

    /// Remove a session from the registry. Idempotent: a second call for
    /// the same id is a no-op and fires no notification, so the two
    /// removal paths (stream drop, failed send) can race safely.
    pub fn deregister(&self, id: SessionId) {
        if self.shared.sessions.lock().remove(&id).is_none() {
            return;
        }
        debug!(session_id = %id, "Session deregistered");
        self.notify(SessionChange::Deregistered(id));
    }

    /// Number of currently registered sessions.
    pub fn session_count(&self) -> usize {
        self.shared.sessions.lock().len()
    }

    /// Register a membership listener.
    ///
    /// Listeners are invoked synchronously inside `register`/`deregister`,
    /// after the registry lock is released, so they may call `broadcast`.
    pub fn on_session_change<F>(&self, listener: F)
    where
        F: Fn(&Channel, SessionChange) + Send + Sync + 'static,
    {
        self.shared.listeners.lock().push(Arc::new(listener));
    }

    /// Open a new session, register it, and return the subscriber half.
    /// Dropping the subscriber deregisters the session.
    pub fn attach(&self) -> Subscriber {
        let (session, rx) = Session::open();
        let id = session.id();
        self.register(session);
        Subscriber {
            id,
            rx,
            channel: self.clone(),
        }
    }

    /// Fan a named event out to every registered session.
    ///
    /// The payload is serialized once: integers render as their decimal
    /// form (`42`), structs as JSON objects. Sessions whose subscriber is
    /// gone are removed from the registry after the fan-out loop; one
    /// failed recipient never affects delivery to the others.
    pub fn broadcast<T>(&self, payload: &T, event: &str)
    where
        T: Serialize + ?Sized,
    {
        let data = match serde_json::to_string(payload) {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, event, "Failed to serialize broadcast payload");
                return;
            }
        };

        // Snapshot the registry so sends happen outside the lock.
        let targets: Vec<Session> = self.shared.sessions.lock().values().cloned().collect();
        trace!(event, recipients = targets.len(), "Broadcasting");

        let mut closed = Vec::new();
        for session in &targets {
            if !session.send(event, &data) {
                closed.push(session.id());
            }
        }

        for id in closed {
            debug!(session_id = %id, "Send failed, dropping closed session");
            self.deregister(id);
        }
    }

    fn notify(&self, change: SessionChange) {
        let listeners: Vec<Listener> = self.shared.listeners.lock().clone();
        for listener in &listeners {
            listener(self, change);
        }
    }
}

/// Rebroadcast the registry size as a `session-count` event on every
/// membership change. Install once at startup.
pub fn install_session_count_notifier(channel: &Channel) {
    channel.on_session_change(|channel, _change| {
        channel.broadcast(&channel.session_count(), EVENT_SESSION_COUNT);
    });
}

/// The receiving half of one registered session.
///
/// Yields frames queued by `broadcast`. Dropping it deregisters the
/// session, which is how client disconnects propagate to the channel.
pub struct Subscriber {
    id: SessionId,
    rx: mpsc::UnboundedReceiver<EventFrame>,
    channel: Channel,
}

impl Subscriber {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Receive the next frame. Resolves to `None` once the session is
    /// removed from the registry and the queue is drained.
    pub async fn recv(&mut self) -> Option<EventFrame> {
        self.rx.recv().await
    }
}

impl Stream for Subscriber {
    type Item = EventFrame;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.channel.deregister(self.id);
    }
}
