//! Notifications emitted for external observers.

use crate::types::{Principal, Timestamp};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::mem;

/// A state change worth telling the outside world about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElectionEvent {
    /// The election for a term opened.
    ElectionOpened { term_end: Timestamp },
    /// The election for a term closed with these winners.
    ElectionCompleted {
        term_end: Timestamp,
        winners: Vec<Principal>,
    },
    /// A scheduled term became the current term.
    NewTermStarted { term_end: Timestamp },
    /// Accounts were removed from a term's results.
    Recalled {
        term_end: Timestamp,
        accounts: Vec<Principal>,
    },
}

/// Receives [`ElectionEvent`]s.
///
/// Delivery is fire-and-forget: the core does not wait for acknowledgement and
/// cannot observe failures. Events are emitted only after the state change they
/// describe has been applied, in the order the changes happened.
///
/// Example Backends: an indexer queue, a log, an in-memory buffer.
pub trait EventSink {
    /// Delivers one event.
    fn emit(&self, event: &ElectionEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ElectionEvent) {}
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &ElectionEvent) {
        tracing::info!(?event, "election event");
    }
}

/// Buffers events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ElectionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every buffered event.
    pub fn events(&self) -> Vec<ElectionEvent> {
        self.events.lock().clone()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<ElectionEvent> {
        mem::take(&mut *self.events.lock())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &ElectionEvent) {
        self.events.lock().push(event.clone());
    }
}
