//! The current and next term slots and the rules for moving between them.

use crate::election::{ElectionLedger, ElectionStatus};
use crate::error::{ElectionError, StateError};
use crate::types::Timestamp;

use serde::{Deserialize, Serialize};

/// Two-slot term schedule.
///
/// Invariant: `next` is either `None` or strictly after `current`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermClock {
    current: Timestamp,
    next: Option<Timestamp>,
}

impl TermClock {
    /// Starts the schedule with `first_term_end` as the current term.
    pub fn new(first_term_end: Timestamp) -> Self {
        Self {
            current: first_term_end,
            next: None,
        }
    }

    /// Rebuilds a schedule from stored slots.
    pub fn from_parts(current: Timestamp, next: Option<Timestamp>) -> Result<Self, StateError> {
        match next {
            Some(next) if next <= current => Err(StateError::InvalidNextTerm {
                current_term_end: current,
                next_term_end: next,
            }),
            _ => Ok(Self { current, next }),
        }
    }

    /// End of the term currently governing eligibility.
    pub fn current(&self) -> Timestamp {
        self.current
    }

    /// End of the scheduled next term, if one is scheduled.
    pub fn next(&self) -> Option<Timestamp> {
        self.next
    }

    /// Checks that `new_term_end` may replace the next term slot.
    ///
    /// The new term must end after the current one. A scheduled next term may
    /// only be replaced while its election is open, and a term whose election
    /// already closed cannot be scheduled again.
    pub fn check_schedule(
        &self,
        new_term_end: Timestamp,
        ledger: &ElectionLedger,
    ) -> Result<(), ElectionError> {
        if new_term_end <= self.current {
            return Err(ElectionError::InvalidTermEnd {
                new_term_end,
                current_term_end: self.current,
            });
        }
        match self.next {
            Some(next) if !ledger.is_open(next) => {
                return Err(ElectionError::ElectionClosed { term_end: next });
            }
            _ => {}
        }
        if ledger.status(new_term_end) == Some(ElectionStatus::Closed) {
            return Err(ElectionError::ElectionClosed {
                term_end: new_term_end,
            });
        }
        Ok(())
    }

    /// Replaces the next term slot. Call [`check_schedule`](Self::check_schedule) first.
    pub fn schedule(&mut self, new_term_end: Timestamp) {
        debug_assert!(new_term_end > self.current);
        self.next = Some(new_term_end);
    }

    /// Checks that the next term may become current at `now`.
    pub fn check_advance(
        &self,
        now: Timestamp,
        ledger: &ElectionLedger,
    ) -> Result<Timestamp, ElectionError> {
        if now < self.current {
            return Err(ElectionError::TermNotEnded {
                current_term_end: self.current,
                now,
            });
        }
        match self.next {
            Some(next) if ledger.status(next) == Some(ElectionStatus::Closed) => Ok(next),
            next => Err(ElectionError::NextTermNotReady {
                next_term_end: next,
            }),
        }
    }

    /// Makes the next term current and empties the next slot. Call
    /// [`check_advance`](Self::check_advance) first.
    pub fn advance(&mut self, next: Timestamp) {
        debug_assert_eq!(self.next, Some(next));
        self.current = next;
        self.next = None;
    }

    /// Returns `true` if `now` falls before the end of the current term.
    pub fn is_running(&self, now: Timestamp) -> bool {
        now < self.current
    }
}
