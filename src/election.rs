//! Per-term election status and results.
//!
//! The ledger only grows: terms are added when their election opens and are
//! never removed. A term's election opens once and closes once, when its
//! winners are recorded. Results can be recalled at any time.

use crate::error::ElectionError;
use crate::events::ElectionEvent;
use crate::types::{Principal, Timestamp};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Whether a term's election still accepts results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectionStatus {
    Open,
    Closed,
}

/// Election status and winners, keyed by term end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionLedger {
    status: BTreeMap<Timestamp, ElectionStatus>,
    elected: BTreeMap<Timestamp, BTreeSet<Principal>>,
}

impl ElectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the election for `term_end`.
    ///
    /// Reopening an already open election is a no-op apart from the event.
    /// Callers must not reopen a closed election.
    pub fn open(&mut self, term_end: Timestamp) -> ElectionEvent {
        debug_assert_ne!(self.status(term_end), Some(ElectionStatus::Closed));
        self.status.insert(term_end, ElectionStatus::Open);
        ElectionEvent::ElectionOpened { term_end }
    }

    /// Closes the election for `term_end` and marks every winner as elected.
    ///
    /// Fails without touching the ledger if there are more winners than
    /// `max_winners` or the election is not open. Duplicate winners are
    /// recorded once.
    pub fn close(
        &mut self,
        term_end: Timestamp,
        winners: &[Principal],
        max_winners: u32,
    ) -> Result<ElectionEvent, ElectionError> {
        if winners.len() > max_winners as usize {
            return Err(ElectionError::TooManyWinners {
                winners: winners.len(),
                max: max_winners,
            });
        }
        if !self.is_open(term_end) {
            return Err(ElectionError::ElectionClosed { term_end });
        }

        self.status.insert(term_end, ElectionStatus::Closed);
        if !winners.is_empty() {
            self.elected
                .entry(term_end)
                .or_default()
                .extend(winners.iter().copied());
        }

        Ok(ElectionEvent::ElectionCompleted {
            term_end,
            winners: winners.to_vec(),
        })
    }

    /// Clears the elected flag of every account for `term_end`.
    ///
    /// Applies regardless of the election's status, including terms that were
    /// never opened.
    pub fn recall(&mut self, term_end: Timestamp, accounts: &[Principal]) -> ElectionEvent {
        if let Some(elected) = self.elected.get_mut(&term_end) {
            for account in accounts {
                elected.remove(account);
            }
            if elected.is_empty() {
                self.elected.remove(&term_end);
            }
        }

        ElectionEvent::Recalled {
            term_end,
            accounts: accounts.to_vec(),
        }
    }

    /// Returns `true` if `account` is elected for `term_end`.
    pub fn is_elected(&self, term_end: Timestamp, account: &Principal) -> bool {
        self.elected
            .get(&term_end)
            .is_some_and(|elected| elected.contains(account))
    }

    /// Returns `true` if the election for `term_end` accepts results.
    pub fn is_open(&self, term_end: Timestamp) -> bool {
        self.status(term_end) == Some(ElectionStatus::Open)
    }

    /// Returns the status of the election for `term_end`, or `None` if it was
    /// never opened.
    pub fn status(&self, term_end: Timestamp) -> Option<ElectionStatus> {
        self.status.get(&term_end).copied()
    }

    /// Returns the accounts currently elected for `term_end`.
    pub fn winners(&self, term_end: Timestamp) -> impl Iterator<Item = &Principal> {
        self.elected.get(&term_end).into_iter().flatten()
    }
}
