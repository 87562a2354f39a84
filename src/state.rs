use crate::election::ElectionLedger;
use crate::error::StateError;
use crate::term::TermClock;
use crate::types::Timestamp;

use serde::{Deserialize, Serialize};

/// Everything an election module persists between operations.
///
/// Snapshots serialize with serde. A deserialized snapshot is unchecked until
/// passed through [`validate`](Self::validate), which
/// [`ElectionModule::from_state`](crate::ElectionModule::from_state) does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionState {
    pub(crate) ledger: ElectionLedger,
    pub(crate) terms: TermClock,
}

impl ElectionState {
    /// Creates state for a module whose first term ends at `first_term_end`,
    /// with that term's election open.
    pub(crate) fn new(first_term_end: Timestamp) -> Self {
        let mut ledger = ElectionLedger::new();
        ledger.open(first_term_end);
        Self {
            ledger,
            terms: TermClock::new(first_term_end),
        }
    }

    pub fn ledger(&self) -> &ElectionLedger {
        &self.ledger
    }

    pub fn terms(&self) -> &TermClock {
        &self.terms
    }

    /// Checks a restored snapshot: the term slots are ordered and both
    /// scheduled terms have an election in the ledger.
    pub fn validate(&self) -> Result<(), StateError> {
        TermClock::from_parts(self.terms.current(), self.terms.next())?;

        let scheduled = std::iter::once(self.terms.current()).chain(self.terms.next());
        for term_end in scheduled {
            if self.ledger.status(term_end).is_none() {
                return Err(StateError::UnknownTerm { term_end });
            }
        }
        Ok(())
    }
}
