//! Failure conditions for election operations.
//!
//! Every rejected operation maps to exactly one [`ElectionError`] variant and
//! leaves state untouched. [`ErrorKind`] groups the variants into the coarse
//! categories callers usually branch on.

use crate::types::{HatId, Timestamp};
use thiserror::Error;

/// Coarse classification of an [`ElectionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller lacks the capability the operation requires.
    Unauthorized,
    /// More winners were submitted than the hat can hold.
    CapacityExceeded,
    /// The election is not open for the requested change.
    InvalidState,
    /// A scheduled term does not come after the current one.
    InvalidTermOrdering,
    /// The current term has not ended, or the next one cannot start yet.
    TimingViolation,
}

/// Error returned by the mutating entry points of an
/// [`ElectionModule`](crate::ElectionModule).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ElectionError {
    /// Caller does not wear the ballot box hat.
    #[error("caller is not the ballot box")]
    NotBallotBox,

    /// Caller is neither the term scheduler nor an admin of the hat.
    #[error("caller is not authorized to schedule terms")]
    NotAdmin,

    /// Submitted winners exceed the hat's max supply.
    #[error("too many winners: {winners} exceeds max supply {max}")]
    TooManyWinners {
        /// Number of winners submitted.
        winners: usize,
        /// Max supply reported by the authority.
        max: u32,
    },

    /// The election for `term_end` is not open.
    #[error("election for term ending at {term_end} is closed")]
    ElectionClosed {
        /// Term whose election is closed or was never opened.
        term_end: Timestamp,
    },

    /// A new term must end strictly after the current one.
    #[error("invalid term end {new_term_end}: must be after current term end {current_term_end}")]
    InvalidTermEnd {
        /// Requested term end.
        new_term_end: Timestamp,
        /// Current term end.
        current_term_end: Timestamp,
    },

    /// The current term is still running.
    #[error("current term ends at {current_term_end}, now is {now}")]
    TermNotEnded {
        /// Current term end.
        current_term_end: Timestamp,
        /// Time the operation observed.
        now: Timestamp,
    },

    /// No next term is scheduled, or its election is still open.
    #[error("next term is not ready")]
    NextTermNotReady {
        /// The scheduled next term, if any.
        next_term_end: Option<Timestamp>,
    },
}

impl ElectionError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElectionError::NotBallotBox | ElectionError::NotAdmin => ErrorKind::Unauthorized,
            ElectionError::TooManyWinners { .. } => ErrorKind::CapacityExceeded,
            ElectionError::ElectionClosed { .. } => ErrorKind::InvalidState,
            ElectionError::InvalidTermEnd { .. } => ErrorKind::InvalidTermOrdering,
            ElectionError::TermNotEnded { .. } | ElectionError::NextTermNotReady { .. } => {
                ErrorKind::TimingViolation
            }
        }
    }
}

/// Error returned when a module configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The ballot box hat is the governed hat itself.
    #[error("ballot box hat {0} must differ from the governed hat")]
    BallotBoxIsGovernedHat(HatId),
}

/// Error returned when restoring a state snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The next term slot does not come after the current term.
    #[error("next term end {next_term_end} must be after current term end {current_term_end}")]
    InvalidNextTerm {
        /// Current term end in the snapshot.
        current_term_end: Timestamp,
        /// Next term end in the snapshot.
        next_term_end: Timestamp,
    },

    /// A scheduled term has no election in the ledger.
    #[error("term ending at {term_end} has no election in the ledger")]
    UnknownTerm {
        /// The current or next term missing from the ledger.
        term_end: Timestamp,
    },

    /// The configuration paired with the snapshot is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
