//! The election module: entry points over the ledger and term schedule.
//!
//! Every mutating entry point takes `&mut self`, so operations on one module
//! are serialized by construction. Each operation reads the clock at most
//! once, checks all of its preconditions, and only then writes. A rejected
//! operation leaves state unchanged and emits nothing.

use crate::{
    authority::{Authority, CapabilityChecker},
    clock::Clock,
    config::ModuleConfig,
    election::ElectionStatus,
    eligibility::{self, Eligibility},
    error::{ConfigError, ElectionError, StateError},
    events::{ElectionEvent, EventSink},
    state::ElectionState,
    types::{HatId, Principal, Timestamp},
};

fn rejected(op: &'static str, err: ElectionError) -> ElectionError {
    tracing::debug!(op, %err, kind = ?err.kind(), "operation rejected");
    err
}

/// Eligibility module for a hat whose wearers are chosen by term elections.
pub struct ElectionModule<A, C, S> {
    config: ModuleConfig,
    state: ElectionState,
    authority: A,
    clock: C,
    sink: S,
}

impl<A, C, S> ElectionModule<A, C, S>
where
    A: Authority,
    C: Clock,
    S: EventSink,
{
    /// Creates a module whose first term ends at `first_term_end` and opens
    /// that term's election.
    pub fn initialize(
        config: ModuleConfig,
        first_term_end: Timestamp,
        authority: A,
        clock: C,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = ElectionState::new(first_term_end);
        tracing::info!(
            hat = %config.hat_id,
            ballot_box = %config.ballot_box_hat,
            first_term_end,
            "election module initialized"
        );
        sink.emit(&ElectionEvent::ElectionOpened {
            term_end: first_term_end,
        });

        Ok(Self {
            config,
            state,
            authority,
            clock,
            sink,
        })
    }

    /// Rebuilds a module from a previously taken state snapshot.
    ///
    /// No events are emitted; they were emitted when the state was built.
    pub fn from_state(
        config: ModuleConfig,
        state: ElectionState,
        authority: A,
        clock: C,
        sink: S,
    ) -> Result<Self, StateError> {
        config.validate()?;
        state.validate()?;

        tracing::info!(
            hat = %config.hat_id,
            current_term_end = state.terms.current(),
            next_term_end = ?state.terms.next(),
            "election module restored"
        );

        Ok(Self {
            config,
            state,
            authority,
            clock,
            sink,
        })
    }

    fn capabilities(&self) -> CapabilityChecker<'_, A> {
        CapabilityChecker::new(&self.authority, &self.config)
    }

    /// Closes the election for `term_end` and records `winners` as elected.
    ///
    /// Only the ballot box may submit results, at most the hat's max supply of
    /// winners may be submitted, and each election accepts results once.
    pub fn elect(
        &mut self,
        caller: &Principal,
        term_end: Timestamp,
        winners: &[Principal],
    ) -> Result<(), ElectionError> {
        let checker = self.capabilities();
        if !checker.is_ballot_submitter(caller) {
            return Err(rejected("elect", ElectionError::NotBallotBox));
        }
        let max_winners = checker.max_winners();

        let event = self
            .state
            .ledger
            .close(term_end, winners, max_winners)
            .map_err(|err| rejected("elect", err))?;

        tracing::info!(term_end, winners = winners.len(), "election completed");
        self.sink.emit(&event);
        Ok(())
    }

    /// Removes `accounts` from the results of `term_end`.
    ///
    /// Works for any term, open or closed, current or not.
    pub fn recall(
        &mut self,
        caller: &Principal,
        term_end: Timestamp,
        accounts: &[Principal],
    ) -> Result<(), ElectionError> {
        if !self.capabilities().is_ballot_submitter(caller) {
            return Err(rejected("recall", ElectionError::NotBallotBox));
        }

        let event = self.state.ledger.recall(term_end, accounts);

        tracing::info!(term_end, accounts = accounts.len(), "accounts recalled");
        self.sink.emit(&event);
        Ok(())
    }

    /// Schedules `new_term_end` as the next term and opens its election.
    ///
    /// A scheduled next term can be replaced until its election closes.
    /// Replacing it does not close its election.
    pub fn set_next_term(
        &mut self,
        caller: &Principal,
        new_term_end: Timestamp,
    ) -> Result<(), ElectionError> {
        if !self.capabilities().is_term_scheduler(caller) {
            return Err(rejected("set_next_term", ElectionError::NotAdmin));
        }
        self.state
            .terms
            .check_schedule(new_term_end, &self.state.ledger)
            .map_err(|err| rejected("set_next_term", err))?;

        let replaced = self.state.terms.next();
        self.state.terms.schedule(new_term_end);
        let event = self.state.ledger.open(new_term_end);

        tracing::info!(new_term_end, ?replaced, "next term scheduled");
        self.sink.emit(&event);
        Ok(())
    }

    /// Makes the scheduled next term current.
    ///
    /// Anyone may call this. It succeeds once the current term has ended and
    /// the next term's election has closed.
    pub fn start_next_term(&mut self, caller: &Principal) -> Result<(), ElectionError> {
        let now = self.clock.now();
        let next = self
            .state
            .terms
            .check_advance(now, &self.state.ledger)
            .map_err(|err| rejected("start_next_term", err))?;

        let previous = self.state.terms.current();
        self.state.terms.advance(next);

        tracing::info!(%caller, previous, term_end = next, "new term started");
        self.sink.emit(&ElectionEvent::NewTermStarted { term_end: next });
        Ok(())
    }

    /// Returns whether `principal` may wear `hat` right now.
    ///
    /// `hat` identifies the caller's query only; this module governs the one
    /// hat in its configuration.
    pub fn get_eligibility(&self, principal: &Principal, hat: HatId) -> Eligibility {
        let now = self.clock.now();
        let result = eligibility::evaluate(&self.state.terms, &self.state.ledger, principal, now);
        tracing::trace!(
            %principal,
            %hat,
            now,
            eligible = result.eligible,
            "eligibility evaluated"
        );
        result
    }

    /// Returns `true` if `account` is elected for `term_end`.
    pub fn is_elected(&self, term_end: Timestamp, account: &Principal) -> bool {
        self.state.ledger.is_elected(term_end, account)
    }

    /// Returns `true` if the election for `term_end` accepts results.
    pub fn is_open(&self, term_end: Timestamp) -> bool {
        self.state.ledger.is_open(term_end)
    }

    /// Returns the status of the election for `term_end`.
    pub fn election_status(&self, term_end: Timestamp) -> Option<ElectionStatus> {
        self.state.ledger.status(term_end)
    }

    pub fn current_term_end(&self) -> Timestamp {
        self.state.terms.current()
    }

    /// `None` when no next term is scheduled.
    pub fn next_term_end(&self) -> Option<Timestamp> {
        self.state.terms.next()
    }

    pub fn hat_id(&self) -> HatId {
        self.config.hat_id
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn state(&self) -> &ElectionState {
        &self.state
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
