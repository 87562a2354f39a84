use crate::election::ElectionLedger;
use crate::term::TermClock;
use crate::types::{Principal, Timestamp};

use serde::{Deserialize, Serialize};

/// Answer to "may this principal wear the hat right now".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Elected for the current term, and the term has not ended.
    pub eligible: bool,
    /// Always `true`; standing is judged elsewhere.
    pub standing: bool,
}

/// Evaluates eligibility of `principal` at `now`.
///
/// Once the current term has ended nobody is eligible until the next term is
/// started, whatever the ledger says.
pub fn evaluate(
    terms: &TermClock,
    ledger: &ElectionLedger,
    principal: &Principal,
    now: Timestamp,
) -> Eligibility {
    let eligible = terms.is_running(now) && ledger.is_elected(terms.current(), principal);
    Eligibility {
        eligible,
        standing: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_only_while_term_runs() {
        let winner = Principal([1; 20]);
        let terms = TermClock::new(1000);
        let mut ledger = ElectionLedger::new();
        ledger.open(1000);

        let before = evaluate(&terms, &ledger, &winner, 500);
        assert!(!before.eligible);
        assert!(before.standing);

        ledger.close(1000, &[winner], 1).unwrap();
        assert!(evaluate(&terms, &ledger, &winner, 0).eligible);
        assert!(evaluate(&terms, &ledger, &winner, 999).eligible);
        assert!(!evaluate(&terms, &ledger, &winner, 1000).eligible);
        assert!(evaluate(&terms, &ledger, &winner, 1000).standing);
    }

    #[test]
    fn results_for_other_terms_do_not_count() {
        let winner = Principal([1; 20]);
        let terms = TermClock::new(1000);
        let mut ledger = ElectionLedger::new();
        ledger.open(2000);
        ledger.close(2000, &[winner], 1).unwrap();

        assert!(!evaluate(&terms, &ledger, &winner, 500).eligible);
    }
}
