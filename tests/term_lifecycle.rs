use hats_election::{
    ElectionError, ElectionEvent, ElectionModule, ElectionState, ElectionStatus, Eligibility,
    ErrorKind, HatId, ManualClock, MemoryAuthority, MemorySink, ModuleConfig, Principal,
    StateError,
};

const HAT: HatId = HatId(0x0100);
const BALLOT_BOX: HatId = HatId(0x0101);

const BALLOT: Principal = Principal([0xbb; 20]);
const ADMIN: Principal = Principal([0xaa; 20]);
const A: Principal = Principal([0x0a; 20]);
const B: Principal = Principal([0x0b; 20]);

type Module = ElectionModule<MemoryAuthority, ManualClock, MemorySink>;

fn setup(first_term_end: u64, max_supply: u32) -> Module {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let authority = MemoryAuthority::new();
    authority.set_max_supply(HAT, max_supply);
    authority.mint(BALLOT_BOX, BALLOT);
    authority.grant_admin(HAT, ADMIN);

    ElectionModule::initialize(
        ModuleConfig::new(HAT, BALLOT_BOX),
        first_term_end,
        authority,
        ManualClock::new(0),
        MemorySink::new(),
    )
    .unwrap()
}

fn eligibility(module: &Module, principal: Principal) -> Eligibility {
    module.get_eligibility(&principal, HAT)
}

const INELIGIBLE: Eligibility = Eligibility {
    eligible: false,
    standing: true,
};
const ELIGIBLE: Eligibility = Eligibility {
    eligible: true,
    standing: true,
};

#[test]
fn two_term_cycle() {
    let mut module = setup(1000, 1);

    module.clock().set(500);
    assert_eq!(eligibility(&module, A), INELIGIBLE);

    module.elect(&BALLOT, 1000, &[A]).unwrap();
    assert_eq!(eligibility(&module, A), ELIGIBLE);

    module.clock().set(1000);
    assert_eq!(eligibility(&module, A), INELIGIBLE);

    module.set_next_term(&ADMIN, 2000).unwrap();
    module.elect(&BALLOT, 2000, &[B]).unwrap();
    module.start_next_term(&B).unwrap();
    assert_eq!(module.current_term_end(), 2000);
    assert_eq!(module.next_term_end(), None);

    module.clock().set(1500);
    assert_eq!(eligibility(&module, B), ELIGIBLE);
    assert_eq!(eligibility(&module, A), INELIGIBLE);

    assert_eq!(
        module.sink().take(),
        vec![
            ElectionEvent::ElectionOpened { term_end: 1000 },
            ElectionEvent::ElectionCompleted {
                term_end: 1000,
                winners: vec![A],
            },
            ElectionEvent::ElectionOpened { term_end: 2000 },
            ElectionEvent::ElectionCompleted {
                term_end: 2000,
                winners: vec![B],
            },
            ElectionEvent::NewTermStarted { term_end: 2000 },
        ]
    );
}

#[test]
fn next_election_can_close_while_current_term_runs() {
    let mut module = setup(1000, 1);
    module.clock().set(100);
    module.elect(&BALLOT, 1000, &[A]).unwrap();
    module.set_next_term(&ADMIN, 2000).unwrap();
    module.elect(&BALLOT, 2000, &[B]).unwrap();

    // B is elected for the next term but the current term still governs.
    assert_eq!(eligibility(&module, A), ELIGIBLE);
    assert_eq!(eligibility(&module, B), INELIGIBLE);

    let err = module.start_next_term(&A).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimingViolation);
}

#[test]
fn over_capacity_result_is_rejected_without_effect() {
    let mut module = setup(1000, 1);
    module.sink().take();

    let err = module.elect(&BALLOT, 1000, &[A, B]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert!(module.is_open(1000));
    assert!(!module.is_elected(1000, &A));
    assert!(module.sink().events().is_empty());

    module.elect(&BALLOT, 1000, &[B]).unwrap();
    assert!(module.is_elected(1000, &B));
}

#[test]
fn rescheduling_open_term_leaves_its_election_open() {
    let mut module = setup(1000, 1);
    module.set_next_term(&ADMIN, 1500).unwrap();
    module.set_next_term(&ADMIN, 1600).unwrap();

    assert_eq!(module.next_term_end(), Some(1600));
    assert!(module.is_open(1600));
    assert_eq!(module.election_status(1500), Some(ElectionStatus::Open));
}

#[test]
fn scheduling_same_open_term_twice_is_harmless() {
    let mut module = setup(1000, 1);
    module.sink().take();

    module.set_next_term(&ADMIN, 1500).unwrap();
    module.set_next_term(&ADMIN, 1500).unwrap();

    assert_eq!(module.next_term_end(), Some(1500));
    assert!(module.is_open(1500));
    assert_eq!(
        module.sink().take(),
        vec![
            ElectionEvent::ElectionOpened { term_end: 1500 },
            ElectionEvent::ElectionOpened { term_end: 1500 },
        ]
    );
}

#[test]
fn switching_back_to_open_term_is_allowed() {
    let mut module = setup(1000, 1);
    module.set_next_term(&ADMIN, 1500).unwrap();
    module.set_next_term(&ADMIN, 1600).unwrap();
    module.set_next_term(&ADMIN, 1500).unwrap();

    assert_eq!(module.next_term_end(), Some(1500));
    assert!(module.is_open(1500));
    assert!(module.is_open(1600));

    module.elect(&BALLOT, 1500, &[A]).unwrap();
    module.clock().set(1000);
    module.start_next_term(&A).unwrap();
    assert_eq!(module.current_term_end(), 1500);
}

#[test]
fn concluded_next_term_cannot_be_discarded() {
    let mut module = setup(1000, 1);
    module.set_next_term(&ADMIN, 1500).unwrap();
    module.elect(&BALLOT, 1500, &[A]).unwrap();

    assert_eq!(
        module.set_next_term(&ADMIN, 1600),
        Err(ElectionError::ElectionClosed { term_end: 1500 })
    );
    assert_eq!(module.next_term_end(), Some(1500));
    assert_eq!(module.election_status(1600), None);
}

#[test]
fn recall_during_term_removes_holder() {
    let mut module = setup(1000, 2);
    module.clock().set(10);
    module.elect(&BALLOT, 1000, &[A, B]).unwrap();

    module.recall(&BALLOT, 1000, &[A]).unwrap();
    assert_eq!(eligibility(&module, A), INELIGIBLE);
    assert_eq!(eligibility(&module, B), ELIGIBLE);

    // A recalled account stays out even if recalled again.
    module.recall(&BALLOT, 1000, &[A]).unwrap();
    assert!(!module.is_elected(1000, &A));
}

#[test]
fn unauthorized_callers_are_distinguishable() {
    let mut module = setup(1000, 1);

    let err = module.elect(&A, 1000, &[A]).unwrap_err();
    assert_eq!(err, ElectionError::NotBallotBox);
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = module.set_next_term(&BALLOT, 2000).unwrap_err();
    assert_eq!(err, ElectionError::NotAdmin);
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = module.set_next_term(&ADMIN, 900).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTermOrdering);
}

#[test]
fn gap_between_terms_has_no_eligible_holder() {
    let mut module = setup(1000, 1);
    module.elect(&BALLOT, 1000, &[A]).unwrap();
    module.set_next_term(&ADMIN, 2000).unwrap();
    module.elect(&BALLOT, 2000, &[A]).unwrap();

    module.clock().set(1200);
    assert_eq!(eligibility(&module, A), INELIGIBLE);

    module.start_next_term(&B).unwrap();
    assert_eq!(eligibility(&module, A), ELIGIBLE);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut module = setup(1000, 1);
    module.elect(&BALLOT, 1000, &[A]).unwrap();
    module.set_next_term(&ADMIN, 2000).unwrap();

    let json = serde_json::to_string(module.state()).unwrap();
    let state = serde_json::from_str(&json).unwrap();

    let authority = MemoryAuthority::new();
    authority.mint(BALLOT_BOX, BALLOT);
    authority.set_max_supply(HAT, 1);
    let restored = ElectionModule::from_state(
        module.config().clone(),
        state,
        authority,
        ManualClock::new(500),
        MemorySink::new(),
    )
    .unwrap();

    assert_eq!(restored.current_term_end(), 1000);
    assert_eq!(restored.next_term_end(), Some(2000));
    assert!(restored.is_open(2000));
    assert_eq!(eligibility(&restored, A), ELIGIBLE);
}

#[test]
fn snapshot_without_scheduled_elections_is_rejected() {
    let json = r#"{
        "ledger": {"status": {}, "elected": {}},
        "terms": {"current": 1000, "next": 2000}
    }"#;
    let state: ElectionState = serde_json::from_str(json).unwrap();

    let result = ElectionModule::from_state(
        ModuleConfig::new(HAT, BALLOT_BOX),
        state,
        MemoryAuthority::new(),
        ManualClock::new(0),
        MemorySink::new(),
    );
    assert!(matches!(
        result,
        Err(StateError::UnknownTerm { term_end: 1000 })
    ));
}
