//! Walks an elected hat through two full terms.
//!
//! The ballot box elects a holder for the first term, the hat admin schedules
//! a second term, its election closes while the first term still runs, and the
//! second term starts once the first has ended. All backends are in memory.
//!
//! Run with: `RUST_LOG=info cargo run --example term_cycle`

use hats_election::{
    ElectionModule, HatId, ManualClock, MemoryAuthority, ModuleConfig, Principal, TracingSink,
};

const HAT: HatId = HatId(0x0001_0001);
const BALLOT_BOX: HatId = HatId(0x0001_0002);

const DAY: u64 = 86_400;

fn account(tag: u8) -> Principal {
    let mut bytes = [0u8; 20];
    bytes[19] = tag;
    Principal(bytes)
}

fn report<A, S>(module: &ElectionModule<A, ManualClock, S>, who: &[(&str, Principal)])
where
    A: hats_election::Authority,
    S: hats_election::EventSink,
{
    use hats_election::Clock;

    let now = module.clock().now();
    println!(
        "[day {:>3}] current term ends day {}, next term: {:?}",
        now / DAY,
        module.current_term_end() / DAY,
        module.next_term_end().map(|end| end / DAY)
    );
    for (name, principal) in who {
        let status = module.get_eligibility(principal, HAT);
        println!("           {name}: eligible = {}", status.eligible);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("hats-election term cycle example");
    println!("================================");

    let ballot_box = account(0xb0);
    let admin = account(0xad);
    let alice = account(0x01);
    let bob = account(0x02);
    let people = [("alice", alice), ("bob", bob)];

    let authority = MemoryAuthority::new();
    authority.set_max_supply(HAT, 1);
    authority.mint(BALLOT_BOX, ballot_box);
    authority.grant_admin(HAT, admin);

    let mut module = ElectionModule::initialize(
        ModuleConfig::new(HAT, BALLOT_BOX),
        30 * DAY,
        authority,
        ManualClock::new(0),
        TracingSink,
    )?;
    report(&module, &people);

    module.elect(&ballot_box, 30 * DAY, &[alice])?;
    module.clock().set(DAY);
    report(&module, &people);

    // Prepare the second term while the first is running.
    module.set_next_term(&admin, 60 * DAY)?;
    module.clock().set(20 * DAY);
    module.elect(&ballot_box, 60 * DAY, &[bob])?;
    report(&module, &people);

    if let Err(err) = module.start_next_term(&bob) {
        println!("[client] start_next_term rejected: {err}");
    }

    module.clock().set(31 * DAY);
    report(&module, &people);

    module.start_next_term(&bob)?;
    report(&module, &people);

    Ok(())
}
