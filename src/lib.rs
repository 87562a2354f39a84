//! Term-based election eligibility for a single hat.
//!
//! Wearers of the hat are chosen by elections over consecutive, non-overlapping
//! terms. A term is identified by the timestamp at which it ends. The module
//! keeps the current term and at most one scheduled next term, records each
//! term's election status and winners, and answers whether a principal is
//! eligible to wear the hat right now.
//!
//! Everything outside that core is injected:
//! - [`Authority`] answers who wears or administers which hat.
//! - [`Clock`] supplies the current time.
//! - [`EventSink`] receives notifications for external observers.

pub mod authority;
pub mod clock;
pub mod config;
pub mod election;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod module;
pub mod state;
pub mod term;
pub mod types;

pub use authority::{Authority, CapabilityChecker, MemoryAuthority};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ModuleConfig;
pub use election::{ElectionLedger, ElectionStatus};
pub use eligibility::Eligibility;
pub use error::{ConfigError, ElectionError, ErrorKind, StateError};
pub use events::{ElectionEvent, EventSink, MemorySink, NullSink, TracingSink};
pub use module::ElectionModule;
pub use state::ElectionState;
pub use term::TermClock;
pub use types::{HatId, Principal, Timestamp};
