//! Capability checks against the external role authority.

use crate::config::ModuleConfig;
use crate::types::{HatId, Principal};

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// The external system that stores hats and their wearers.
///
/// The election core never mutates the authority; it only asks who wears or
/// administers a hat and how many wearers a hat may have. Answers are expected
/// to reflect the authority's state at the time of the call.
///
/// Example Backends: an on-chain hats registry, a directory service.
pub trait Authority {
    /// Returns the maximum number of concurrent wearers of `hat`.
    fn max_supply(&self, hat: HatId) -> u32;

    /// Returns `true` if `principal` currently wears `hat`.
    fn is_wearer_of_hat(&self, principal: &Principal, hat: HatId) -> bool;

    /// Returns `true` if `principal` is an admin of `hat`.
    fn is_admin_of_hat(&self, principal: &Principal, hat: HatId) -> bool;
}

/// Answers the two capability questions the election core asks.
pub struct CapabilityChecker<'a, A> {
    authority: &'a A,
    config: &'a ModuleConfig,
}

impl<'a, A: Authority> CapabilityChecker<'a, A> {
    pub fn new(authority: &'a A, config: &'a ModuleConfig) -> Self {
        Self { authority, config }
    }

    /// Returns `true` if `principal` wears the ballot box hat.
    pub fn is_ballot_submitter(&self, principal: &Principal) -> bool {
        self.authority
            .is_wearer_of_hat(principal, self.config.ballot_box_hat)
    }

    /// Returns `true` if `principal` may schedule terms.
    ///
    /// With no admin hat configured, any admin of the governed hat qualifies.
    pub fn is_term_scheduler(&self, principal: &Principal) -> bool {
        match self.config.admin_hat {
            Some(admin_hat) => self.authority.is_wearer_of_hat(principal, admin_hat),
            None => self.authority.is_admin_of_hat(principal, self.config.hat_id),
        }
    }

    /// Returns the max supply of the governed hat.
    pub fn max_winners(&self) -> u32 {
        self.authority.max_supply(self.config.hat_id)
    }
}

#[derive(Default)]
struct Registry {
    supply: HashMap<HatId, u32>,
    wearers: HashSet<(HatId, Principal)>,
    admins: HashSet<(HatId, Principal)>,
}

/// In-memory [`Authority`] for tests and simulations.
///
/// Hats without a configured supply report a max supply of zero.
#[derive(Default)]
pub struct MemoryAuthority {
    registry: RwLock<Registry>,
}

impl MemoryAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the max supply of `hat`.
    pub fn set_max_supply(&self, hat: HatId, max: u32) {
        self.registry.write().supply.insert(hat, max);
    }

    /// Makes `principal` a wearer of `hat`.
    pub fn mint(&self, hat: HatId, principal: Principal) {
        self.registry.write().wearers.insert((hat, principal));
    }

    /// Removes `principal` from the wearers of `hat`.
    pub fn burn(&self, hat: HatId, principal: Principal) {
        self.registry.write().wearers.remove(&(hat, principal));
    }

    /// Makes `principal` an admin of `hat`.
    pub fn grant_admin(&self, hat: HatId, principal: Principal) {
        self.registry.write().admins.insert((hat, principal));
    }
}

impl Authority for MemoryAuthority {
    fn max_supply(&self, hat: HatId) -> u32 {
        self.registry.read().supply.get(&hat).copied().unwrap_or(0)
    }

    fn is_wearer_of_hat(&self, principal: &Principal, hat: HatId) -> bool {
        self.registry.read().wearers.contains(&(hat, *principal))
    }

    fn is_admin_of_hat(&self, principal: &Principal, hat: HatId) -> bool {
        self.registry.read().admins.contains(&(hat, *principal))
    }
}
