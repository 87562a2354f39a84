//! Immutable configuration fixed when a module is created.

use crate::error::ConfigError;
use crate::types::HatId;
use serde::{Deserialize, Serialize};

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Deployment-time constants for one election module.
///
/// A module governs exactly one hat. The ballot box hat may submit results
/// and recalls; the admin hat, when set, may schedule terms. When `admin_hat`
/// is `None` the admins of the governed hat schedule terms instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// The hat whose wearers are elected.
    pub hat_id: HatId,
    /// Hat allowed to call `elect` and `recall`.
    pub ballot_box_hat: HatId,
    /// Hat allowed to call `set_next_term`.
    #[serde(default)]
    pub admin_hat: Option<HatId>,
    /// Module version string reported to the surrounding system.
    #[serde(default = "default_version")]
    pub version: String,
}

impl ModuleConfig {
    /// Creates a configuration with no dedicated admin hat.
    pub fn new(hat_id: HatId, ballot_box_hat: HatId) -> Self {
        Self {
            hat_id,
            ballot_box_hat,
            admin_hat: None,
            version: default_version(),
        }
    }

    /// Sets a dedicated term scheduler hat.
    pub fn with_admin_hat(mut self, admin_hat: HatId) -> Self {
        self.admin_hat = Some(admin_hat);
        self
    }

    /// Overrides the reported version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Checks the configuration for combinations that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Wearers of the hat would otherwise elect themselves.
        if self.ballot_box_hat == self.hat_id {
            return Err(ConfigError::BallotBoxIsGovernedHat(self.ballot_box_hat));
        }
        Ok(())
    }
}
