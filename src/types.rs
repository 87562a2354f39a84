//! Identifiers shared across the election core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch.
///
/// A term is identified by the timestamp of the first instant after it ends,
/// so a `Timestamp` doubles as a term id wherever the API asks for a `term_end`.
pub type Timestamp = u64;

/// An account that may wear, schedule, or elect for a hat.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Principal(pub [u8; 20]);

impl Principal {
    /// The null address.
    pub const ZERO: Principal = Principal([0; 20]);

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<[u8; 20]> for Principal {
    fn from(bytes: [u8; 20]) -> Self {
        Principal(bytes)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Identifier of a hat (a role) in the external role authority.
///
/// Capabilities such as the ballot box and the term scheduler are themselves
/// hats, so this type names both the governed role and the roles that gate it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HatId(pub u128);

impl From<u128> for HatId {
    fn from(id: u128) -> Self {
        HatId(id)
    }
}

impl fmt::Display for HatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_displays_as_hex_address() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xab;
        bytes[19] = 0x01;
        let shown = Principal::from(bytes).to_string();
        assert_eq!(shown.len(), 42);
        assert!(shown.starts_with("0xab00"));
        assert!(shown.ends_with("01"));
    }

    #[test]
    fn principal_exposes_raw_bytes() {
        let bytes = [7u8; 20];
        assert_eq!(Principal::from(bytes).as_bytes(), &bytes);
        assert_eq!(Principal::ZERO.as_bytes(), &[0u8; 20]);
    }

    #[test]
    fn hat_id_displays_as_hex() {
        assert_eq!(HatId(255).to_string(), "0xff");
    }
}
