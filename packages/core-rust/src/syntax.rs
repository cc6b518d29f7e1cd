//! Interface identities: the abstract syntax an RPC server binds under.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An abstract syntax identifier: interface UUID plus version pair.
///
/// This is the key a dispatcher is registered under. Two interfaces with the
/// same UUID but different versions are distinct syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxId {
    pub if_uuid: Uuid,
    pub if_version_major: u16,
    pub if_version_minor: u16,
}

impl SyntaxId {
    #[must_use]
    pub const fn new(if_uuid: Uuid, if_version_major: u16, if_version_minor: u16) -> Self {
        Self {
            if_uuid,
            if_version_major,
            if_version_minor,
        }
    }

    /// Builds a syntax id from the UUID's 128-bit big-endian value.
    #[must_use]
    pub const fn from_u128(uuid: u128, if_version_major: u16, if_version_minor: u16) -> Self {
        Self::new(Uuid::from_u128(uuid), if_version_major, if_version_minor)
    }
}

impl fmt::Display for SyntaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{}.{}",
            self.if_uuid, self.if_version_major, self.if_version_minor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_version() {
        let id = SyntaxId::from_u128(0xD2D7_9DF5_3400_11D0_B40B_00AA_005F_F586, 0, 0);
        assert_eq!(id.to_string(), "d2d79df5-3400-11d0-b40b-00aa005ff586 v0.0");
    }

    #[test]
    fn versions_distinguish_syntaxes() {
        let uuid = 0xDEB0_1010_3A37_4D26_99DF_E2BB_6AE3_AC61;
        assert_ne!(SyntaxId::from_u128(uuid, 0, 0), SyntaxId::from_u128(uuid, 1, 0));
    }
}
