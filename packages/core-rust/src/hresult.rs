//! COM status codes carried in the `return` field of every response.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 32-bit COM `HRESULT`.
///
/// Negative values are failures. The raw value is preserved verbatim so that
/// vendor-specific codes survive a round trip through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HResult(pub i32);

impl HResult {
    pub const S_OK: Self = Self(0);
    pub const S_FALSE: Self = Self(1);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_NOTIMPL: Self = Self(0x8000_4001_u32 as i32);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_NOINTERFACE: Self = Self(0x8000_4002_u32 as i32);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_ABORT: Self = Self(0x8000_4004_u32 as i32);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_FAIL: Self = Self(0x8000_4005_u32 as i32);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_UNEXPECTED: Self = Self(0x8000_FFFF_u32 as i32);
    #[allow(clippy::cast_possible_wrap)]
    pub const E_INVALIDARG: Self = Self(0x8007_0057_u32 as i32);

    /// The object's last known state no longer matches the server's view.
    #[allow(clippy::cast_possible_wrap)]
    pub const LDM_E_OBJECT_MODIFIED: Self = Self(0x8004_2701_u32 as i32);
    /// The referenced disk, region, volume or task id does not exist.
    #[allow(clippy::cast_possible_wrap)]
    pub const LDM_E_OBJECT_NOT_FOUND: Self = Self(0x8004_2706_u32 as i32);

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    #[must_use]
    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }

    /// The raw code as the unsigned value COM tooling prints.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn code(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_codes_are_negative() {
        for code in [
            HResult::E_NOTIMPL,
            HResult::E_NOINTERFACE,
            HResult::E_FAIL,
            HResult::E_INVALIDARG,
            HResult::LDM_E_OBJECT_NOT_FOUND,
        ] {
            assert!(code.is_failure(), "{code} should be a failure");
        }
        assert!(HResult::S_OK.is_success());
        assert!(HResult::S_FALSE.is_success());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(HResult::E_NOTIMPL.to_string(), "0x80004001");
        assert_eq!(HResult::S_OK.to_string(), "0x00000000");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let bytes = rmp_serde::to_vec_named(&HResult::E_FAIL).expect("serialize");
        let plain = rmp_serde::to_vec_named(&HResult::E_FAIL.0).expect("serialize");
        assert_eq!(bytes, plain);
    }
}
