//! Visibility scope of a status variable.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Bit set over the `GLOBAL` and `SESSION` visibility scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeFlag(u8);

impl ScopeFlag {
    /// No scope bits. Carried by placeholders reserved for default-sourced names.
    pub const NONE: ScopeFlag = ScopeFlag(0);
    /// Visible process-wide.
    pub const GLOBAL: ScopeFlag = ScopeFlag(1);
    /// Visible within the calling session.
    pub const SESSION: ScopeFlag = ScopeFlag(1 << 1);
    /// Scope assumed when a provider does not classify a variable.
    pub const DEFAULT: ScopeFlag = ScopeFlag(Self::GLOBAL.0 | Self::SESSION.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        ScopeFlag(bits & Self::DEFAULT.0)
    }

    pub const fn contains(self, other: ScopeFlag) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_global(self) -> bool {
        self.contains(Self::GLOBAL)
    }

    pub const fn is_session(self) -> bool {
        self.contains(Self::SESSION)
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Default for ScopeFlag {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for ScopeFlag {
    type Output = ScopeFlag;

    fn bitor(self, rhs: ScopeFlag) -> ScopeFlag {
        ScopeFlag(self.0 | rhs.0)
    }
}

impl fmt::Display for ScopeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_global(), self.is_session()) {
            (true, true) => f.write_str("GLOBAL|SESSION"),
            (true, false) => f.write_str("GLOBAL"),
            (false, true) => f.write_str("SESSION"),
            (false, false) => f.write_str("NONE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_global_and_session() {
        let scope = ScopeFlag::default();
        assert_eq!(scope, ScopeFlag::DEFAULT);
        assert!(scope.is_global());
        assert!(scope.is_session());
        assert_eq!(ScopeFlag::GLOBAL | ScopeFlag::SESSION, scope);
    }

    #[test]
    fn test_none_contains_nothing() {
        assert!(ScopeFlag::NONE.is_none());
        assert!(!ScopeFlag::NONE.is_global());
        assert!(!ScopeFlag::NONE.is_session());
        assert!(ScopeFlag::GLOBAL.contains(ScopeFlag::NONE));
    }

    #[test]
    fn test_from_bits_drops_unknown_bits() {
        assert_eq!(ScopeFlag::from_bits_truncate(0xff), ScopeFlag::DEFAULT);
        assert_eq!(ScopeFlag::from_bits_truncate(0b100), ScopeFlag::NONE);
    }

    #[test]
    fn test_display() {
        assert_eq!(ScopeFlag::DEFAULT.to_string(), "GLOBAL|SESSION");
        assert_eq!(ScopeFlag::GLOBAL.to_string(), "GLOBAL");
        assert_eq!(ScopeFlag::SESSION.to_string(), "SESSION");
        assert_eq!(ScopeFlag::NONE.to_string(), "NONE");
    }

    #[test]
    fn test_serializes_as_bits() {
        let json = serde_json::to_string(&ScopeFlag::SESSION).unwrap();
        assert_eq!(json, "2");
    }
}
