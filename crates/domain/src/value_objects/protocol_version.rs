//! Negotiated wire-protocol revision of a viewer.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(i32);

impl ProtocolVersion {
    pub const V1_7_2: Self = Self(4);
    pub const V1_7_10: Self = Self(5);
    pub const V1_8: Self = Self(47);
    /// First revision with a native boss bar packet.
    pub const V1_9: Self = Self(107);

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn id(self) -> i32 {
        self.0
    }

    /// Whether the client renders boss bars without a disguised entity.
    pub fn supports_native_boss_bar(self) -> bool {
        self >= Self::V1_9
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_support_starts_at_1_9() {
        assert!(!ProtocolVersion::V1_7_10.supports_native_boss_bar());
        assert!(!ProtocolVersion::V1_8.supports_native_boss_bar());
        assert!(!ProtocolVersion::new(106).supports_native_boss_bar());
        assert!(ProtocolVersion::V1_9.supports_native_boss_bar());
        assert!(ProtocolVersion::new(340).supports_native_boss_bar());
    }
}
