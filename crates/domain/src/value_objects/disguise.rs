//! Creature types used to impersonate a boss.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Percent;
use crate::DomainError;

/// Boss creature whose health bar the client draws at the top of the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disguise {
    #[default]
    EnderDragon,
    Wither,
}

impl Disguise {
    /// Mob type id used in the spawn packet.
    pub fn entity_type_id(self) -> u8 {
        match self {
            Self::EnderDragon => 63,
            Self::Wither => 64,
        }
    }

    pub fn max_health(self) -> f32 {
        match self {
            Self::EnderDragon => 200.0,
            Self::Wither => 300.0,
        }
    }

    pub fn health_for(self, percent: Percent) -> f32 {
        percent.fraction() * self.max_health()
    }
}

impl FromStr for Disguise {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dragon" | "ender_dragon" | "enderdragon" => Ok(Self::EnderDragon),
            "wither" => Ok(Self::Wither),
            other => Err(DomainError::parse(format!("Unknown disguise: {other}"))),
        }
    }
}
