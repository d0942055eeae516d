//! Engine configuration, read once at startup.

use serde::{Deserialize, Serialize};

use bossbar_domain::Disguise;

const BELOW_GROUND_MODE: &str = "BOSSBAR_BELOW_GROUND_MODE";
const DISGUISE: &str = "BOSSBAR_DISGUISE";
const VIEW_DISTANCE: &str = "BOSSBAR_VIEW_DISTANCE";
const TICK_MILLIS: &str = "BOSSBAR_TICK_MILLIS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Hide the disguised entity far below the viewer and re-anchor it
    /// periodically, for clients that lose track of it.
    pub below_ground_mode: bool,
    pub disguise: Disguise,
    /// Render distance in chunks reported by the demo host.
    pub view_distance: u32,
    /// Length of one scheduler tick in the demo host.
    pub tick_millis: u64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            below_ground_mode: false,
            disguise: Disguise::EnderDragon,
            view_distance: 10,
            tick_millis: 50,
        }
    }
}

impl BarConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let below_ground_mode = match lookup(BELOW_GROUND_MODE) {
            Some(value) => parse_bool(BELOW_GROUND_MODE, value)?,
            None => defaults.below_ground_mode,
        };
        let disguise = match lookup(DISGUISE) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: DISGUISE,
                value,
            })?,
            None => defaults.disguise,
        };
        let view_distance = match lookup(VIEW_DISTANCE) {
            Some(value) => parse_number(VIEW_DISTANCE, value)?,
            None => defaults.view_distance,
        };
        let tick_millis = match lookup(TICK_MILLIS) {
            Some(value) => parse_number(TICK_MILLIS, value)?,
            None => defaults.tick_millis,
        };

        Ok(Self {
            below_ground_mode,
            disguise,
            view_distance,
            tick_millis,
        })
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
