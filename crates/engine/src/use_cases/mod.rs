//! Use cases - bar orchestration.
//!
//! - `BarApi` - per-viewer message API
//! - `BarLifecycle` - reacts to viewer events and runs scheduled tasks
//! - `boss_bar` - logical boss bars over the emulation and native bars

pub mod bar_api;
pub mod boss_bar;
pub mod lifecycle;

pub use bar_api::{BarApi, COUNTDOWN_PERIOD_TICKS, NO_BAR_HEALTH};
pub use boss_bar::{LegacyBossBar, LegacyBossBarFactory, MixedBossBar, MixedBossBarFactory};
pub use lifecycle::{BarLifecycle, REANCHOR_PERIOD_TICKS, RELOCATION_RESPAWN_DELAY_TICKS};
