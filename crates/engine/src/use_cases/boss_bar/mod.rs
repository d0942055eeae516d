//! Boss bar implementations: the legacy emulation and the mixed facade.

mod legacy;
mod mixed;

pub use legacy::{LegacyBossBar, LegacyBossBarFactory};
pub use mixed::{MixedBossBar, MixedBossBarFactory};
