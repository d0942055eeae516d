//! Value objects for the boss bar domain.

mod direction;
mod disguise;
mod location;
mod percent;
mod protocol_version;
mod title;

pub use direction::CardinalDirection;
pub use disguise::Disguise;
pub use location::Location;
pub use percent::{Percent, Progress};
pub use protocol_version::ProtocolVersion;
pub use title::{BarTitle, MAX_TITLE_CHARS, TRUNCATED_TITLE_CHARS};
