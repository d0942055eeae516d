//! Boss bar domain types.
//!
//! Identifiers, validated value objects and the events exchanged with the
//! host runtime. No I/O lives here.

pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use error::DomainError;
pub use events::{BarTask, RelocationSnapshot, ViewerEvent};
pub use ids::{EntityHandle, ViewerId};
pub use value_objects::{
    BarTitle, CardinalDirection, Disguise, Location, Percent, Progress, ProtocolVersion,
    MAX_TITLE_CHARS, TRUNCATED_TITLE_CHARS,
};
