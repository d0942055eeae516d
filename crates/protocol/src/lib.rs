//! Boss bar protocol - clientbound packets for disguised entities.
//!
//! Only the four packet shapes needed to spawn, update, move and remove one
//! non-interactive entity are modelled, for the 1.7 and 1.8 wire layouts.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - domain types, `bytes` and serde only
//! 2. **No business logic** - packet shapes and their encodings
//! 3. **Typed until the edge** - packets stay structured until `encode`

pub mod codec;
pub mod metadata;
pub mod packets;

pub use codec::{WireDialect, WireWrite};
pub use metadata::{Metadata, MetadataEntry, MetadataValue, METADATA_END};
pub use packets::{
    DestroyEntities, EntityMetadata, EntityPacket, EntityTeleport, OutboundPacket, SpawnMob,
    DESTROY_ENTITIES_ID, ENTITY_METADATA_ID, ENTITY_TELEPORT_ID, SPAWN_MOB_ID,
};
