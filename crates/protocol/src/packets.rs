//! Clientbound packets for a single disguised entity.
//!
//! Each packet knows its id and writes its body for a [`WireDialect`]. Frames
//! are `VarInt id ++ body`; length prefixing and compression belong to the
//! transport.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use bossbar_domain::{EntityHandle, Location};

use crate::codec::{WireDialect, WireWrite};
use crate::metadata::Metadata;

pub const SPAWN_MOB_ID: u8 = 0x0F;
pub const DESTROY_ENTITIES_ID: u8 = 0x13;
pub const ENTITY_TELEPORT_ID: u8 = 0x18;
pub const ENTITY_METADATA_ID: u8 = 0x1C;

/// Spawns a living entity with its initial metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnMob {
    pub entity: EntityHandle,
    pub entity_type: u8,
    pub position: Location,
    /// Velocity in 1/8000 block per tick.
    pub velocity: [i16; 3],
    pub metadata: Metadata,
}

impl SpawnMob {
    fn write(&self, dialect: WireDialect, buf: &mut impl BufMut) {
        buf.put_var_int(self.entity.raw());
        buf.put_u8(self.entity_type);
        buf.put_fixed_point(self.position.x);
        buf.put_fixed_point(self.position.y);
        buf.put_fixed_point(self.position.z);
        match dialect {
            WireDialect::V1_7 => {
                buf.put_angle(self.position.pitch);
                buf.put_angle(self.position.pitch);
                buf.put_angle(self.position.yaw);
            }
            WireDialect::V1_8 => {
                buf.put_angle(self.position.yaw);
                buf.put_angle(self.position.pitch);
                buf.put_angle(self.position.pitch);
            }
        }
        for component in self.velocity {
            buf.put_i16(component);
        }
        self.metadata.write(buf);
    }
}

/// Replaces attributes of a known entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub entity: EntityHandle,
    pub metadata: Metadata,
}

impl EntityMetadata {
    fn write(&self, dialect: WireDialect, buf: &mut impl BufMut) {
        put_entity_id(dialect, self.entity, buf);
        self.metadata.write(buf);
    }
}

/// Moves a known entity to an absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTeleport {
    pub entity: EntityHandle,
    pub position: Location,
    /// Only sent by the 1.8 layout.
    pub on_ground: bool,
}

impl EntityTeleport {
    fn write(&self, dialect: WireDialect, buf: &mut impl BufMut) {
        put_entity_id(dialect, self.entity, buf);
        buf.put_fixed_point(self.position.x);
        buf.put_fixed_point(self.position.y);
        buf.put_fixed_point(self.position.z);
        buf.put_angle(self.position.yaw);
        buf.put_angle(self.position.pitch);
        if dialect == WireDialect::V1_8 {
            buf.put_u8(u8::from(self.on_ground));
        }
    }
}

/// Removes entities from the client's world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestroyEntities {
    pub entities: Vec<EntityHandle>,
}

impl DestroyEntities {
    fn write(&self, dialect: WireDialect, buf: &mut impl BufMut) {
        match dialect {
            WireDialect::V1_7 => {
                // Count is a single unsigned byte.
                let count = self.entities.len().min(usize::from(u8::MAX));
                buf.put_u8(count as u8);
                for entity in &self.entities[..count] {
                    buf.put_i32(entity.raw());
                }
            }
            WireDialect::V1_8 => {
                buf.put_var_int(self.entities.len() as i32);
                for entity in &self.entities {
                    buf.put_var_int(entity.raw());
                }
            }
        }
    }
}

fn put_entity_id(dialect: WireDialect, entity: EntityHandle, buf: &mut impl BufMut) {
    match dialect {
        WireDialect::V1_7 => buf.put_i32(entity.raw()),
        WireDialect::V1_8 => buf.put_var_int(entity.raw()),
    }
}

/// Any packet the bar emulation sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityPacket {
    Spawn(SpawnMob),
    Metadata(EntityMetadata),
    Teleport(EntityTeleport),
    Destroy(DestroyEntities),
}

impl EntityPacket {
    pub fn id(&self) -> u8 {
        match self {
            Self::Spawn(_) => SPAWN_MOB_ID,
            Self::Metadata(_) => ENTITY_METADATA_ID,
            Self::Teleport(_) => ENTITY_TELEPORT_ID,
            Self::Destroy(_) => DESTROY_ENTITIES_ID,
        }
    }

    /// Encode as `VarInt id ++ body`.
    pub fn encode(&self, dialect: WireDialect) -> Bytes {
        let mut buf = BytesMut::with_capacity(64);
        buf.put_var_int(i32::from(self.id()));
        match self {
            Self::Spawn(packet) => packet.write(dialect, &mut buf),
            Self::Metadata(packet) => packet.write(dialect, &mut buf),
            Self::Teleport(packet) => packet.write(dialect, &mut buf),
            Self::Destroy(packet) => packet.write(dialect, &mut buf),
        }
        buf.freeze()
    }
}

/// A packet paired with the layout of the viewer it is addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundPacket {
    pub dialect: WireDialect,
    pub packet: EntityPacket,
}

impl OutboundPacket {
    pub fn new(dialect: WireDialect, packet: EntityPacket) -> Self {
        Self { dialect, packet }
    }

    pub fn encode(&self) -> Bytes {
        self.packet.encode(self.dialect)
    }
}
