//! Fake-entity packet builder.
//!
//! Turns bar state into the packets that spawn, update, move and remove the
//! invisible boss creature carrying the bar. Pure: nothing here sends.

use bossbar_domain::{BarTitle, Disguise, EntityHandle, Location, Percent};
use bossbar_protocol::{
    DestroyEntities, EntityMetadata, EntityPacket, EntityTeleport, Metadata, MetadataValue,
    SpawnMob, WireDialect,
};

/// Entity flags byte with only the invisible bit set.
const INVISIBLE: u8 = 0x20;
/// Invulnerability timer that keeps the wither's bar steady.
const WITHER_INVULNERABLE_TICKS: i32 = 881;

/// Builds packets for one disguise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeEntity {
    disguise: Disguise,
}

impl FakeEntity {
    pub fn new(disguise: Disguise) -> Self {
        Self { disguise }
    }

    pub fn max_health(&self) -> f32 {
        self.disguise.max_health()
    }

    pub fn health_for(&self, percent: Percent) -> f32 {
        self.disguise.health_for(percent)
    }

    /// Clamp into `[0, max_health]`.
    pub fn clamp_health(&self, health: f32) -> f32 {
        if health.is_nan() {
            return 0.0;
        }
        health.clamp(0.0, self.max_health())
    }

    pub fn spawn(
        &self,
        dialect: WireDialect,
        entity: EntityHandle,
        position: Location,
        title: &BarTitle,
        health: f32,
    ) -> EntityPacket {
        EntityPacket::Spawn(SpawnMob {
            entity,
            entity_type: self.disguise.entity_type_id(),
            position,
            velocity: [0; 3],
            metadata: self.metadata(dialect, title, health),
        })
    }

    /// Metadata refresh carrying title and health.
    pub fn status(
        &self,
        dialect: WireDialect,
        entity: EntityHandle,
        title: &BarTitle,
        health: f32,
    ) -> EntityPacket {
        EntityPacket::Metadata(EntityMetadata {
            entity,
            metadata: self.metadata(dialect, title, health),
        })
    }

    pub fn teleport(&self, entity: EntityHandle, position: Location) -> EntityPacket {
        EntityPacket::Teleport(EntityTeleport {
            entity,
            position,
            on_ground: false,
        })
    }

    pub fn despawn(&self, entity: EntityHandle) -> EntityPacket {
        EntityPacket::Destroy(DestroyEntities {
            entities: vec![entity],
        })
    }

    fn metadata(&self, dialect: WireDialect, title: &BarTitle, health: f32) -> Metadata {
        let name = MetadataValue::String(title.as_str().to_string());
        let show_name = MetadataValue::Byte(1);

        let metadata = Metadata::new().with(0, MetadataValue::Byte(INVISIBLE));
        let metadata = match dialect {
            WireDialect::V1_7 => metadata,
            WireDialect::V1_8 => metadata.with(2, name.clone()).with(3, show_name.clone()),
        };
        let metadata = metadata
            .with(6, MetadataValue::Float(self.clamp_health(health)))
            .with(7, MetadataValue::Int(0))
            .with(8, MetadataValue::Byte(0));
        let metadata = match dialect {
            WireDialect::V1_7 => metadata.with(10, name).with(11, show_name),
            WireDialect::V1_8 => metadata,
        };

        match self.disguise {
            Disguise::EnderDragon => metadata,
            Disguise::Wither => metadata
                .with(17, MetadataValue::Int(0))
                .with(18, MetadataValue::Int(0))
                .with(19, MetadataValue::Int(0))
                .with(20, MetadataValue::Int(WITHER_INVULNERABLE_TICKS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_metadata(builder: FakeEntity, dialect: WireDialect, health: f32) -> Metadata {
        match builder.status(dialect, EntityHandle::new(7), &BarTitle::new("Boss"), health) {
            EntityPacket::Metadata(packet) => packet.metadata,
            other => panic!("expected metadata packet, got {other:?}"),
        }
    }

    #[test]
    fn when_dialect_is_1_7_then_name_uses_high_slots() {
        let metadata = status_metadata(FakeEntity::default(), WireDialect::V1_7, 100.0);

        assert_eq!(metadata.get(10), Some(&MetadataValue::String("Boss".into())));
        assert_eq!(metadata.get(11), Some(&MetadataValue::Byte(1)));
        assert_eq!(metadata.get(2), None);
    }

    #[test]
    fn when_dialect_is_1_8_then_name_uses_low_slots() {
        let metadata = status_metadata(FakeEntity::default(), WireDialect::V1_8, 100.0);

        assert_eq!(metadata.get(2), Some(&MetadataValue::String("Boss".into())));
        assert_eq!(metadata.get(3), Some(&MetadataValue::Byte(1)));
        assert_eq!(metadata.get(10), None);
    }

    #[test]
    fn when_health_out_of_range_then_clamped_to_disguise_maximum() {
        let dragon = FakeEntity::new(Disguise::EnderDragon);

        let metadata = status_metadata(dragon, WireDialect::V1_8, 9_000.0);
        assert_eq!(metadata.get(6), Some(&MetadataValue::Float(200.0)));

        let metadata = status_metadata(dragon, WireDialect::V1_8, -4.0);
        assert_eq!(metadata.get(6), Some(&MetadataValue::Float(0.0)));
    }

    #[test]
    fn when_disguised_as_wither_then_extra_slots_are_set() {
        let wither = FakeEntity::new(Disguise::Wither);

        let metadata = status_metadata(wither, WireDialect::V1_7, 300.0);

        assert_eq!(metadata.get(20), Some(&MetadataValue::Int(881)));
        assert_eq!(metadata.get(17), Some(&MetadataValue::Int(0)));
        assert_eq!(metadata.get(6), Some(&MetadataValue::Float(300.0)));
        assert_eq!(
            status_metadata(FakeEntity::default(), WireDialect::V1_7, 1.0).get(20),
            None
        );
    }

    #[test]
    fn spawn_uses_disguise_type_and_zero_velocity() {
        let packet = FakeEntity::new(Disguise::Wither).spawn(
            WireDialect::V1_8,
            EntityHandle::new(3),
            Location::new(1.0, 2.0, 3.0),
            &BarTitle::new("Boss"),
            150.0,
        );

        let EntityPacket::Spawn(spawn) = packet else {
            panic!("expected spawn packet");
        };
        assert_eq!(spawn.entity_type, 64);
        assert_eq!(spawn.velocity, [0, 0, 0]);
        assert_eq!(spawn.metadata.get(6), Some(&MetadataValue::Float(150.0)));
    }

    #[test]
    fn despawn_destroys_only_the_given_entity() {
        let packet = FakeEntity::default().despawn(EntityHandle::new(11));

        assert_eq!(
            packet,
            EntityPacket::Destroy(DestroyEntities {
                entities: vec![EntityHandle::new(11)],
            })
        );
    }
}
