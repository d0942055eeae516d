//! Entity modules - the disguised creature and where it is placed.

pub mod fake_entity;
pub mod placement;

pub use fake_entity::FakeEntity;
pub use placement::Placement;
