//! Primitive encoders shared by the clientbound packets.

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use bossbar_domain::ProtocolVersion;

/// Binary layout family used for a viewer's packets.
///
/// Both layouts share packet ids; they differ in how entity ids, counts and
/// rotations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireDialect {
    /// 1.7.x: fixed-width entity ids in most packets.
    V1_7,
    /// 1.8.x: VarInt entity ids, on-ground flag on teleports.
    V1_8,
}

impl WireDialect {
    pub fn for_version(version: ProtocolVersion) -> Self {
        if version >= ProtocolVersion::V1_8 {
            Self::V1_8
        } else {
            Self::V1_7
        }
    }
}

/// Wire primitives on top of [`BufMut`].
pub trait WireWrite: BufMut {
    fn put_var_int(&mut self, value: i32) {
        let mut value = value as u32;
        loop {
            if value & !0x7F == 0 {
                self.put_u8(value as u8);
                return;
            }
            self.put_u8((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
    }

    /// VarInt byte length followed by UTF-8 bytes.
    fn put_string(&mut self, value: &str) {
        self.put_var_int(value.len() as i32);
        self.put_slice(value.as_bytes());
    }

    /// Absolute coordinate in 1/32 block units.
    fn put_fixed_point(&mut self, coordinate: f64) {
        self.put_i32((coordinate * 32.0).floor() as i32);
    }

    /// Rotation in 1/256 turn steps.
    fn put_angle(&mut self, degrees: f32) {
        let steps = degrees.rem_euclid(360.0) * 256.0 / 360.0;
        self.put_u8(steps as u8);
    }
}

impl<B: BufMut + ?Sized> WireWrite for B {}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn var_int(value: i32) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_var_int(value);
        buf.to_vec()
    }

    #[test]
    fn var_int_matches_reference_encodings() {
        assert_eq!(var_int(0), vec![0x00]);
        assert_eq!(var_int(127), vec![0x7F]);
        assert_eq!(var_int(300), vec![0xAC, 0x02]);
        assert_eq!(var_int(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn angle_wraps_into_one_turn() {
        let mut buf = BytesMut::new();
        buf.put_angle(90.0);
        buf.put_angle(-90.0);
        buf.put_angle(360.0);
        assert_eq!(buf.to_vec(), vec![64, 192, 0]);
    }

    #[test]
    fn fixed_point_floors_toward_negative_infinity() {
        let mut buf = BytesMut::new();
        buf.put_fixed_point(-0.5);
        buf.put_fixed_point(1.0);
        assert_eq!(buf.to_vec(), vec![0xFF, 0xFF, 0xFF, 0xF0, 0, 0, 0, 32]);
    }

    #[test]
    fn dialect_follows_protocol_version() {
        assert_eq!(WireDialect::for_version(ProtocolVersion::V1_7_10), WireDialect::V1_7);
        assert_eq!(WireDialect::for_version(ProtocolVersion::V1_8), WireDialect::V1_8);
        assert_eq!(WireDialect::for_version(ProtocolVersion::V1_9), WireDialect::V1_8);
    }
}
