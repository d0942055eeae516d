//! Entity metadata (the "data watcher" attribute list).

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::codec::WireWrite;

/// Marks the end of a metadata list.
pub const METADATA_END: u8 = 0x7F;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Byte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
}

impl MetadataValue {
    fn type_id(&self) -> u8 {
        match self {
            Self::Byte(_) => 0,
            Self::Short(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::String(_) => 4,
        }
    }

    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Self::Byte(v) => buf.put_u8(*v),
            Self::Short(v) => buf.put_i16(*v),
            Self::Int(v) => buf.put_i32(*v),
            Self::Float(v) => buf.put_f32(*v),
            Self::String(v) => buf.put_string(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Attribute slot, 0..=31.
    pub index: u8,
    pub value: MetadataValue,
}

/// Ordered list of metadata entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, index: u8, value: MetadataValue) -> Self {
        self.entries.push(MetadataEntry { index, value });
        self
    }

    pub fn get(&self, index: u8) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|entry| entry.index == index)
            .map(|entry| &entry.value)
    }

    pub fn write(&self, buf: &mut impl BufMut) {
        for entry in &self.entries {
            buf.put_u8((entry.value.type_id() << 5) | (entry.index & 0x1F));
            entry.value.write(buf);
        }
        buf.put_u8(METADATA_END);
    }
}
