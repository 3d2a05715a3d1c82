//! Storage Fact
//!
//! The canonical output shape: one strongly-structured fact per input
//! record. Field presence mirrors the raw record's presence semantics
//! through [`Field`], and every substructure serializes to the exact
//! canonical JSON shape consumed by downstream reporting.

use crate::model::field::Field;
use crate::model::record::RawCount;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Storage Fact
// =============================================================================

/// Canonical storage fact for one mount record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageFact {
    /// Top-level kind of storage object.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub class: Field<StorageClass>,

    /// Mount path. Present only for filesystem-class facts.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub mount: Field<String>,

    /// Resolved driver: flat, legacy multi-type list, or FUSE descriptor.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub driver: Field<DriverFact>,

    /// Backing device, or explicit null when definitively absent.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub source: Field<String>,

    /// Parsed mount options, in encounter order.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub options: Field<OptionsMap>,

    /// Structured dump-frequency interpretation.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub dump: Field<DumpFact>,

    /// Structured fsck-pass interpretation.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub fsck: Field<FsckFact>,

    /// Byte-formatted capacity with used percentage.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub capacity: Field<CapacityFact>,
}

/// Top-level storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageClass {
    Filesystem,
    Paging,
}

// =============================================================================
// Driver
// =============================================================================

/// Parsed mount options: name to value-or-flag, preserving order.
pub type OptionsMap = IndexMap<String, OptionValue>;

/// A single mount-option value: `true` for a bare flag, text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// Resolved driver shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriverFact {
    /// Structured FUSE descriptor, serialized as `{"fuse": {...}}`.
    Fuse { fuse: FuseDriver },
    /// Ordered candidate list from a legacy comma-separated fstab field.
    Multi(Vec<String>),
    /// Single lowercased driver name.
    Flat(String),
}

impl DriverFact {
    pub fn flat(name: impl Into<String>) -> Self {
        DriverFact::Flat(name.into())
    }

    /// Mutable access to the FUSE descriptor, if this is one.
    pub fn as_fuse_mut(&mut self) -> Option<&mut FuseDriver> {
        match self {
            DriverFact::Fuse { fuse } => Some(fuse),
            _ => None,
        }
    }
}

/// FUSE driver descriptor: a backend subtype, block-backed, or both unknown
/// (generic `fuse` mount awaiting a `subtype=` option).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuseDriver {
    /// Backend implementation name (e.g. "sshfs"). Explicit null when a bare
    /// `subtype` flag carried no value.
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_unknown")]
    pub subtype: Field<String>,

    /// Set for block-backed FUSE mounts (`fuseblk`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<bool>,
}

impl FuseDriver {
    /// Descriptor for a block-backed FUSE mount.
    pub fn block_backed() -> Self {
        FuseDriver {
            subtype: Field::Unknown,
            block: Some(true),
        }
    }

    /// Descriptor for a FUSE mount with a known backend subtype.
    pub fn with_subtype(subtype: impl Into<String>) -> Self {
        FuseDriver {
            subtype: Field::Value(subtype.into()),
            block: None,
        }
    }
}

// =============================================================================
// Dump / Fsck
// =============================================================================

/// Interpreted fstab dump-frequency field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DumpFact {
    /// Non-integer or negative raw value, preserved for downstream flagging.
    Invalid { invalid: serde_json::Value },
    /// Well-formed value: disabled (0) or enabled every `days` days.
    Schedule {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        days: Option<i64>,
    },
}

impl DumpFact {
    /// Interpret a raw dump value per fstab semantics.
    pub fn from_raw(raw: &RawCount) -> Self {
        match raw {
            RawCount::Int(n) if *n < 0 => DumpFact::Invalid {
                invalid: serde_json::Value::from(*n),
            },
            RawCount::Int(n) => DumpFact::Schedule {
                enabled: *n > 0,
                days: (*n > 0).then_some(*n),
            },
            RawCount::Other(value) => DumpFact::Invalid {
                invalid: value.clone(),
            },
        }
    }
}

/// Interpreted fstab fsck-pass field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FsckFact {
    /// Malformed raw value. A negative integer is additionally marked
    /// disabled, the common convention for "skip fsck".
    Invalid {
        invalid: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    /// Well-formed value: disabled (0) or enabled at `pass` order.
    Schedule {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pass: Option<i64>,
    },
}

impl FsckFact {
    /// Interpret a raw fsck pass value per fstab semantics.
    pub fn from_raw(raw: &RawCount) -> Self {
        match raw {
            RawCount::Int(n) if *n < 0 => FsckFact::Invalid {
                invalid: serde_json::Value::from(*n),
                enabled: Some(false),
            },
            RawCount::Int(n) => FsckFact::Schedule {
                enabled: *n > 0,
                pass: (*n > 0).then_some(*n),
            },
            RawCount::Other(value) => FsckFact::Invalid {
                invalid: value.clone(),
                enabled: None,
            },
        }
    }
}

// =============================================================================
// Capacity
// =============================================================================

/// A byte quantity with its human-readable rendering, as returned by the
/// byte formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteValue {
    pub bytes: u64,
    pub pretty: String,
}

/// Used capacity: a byte quantity annotated with percent-of-total when the
/// total is known and non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedCapacity {
    pub bytes: u64,
    pub pretty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl From<ByteValue> for UsedCapacity {
    fn from(value: ByteValue) -> Self {
        UsedCapacity {
            bytes: value.bytes,
            pretty: value.pretty,
            percent: None,
        }
    }
}

/// Structured capacity for one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityFact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<ByteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<UsedCapacity>,
}

impl CapacityFact {
    /// True when neither side resolved; an empty capacity is not attached
    /// to the fact.
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.used.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dump_shapes() {
        assert_eq!(
            serde_json::to_value(DumpFact::from_raw(&RawCount::Int(0))).unwrap(),
            json!({"enabled": false})
        );
        assert_eq!(
            serde_json::to_value(DumpFact::from_raw(&RawCount::Int(5))).unwrap(),
            json!({"enabled": true, "days": 5})
        );
        assert_eq!(
            serde_json::to_value(DumpFact::from_raw(&RawCount::Int(-1))).unwrap(),
            json!({"invalid": -1})
        );
        assert_eq!(
            serde_json::to_value(DumpFact::from_raw(&RawCount::Other(json!("weekly")))).unwrap(),
            json!({"invalid": "weekly"})
        );
    }

    #[test]
    fn test_fsck_shapes() {
        assert_eq!(
            serde_json::to_value(FsckFact::from_raw(&RawCount::Int(0))).unwrap(),
            json!({"enabled": false})
        );
        assert_eq!(
            serde_json::to_value(FsckFact::from_raw(&RawCount::Int(1))).unwrap(),
            json!({"enabled": true, "pass": 1})
        );
        assert_eq!(
            serde_json::to_value(FsckFact::from_raw(&RawCount::Int(-2))).unwrap(),
            json!({"invalid": -2, "enabled": false})
        );
        assert_eq!(
            serde_json::to_value(FsckFact::from_raw(&RawCount::Other(json!([])))).unwrap(),
            json!({"invalid": []})
        );
    }

    #[test]
    fn test_fuse_driver_shapes() {
        assert_eq!(
            serde_json::to_value(DriverFact::Fuse {
                fuse: FuseDriver::block_backed()
            })
            .unwrap(),
            json!({"fuse": {"block": true}})
        );
        assert_eq!(
            serde_json::to_value(DriverFact::Fuse {
                fuse: FuseDriver::with_subtype("sshfs")
            })
            .unwrap(),
            json!({"fuse": {"type": "sshfs"}})
        );

        // Bare `subtype` flag leaves an explicit null behind.
        let mut driver = DriverFact::Fuse {
            fuse: FuseDriver::default(),
        };
        driver.as_fuse_mut().unwrap().subtype = Field::Null;
        assert_eq!(
            serde_json::to_value(driver).unwrap(),
            json!({"fuse": {"type": null}})
        );
    }

    #[test]
    fn test_empty_fact_serializes_to_empty_object() {
        assert_eq!(
            serde_json::to_value(StorageFact::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_empty_capacity_detection() {
        assert!(CapacityFact::default().is_empty());
        let capacity = CapacityFact {
            total: Some(ByteValue {
                bytes: 1024,
                pretty: "1.0 KiB".into(),
            }),
            used: None,
        };
        assert!(!capacity.is_empty());
    }
}
