//! Raw Storage Record
//!
//! The input shape consumed by the classifier: one normalized record per
//! mount, as produced by an upstream fstab/mount/df parser. Every key is
//! optional, and key presence itself carries meaning (see [`Field`]).
//! Numeric-ish fields keep their loose upstream shapes via untagged enums
//! so that malformed values can be annotated instead of rejected.

use crate::model::fact::StorageClass;
use crate::model::field::Field;
use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Record
// =============================================================================

/// One already-parsed storage-mount record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Pre-known classification, if the upstream parser already decided.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub class: Field<StorageClass>,

    /// Target mount path.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub mount: Field<String>,

    /// Backing device or filesystem identifier, or the literal "none"/"-".
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub source: Field<String>,

    /// Filesystem/driver type string. Case-insensitive; may be
    /// comma-separated (legacy fstab multi-type field).
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub driver: Field<String>,

    /// Mount options, each token either `key` or `key=value`.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub options: Field<RawOptions>,

    /// Dump frequency (fstab semantics).
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub dump: Field<RawCount>,

    /// Fsck pass order (fstab semantics).
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub pass: Field<RawCount>,

    /// Total capacity: block count (needs `block_size`) or unit-bearing string.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub total: Field<RawCapacity>,

    /// Used capacity: block count (needs `block_size`) or unit-bearing string.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub used: Field<RawCapacity>,

    /// Multiplier applied to block-count capacity fields.
    #[serde(default, skip_serializing_if = "Field::is_unknown")]
    pub block_size: Field<RawBlockSize>,
}

impl RawRecord {
    /// True when the record carries any capacity data at all, null values
    /// included. Presence alone obligates capacity processing.
    pub fn has_capacity_fields(&self) -> bool {
        self.total.is_present() || self.used.is_present()
    }
}

// =============================================================================
// Loose Field Shapes
// =============================================================================

/// Raw mount options: a token list, or an unparsed blob the upstream parser
/// gave up on. Unparsed options are skipped, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    List(Vec<String>),
    Unparsed(String),
}

/// A raw `dump`/`pass` value: an integer if well-formed, anything else
/// otherwise. The non-integer payload is preserved verbatim so the output
/// can flag it as invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Int(i64),
    Other(serde_json::Value),
}

/// A raw capacity value: a block count, or a string already carrying units
/// (e.g. "10G") which passes through to the byte formatter untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCapacity {
    Blocks(i64),
    Sized(String),
}

/// A raw block size: a byte multiplier, or a unit-bearing string resolved
/// through the byte formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBlockSize {
    Bytes(u64),
    Sized(String),
}
