//! Storage Facts - Mount-Record Classification Engine
//!
//! Normalizes heterogeneous, already-parsed storage-mount records (fstab,
//! mount, or df origin) into canonical, strongly-structured storage facts:
//! what kind of storage object each record is (filesystem vs. paging),
//! which driver family it belongs to (regular, virtual, overlay, network,
//! FUSE), how conflicting or missing fields reconcile, and how raw
//! capacity numbers become structured, percent-annotated values.
//!
//! ```text
//! [raw records] ──► Entry Classifier ──► [storage facts]
//!                      │        │
//!              Driver Table   Capacity Processor ──► byte formatter
//!                                                    (injected)
//! ```
//!
//! The engine is a pure, stateless, synchronous transformation: no device
//! discovery, no I/O, no persistent state. Raw-text parsing and SI byte
//! formatting are external collaborators; the formatter is injected, and
//! its absence fails fast the moment capacity data is encountered.
//!
//! A key correctness property runs through everything: a key *absent* from
//! a record means unknown/ambiguous and never appears in the output, while
//! a key present with *null* means definitively not applicable and is
//! emitted as null. See [`model::Field`].
//!
//! # Modules
//!
//! - [`model`]: raw-record and storage-fact shapes, tri-state fields
//! - [`classify`]: the driver classification table and entry classifier
//! - [`capacity`]: capacity processing and the byte-formatter contract
//! - [`error`]: error types and handling

pub mod capacity;
pub mod classify;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use capacity::{ByteFormatter, CapacityProcessor};
pub use classify::{lookup, Classifier, DriverEntry, DriverKind, DriverOrigin};
pub use error::{Error, Result};
pub use model::{
    ByteValue, CapacityFact, DriverFact, DumpFact, Field, FsckFact, FuseDriver, OptionValue,
    OptionsMap, RawRecord, StorageClass, StorageFact, UsedCapacity,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
