//! Entry Classifier
//!
//! Applies the ordered normalization rules that turn one raw mount record
//! into one canonical storage fact: mount/class detection, driver
//! resolution, source resolution, option parsing with FUSE-subtype
//! extraction, legacy comma-separated driver splitting, dump/fsck
//! interpretation, and capacity delegation.
//!
//! Classification is pure and per-record: no record depends on any other,
//! order is preserved, and the only failure mode is the capacity
//! processor's missing-formatter configuration error.

use crate::capacity::{ByteFormatter, CapacityProcessor};
use crate::classify::drivers;
use crate::error::Result;
use crate::model::{
    DriverFact, DumpFact, Field, FsckFact, FuseDriver, OptionValue, OptionsMap, RawOptions,
    RawRecord, StorageClass, StorageFact,
};
use tracing::{debug, trace};

// =============================================================================
// Classifier
// =============================================================================

/// The entry classifier, optionally wired to a byte formatter for capacity
/// processing. Without one, records carrying capacity fields fail with a
/// configuration error; everything else classifies normally.
pub struct Classifier {
    formatter: Option<Box<dyn ByteFormatter>>,
}

impl Classifier {
    /// Classifier with capacity support.
    pub fn new(formatter: impl ByteFormatter + 'static) -> Self {
        Classifier {
            formatter: Some(Box::new(formatter)),
        }
    }

    /// Classifier without a byte formatter wired in.
    pub fn without_formatter() -> Self {
        Classifier { formatter: None }
    }

    /// Classify a batch of records, preserving order.
    pub fn classify_all(&self, records: &[RawRecord]) -> Result<Vec<StorageFact>> {
        debug!(count = records.len(), "classifying storage records");
        records.iter().map(|r| self.classify_one(r)).collect()
    }

    /// Classify one record. Pure: same input, same output.
    pub fn classify_one(&self, record: &RawRecord) -> Result<StorageFact> {
        let mut fact = StorageFact::default();

        self.carry_class(record, &mut fact);
        self.split_mount(record, &mut fact);
        self.resolve_driver(record, &mut fact);
        self.resolve_source(record, &mut fact);
        self.parse_options(record, &mut fact);
        self.split_legacy_driver(&mut fact);

        if let Field::Value(raw) = &record.dump {
            fact.dump = Field::Value(DumpFact::from_raw(raw));
        } else if record.dump.is_null() {
            // Null is not an integer; annotate rather than drop.
            fact.dump = Field::Value(DumpFact::Invalid {
                invalid: serde_json::Value::Null,
            });
        }

        if let Field::Value(raw) = &record.pass {
            fact.fsck = Field::Value(FsckFact::from_raw(raw));
        } else if record.pass.is_null() {
            fact.fsck = Field::Value(FsckFact::Invalid {
                invalid: serde_json::Value::Null,
                enabled: None,
            });
        }

        if record.has_capacity_fields() {
            let processor = CapacityProcessor::from_option(self.formatter.as_deref());
            if let Some(capacity) = processor.compute(record)? {
                fact.capacity = Field::Value(capacity);
            }
        }

        trace!(?fact, "classified record");
        Ok(fact)
    }

    // =========================================================================
    // Rule Pipeline
    // =========================================================================

    /// Rule 1: carry a pre-known class through verbatim.
    fn carry_class(&self, record: &RawRecord, fact: &mut StorageFact) {
        if record.class.is_present() {
            fact.class = record.class.clone();
        }
    }

    /// Rule 2: mount presence decides paging vs. filesystem. Swap entries
    /// are paging and get no mount path; everything else mounted is a
    /// filesystem. Mount presence overrides a carried class.
    fn split_mount(&self, record: &RawRecord, fact: &mut StorageFact) {
        if !record.mount.is_present() {
            return;
        }
        let is_swap = record
            .driver
            .value()
            .is_some_and(|d| d.eq_ignore_ascii_case("swap"));
        if is_swap {
            fact.class = Field::Value(StorageClass::Paging);
        } else {
            fact.mount = record.mount.clone();
            fact.class = Field::Value(StorageClass::Filesystem);
        }
    }

    /// Rule 3: lowercase and classify the raw driver. FUSE spellings
    /// (`fuseblk`, `fuse.` prefix, `-fuse` suffix, or a table entry with a
    /// FUSE hint) become structured descriptors; the rest stay flat. An
    /// explicitly null driver stays explicitly null.
    fn resolve_driver(&self, record: &RawRecord, fact: &mut StorageFact) {
        match &record.driver {
            Field::Value(raw) => {
                let lower = raw.to_lowercase();
                fact.driver = Field::Value(classify_driver_name(&lower));
            }
            Field::Null => fact.driver = Field::Null,
            Field::Unknown => {}
        }
    }

    /// Rule 4: a string source is either definitively null ("-", "none",
    /// or shadowed by an explicit raw driver), promoted to the driver when
    /// it names one, or left unset as ambiguous.
    fn resolve_source(&self, record: &RawRecord, fact: &mut StorageFact) {
        let Some(source) = record.source.value() else {
            return;
        };
        let lower = source.to_lowercase();

        if lower == "-" || lower == "none" || record.driver.is_present() {
            // The device-like value was actually a driver tag (e.g. tmpfs).
            fact.source = Field::Null;
        } else if fact.driver.is_unknown() {
            if drivers::lookup(&lower).is_some() {
                debug!(driver = %lower, "promoted source to driver");
                fact.driver = Field::Value(DriverFact::flat(lower));
            } else if lower == "shm" {
                // POSIX shared-memory mounts are tmpfs-backed.
                fact.driver = Field::Value(DriverFact::flat("tmpfs"));
            }
            // Anything else is ambiguous: no source key is emitted.
        }
    }

    /// Rule 5: parse option tokens into an ordered map. A `subtype=` option
    /// on a FUSE driver names the real backend and moves into the driver
    /// descriptor instead of the map.
    fn parse_options(&self, record: &RawRecord, fact: &mut StorageFact) {
        let Some(RawOptions::List(tokens)) = record.options.value() else {
            // A plain string is unparsed input; skip it for this record.
            return;
        };

        let mut options = OptionsMap::new();
        for token in tokens {
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (token.as_str(), None),
            };

            if key == "subtype" {
                // A generic FUSE-framework driver (flat "fuse" and friends)
                // is upgraded to a descriptor by its subtype option; the
                // subtype names the real backend.
                if is_generic_fuse(&fact.driver) {
                    fact.driver = Field::Value(DriverFact::Fuse {
                        fuse: FuseDriver::default(),
                    });
                }
                if let Field::Value(driver) = &mut fact.driver {
                    if let Some(fuse) = driver.as_fuse_mut() {
                        fuse.subtype = match value {
                            Some(v) => Field::Value(v.to_string()),
                            None => Field::Null,
                        };
                        continue;
                    }
                }
            }

            options.insert(
                key.to_string(),
                match value {
                    Some(v) => OptionValue::Text(v.to_string()),
                    None => OptionValue::Flag(true),
                },
            );
        }
        fact.options = Field::Value(options);
    }

    /// Rule 6: a flat driver still containing commas is a legacy fstab
    /// multi-type field; split it after all other shaping is done.
    fn split_legacy_driver(&self, fact: &mut StorageFact) {
        if let Field::Value(DriverFact::Flat(name)) = &fact.driver {
            if name.contains(',') {
                let candidates = name.split(',').map(str::to_string).collect();
                fact.driver = Field::Value(DriverFact::Multi(candidates));
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::without_formatter()
    }
}

/// True for a flat driver naming the FUSE framework itself (`fuse`,
/// `macfuse`, ...), which a `subtype=` option refines into a descriptor.
fn is_generic_fuse(driver: &Field<DriverFact>) -> bool {
    matches!(
        driver.value(),
        Some(DriverFact::Flat(name))
            if drivers::lookup(name).and_then(|e| e.kind) == Some(drivers::DriverKind::Fuse)
    )
}

/// Shape a lowercased driver name into its canonical fact form.
fn classify_driver_name(lower: &str) -> DriverFact {
    if lower == "fuseblk" {
        return DriverFact::Fuse {
            fuse: FuseDriver::block_backed(),
        };
    }

    let table_fuse = drivers::lookup(lower).is_some_and(|e| e.is_fuse_backed());
    if lower.starts_with("fuse.") || lower.ends_with("-fuse") || table_fuse {
        let stripped = lower.strip_prefix("fuse.").unwrap_or(lower);
        let stripped = stripped.strip_suffix("-fuse").unwrap_or(stripped);
        return DriverFact::Fuse {
            fuse: FuseDriver::with_subtype(stripped),
        };
    }

    DriverFact::Flat(lower.to_string())
}
