//! Capacity Processor
//!
//! Converts raw total/used capacity fields (optionally block-count based)
//! into byte-formatted values via the injected byte formatter and computes
//! a used percentage. Capacity data without a formatter wired in is a
//! configuration error, never a silent omission.

use crate::capacity::format::ByteFormatter;
use crate::error::{Error, Result};
use crate::model::{
    ByteValue, CapacityFact, Field, RawBlockSize, RawCapacity, RawRecord, UsedCapacity,
};
use tracing::debug;

/// Capacity conversion over one raw record.
pub struct CapacityProcessor<'f> {
    formatter: Option<&'f dyn ByteFormatter>,
}

impl<'f> CapacityProcessor<'f> {
    /// Processor backed by a byte formatter.
    pub fn new(formatter: &'f dyn ByteFormatter) -> Self {
        CapacityProcessor {
            formatter: Some(formatter),
        }
    }

    /// Processor with no formatter available. Any capacity computation
    /// through it fails with a configuration error.
    pub fn unavailable() -> Self {
        CapacityProcessor { formatter: None }
    }

    pub(crate) fn from_option(formatter: Option<&'f dyn ByteFormatter>) -> Self {
        CapacityProcessor { formatter }
    }

    /// Compute structured capacity for a record carrying capacity fields.
    ///
    /// Returns `Ok(None)` when nothing resolved (e.g. both fields were
    /// explicit nulls); the caller attaches nothing in that case.
    pub fn compute(&self, record: &RawRecord) -> Result<Option<CapacityFact>> {
        let formatter = self.formatter.ok_or_else(|| {
            Error::Configuration(
                "a byte formatter is required for processing capacities".into(),
            )
        })?;

        let block_size = self.resolve_block_size(record, formatter)?;
        debug!(block_size, "processing capacity fields");

        let total = self.resolve_bytes(&record.total, block_size, formatter)?;
        let used = self.resolve_bytes(&record.used, block_size, formatter)?;

        let mut capacity = CapacityFact {
            total,
            used: used.map(UsedCapacity::from),
        };

        // Percent only when both sides resolved. A zero total leaves the
        // division undefined, so the percent is omitted rather than NaN.
        if let (Some(total), Some(used)) = (&capacity.total, &mut capacity.used) {
            if total.bytes > 0 {
                let percent = used.bytes as f64 / total.bytes as f64 * 100.0;
                used.percent = Some((percent * 100.0).round() / 100.0);
            }
        }

        Ok(if capacity.is_empty() {
            None
        } else {
            Some(capacity)
        })
    }

    /// Block-count multiplier: defaults to 1 when absent, null, or zero; a
    /// unit-bearing string goes through the formatter.
    fn resolve_block_size(
        &self,
        record: &RawRecord,
        formatter: &dyn ByteFormatter,
    ) -> Result<u64> {
        Ok(match &record.block_size {
            Field::Value(RawBlockSize::Bytes(n)) if *n > 0 => *n,
            Field::Value(RawBlockSize::Sized(s)) => formatter.si(s, true)?.bytes,
            _ => 1,
        })
    }

    /// One side of the capacity pair: blocks are multiplied out into a
    /// byte-suffixed quantity, strings already carry their units.
    fn resolve_bytes(
        &self,
        raw: &Field<RawCapacity>,
        block_size: u64,
        formatter: &dyn ByteFormatter,
    ) -> Result<Option<ByteValue>> {
        let quantity = match raw {
            Field::Unknown | Field::Null => return Ok(None),
            Field::Value(RawCapacity::Blocks(blocks)) => {
                format!("{}B", *blocks as i128 * block_size as i128)
            }
            Field::Value(RawCapacity::Sized(s)) => s.clone(),
        };
        formatter.si(&quantity, true).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::format::PlainBinaryFormatter;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_block_counts_multiply_out() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({
                "total": 100,
                "used": 50,
                "block_size": 1024,
            })))
            .unwrap()
            .unwrap();

        assert_eq!(capacity.total.as_ref().unwrap().bytes, 102400);
        let used = capacity.used.unwrap();
        assert_eq!(used.bytes, 51200);
        assert_eq!(used.percent, Some(50.0));
    }

    #[test]
    fn test_sized_strings_pass_through() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": "10G", "used": "5G"})))
            .unwrap()
            .unwrap();

        assert_eq!(capacity.total.as_ref().unwrap().bytes, 10 * 1024u64.pow(3));
        assert_eq!(capacity.used.as_ref().unwrap().percent, Some(50.0));
    }

    #[test]
    fn test_percent_rounds_to_two_places() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": 3, "used": 1})))
            .unwrap()
            .unwrap();
        assert_eq!(capacity.used.unwrap().percent, Some(33.33));
    }

    #[test]
    fn test_missing_block_size_defaults_to_one() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": 4096})))
            .unwrap()
            .unwrap();
        assert_eq!(capacity.total.unwrap().bytes, 4096);
        assert!(capacity.used.is_none());
    }

    #[test]
    fn test_zero_block_size_defaults_to_one() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": 4096, "block_size": 0})))
            .unwrap()
            .unwrap();
        assert_eq!(capacity.total.unwrap().bytes, 4096);
    }

    #[test]
    fn test_string_block_size_goes_through_formatter() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": 10, "block_size": "1K"})))
            .unwrap()
            .unwrap();
        assert_eq!(capacity.total.unwrap().bytes, 10240);
    }

    #[test]
    fn test_zero_total_omits_percent() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": 0, "used": 50})))
            .unwrap()
            .unwrap();
        assert_eq!(capacity.total.as_ref().unwrap().bytes, 0);
        assert_eq!(capacity.used.unwrap().percent, None);
    }

    #[test]
    fn test_partial_capacity_has_no_percent() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"used": 50, "total": null})))
            .unwrap()
            .unwrap();
        assert!(capacity.total.is_none());
        assert_eq!(capacity.used.unwrap().percent, None);
    }

    #[test]
    fn test_both_null_resolves_to_nothing() {
        let processor = CapacityProcessor::new(&PlainBinaryFormatter);
        let capacity = processor
            .compute(&record(json!({"total": null, "used": null})))
            .unwrap();
        assert!(capacity.is_none());
    }

    #[test]
    fn test_missing_formatter_is_a_configuration_error() {
        let processor = CapacityProcessor::unavailable();
        assert_matches!(
            processor.compute(&record(json!({"total": 100}))),
            Err(Error::Configuration(_))
        );
    }
}
