//! Byte Formatter Collaborator
//!
//! Capacity conversion depends on an external byte formatter that turns a
//! unit-bearing quantity string (e.g. "4096B", "10G") into bytes plus a
//! human-readable rendering. The engine never implements this itself; it is
//! injected, and its absence is a configuration error the moment capacity
//! data is encountered.

use crate::error::Result;
use crate::model::ByteValue;

/// External byte-formatting service.
///
/// `binary` selects 1024-based units; the engine always requests binary
/// semantics. Implementations should fail with
/// [`Error::CapacityParse`](crate::Error::CapacityParse) on values they
/// cannot interpret.
pub trait ByteFormatter {
    /// Convert a quantity string into `{bytes, pretty}` form.
    fn si(&self, value: &str, binary: bool) -> Result<ByteValue>;
}

/// Minimal in-crate formatter for tests and benches. Understands plain
/// integer quantities with a single binary unit suffix.
#[doc(hidden)]
pub struct PlainBinaryFormatter;

impl PlainBinaryFormatter {
    fn multiplier(unit: &str, binary: bool) -> Option<u64> {
        let base: u64 = if binary { 1024 } else { 1000 };
        let power = match unit {
            "" | "B" => 0,
            "K" | "KB" | "KIB" => 1,
            "M" | "MB" | "MIB" => 2,
            "G" | "GB" | "GIB" => 3,
            "T" | "TB" | "TIB" => 4,
            _ => return None,
        };
        Some(base.pow(power))
    }

    fn pretty(bytes: u64) -> String {
        let units = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < units.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{bytes} B")
        } else {
            format!("{:.1} {}", value, units[unit])
        }
    }
}

impl ByteFormatter for PlainBinaryFormatter {
    fn si(&self, value: &str, binary: bool) -> Result<ByteValue> {
        let trimmed = value.trim();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(digits_end);
        let parse_err = |reason: &str| crate::Error::CapacityParse {
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let quantity: u64 = digits.parse().map_err(|_| parse_err("not a number"))?;
        let multiplier = Self::multiplier(&unit.trim().to_uppercase(), binary)
            .ok_or_else(|| parse_err("unknown unit"))?;
        let bytes = quantity
            .checked_mul(multiplier)
            .ok_or_else(|| parse_err("overflow"))?;
        Ok(ByteValue {
            bytes,
            pretty: Self::pretty(bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_plain_bytes() {
        let value = PlainBinaryFormatter.si("4096B", true).unwrap();
        assert_eq!(value.bytes, 4096);
        assert_eq!(value.pretty, "4.0 KiB");
    }

    #[test]
    fn test_binary_units() {
        assert_eq!(PlainBinaryFormatter.si("10G", true).unwrap().bytes, 10 * 1024u64.pow(3));
        assert_eq!(PlainBinaryFormatter.si("1K", true).unwrap().bytes, 1024);
        assert_eq!(PlainBinaryFormatter.si("1K", false).unwrap().bytes, 1000);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_matches!(
            PlainBinaryFormatter.si("-5B", true),
            Err(crate::Error::CapacityParse { .. })
        );
        assert_matches!(
            PlainBinaryFormatter.si("10Q", true),
            Err(crate::Error::CapacityParse { .. })
        );
    }
}
