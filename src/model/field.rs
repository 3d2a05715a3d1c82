//! Tri-State Field
//!
//! Raw records and facts both carry presence-as-semantics: a key that is
//! absent means "unknown or ambiguous", while a key that is present with a
//! null value means "definitively not applicable". Both must survive every
//! transformation step and serialization round, so optional fields are
//! modeled as an explicit tri-state rather than a bare `Option`.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A record field that distinguishes an absent key from an explicit null.
///
/// Serialization contract: `Unknown` must be skipped entirely (pair with
/// `#[serde(skip_serializing_if = "Field::is_unknown")]`), `Null` serializes
/// as JSON null, `Value` serializes as the inner value. Deserialization maps
/// a missing key to `Unknown` (via `#[serde(default)]`) and a null value to
/// `Null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// Key absent: value is unknown or ambiguous.
    Unknown,
    /// Key present with null: value is definitively absent / not applicable.
    Null,
    /// Key present with a concrete value.
    Value(T),
}

impl<T> Field<T> {
    /// True when the key was absent from the record.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    /// True when the key was present with an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// True when the key was present at all (null or concrete).
    pub fn is_present(&self) -> bool {
        !self.is_unknown()
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

// Manual impl: `Unknown` is the default for any T, `Default` or not.
impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unknown
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` maps to `Null`, not `Unknown`: an `Option` in hand means the
    /// key existed somewhere upstream.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Field::Value(v),
            None => Field::Null,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Unknown is normally skipped by the containing struct; if it is
            // serialized anyway (e.g. inside a Vec), emit null.
            Field::Unknown | Field::Null => serializer.serialize_none(),
            Field::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present key deserializes here; a missing key never reaches this
        // point and falls back to `Default` (Unknown) instead.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(default, skip_serializing_if = "Field::is_unknown")]
        source: Field<String>,
    }

    #[test]
    fn test_missing_key_is_unknown() {
        let doc: Doc = serde_json::from_value(json!({})).unwrap();
        assert!(doc.source.is_unknown());
        assert!(!doc.source.is_present());
    }

    #[test]
    fn test_null_key_is_null() {
        let doc: Doc = serde_json::from_value(json!({"source": null})).unwrap();
        assert!(doc.source.is_null());
        assert!(doc.source.is_present());
    }

    #[test]
    fn test_value_round_trips() {
        let doc: Doc = serde_json::from_value(json!({"source": "/dev/sda1"})).unwrap();
        assert_eq!(doc.source.value().map(String::as_str), Some("/dev/sda1"));
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"source": "/dev/sda1"})
        );
    }

    #[test]
    fn test_unknown_is_not_serialized() {
        let doc = Doc {
            source: Field::Unknown,
        };
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({}));
    }

    #[test]
    fn test_null_is_serialized_as_null() {
        let doc = Doc {
            source: Field::Null,
        };
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"source": null}));
    }

    #[test]
    fn test_option_converts_to_present_states() {
        // An Option in hand means the key existed: None is Null, never
        // Unknown.
        assert_eq!(Field::from(Some(7)), Field::Value(7));
        assert_eq!(Field::<i32>::from(None), Field::Null);
    }
}
