//! Small serde helpers shared by the create/patch input types.

use serde::{Deserialize, Deserializer, de};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Distinguishes an explicit `null` from an absent key in patch bodies.
///
/// Use together with `#[serde(default)]`: absent → `None`, `null` →
/// `Some(None)`, value → `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// [`double_option`] for RFC 3339 timestamps.
pub fn double_option_rfc3339<'de, D>(
    deserializer: D,
) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Some)
}

/// Trims and drops empty strings, so `?operator=` behaves like no filter at all.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Typed query-string filter where a blank value means "no filter".
///
/// Use with `#[serde(default)]`: `?status=` and a missing key both give `None`.
pub fn empty_as_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: fmt::Display,
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match non_empty(value.as_deref()) {
        Some(v) => v.parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option_rfc3339")]
        at: Option<Option<OffsetDateTime>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);
        assert_eq!(absent.at, None);

        let null: Patch = serde_json::from_str(r#"{"notes":null,"at":null}"#).unwrap();
        assert_eq!(null.notes, Some(None));
        assert_eq!(null.at, Some(None));

        let set: Patch =
            serde_json::from_str(r#"{"notes":"hi","at":"2025-03-01T12:00:00Z"}"#).unwrap();
        assert_eq!(set.notes, Some(Some("hi".to_string())));
        assert_eq!(
            set.at,
            Some(Some(time::macros::datetime!(2025-03-01 12:00 UTC)))
        );
    }

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "empty_as_none")]
        operation_id: Option<i32>,
    }

    #[test]
    fn blank_typed_filters_are_absent() {
        let blank: Filter = serde_json::from_str(r#"{"operation_id":""}"#).unwrap();
        assert_eq!(blank.operation_id, None);
        let missing: Filter = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.operation_id, None);
        let set: Filter = serde_json::from_str(r#"{"operation_id":" 12 "}"#).unwrap();
        assert_eq!(set.operation_id, Some(12));
        assert!(serde_json::from_str::<Filter>(r#"{"operation_id":"twelve"}"#).is_err());
    }

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" TIM ")), Some("TIM"));
    }
}
