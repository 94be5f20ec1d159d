//! Serde helpers for floats that may be NaN or infinite
//!
//! JSON has no literal for non-finite numbers and `serde_json` writes them as
//! `null`. These helpers write finite values as numbers and the rest as the
//! strings `"NaN"`, `"inf"` and `"-inf"`, and read either form back.
//!
//! Use with `#[serde(with = "crate::utils::float")]`.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.collect_str(value)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Text(text) => text.parse().map_err(|_| {
            serde::de::Error::custom(format!("expected a number, NaN or inf, found '{}'", text))
        }),
    }
}

/// `serialize_with` form for `Option<f64>` fields
pub fn serialize_option<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "crate::utils::float")]
        value: f64,
    }

    fn round_trip(value: f64) -> (String, f64) {
        let json = serde_json::to_string(&Sample { value }).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        (json, back.value)
    }

    #[test]
    fn test_finite_values_stay_numbers() {
        assert_eq!(round_trip(1.25), (r#"{"value":1.25}"#.to_string(), 1.25));
        assert_eq!(round_trip(-3.0).1, -3.0);
    }

    #[test]
    fn test_non_finite_values_become_text() {
        let (json, back) = round_trip(f64::NAN);
        assert_eq!(json, r#"{"value":"NaN"}"#);
        assert!(back.is_nan());

        assert_eq!(
            round_trip(f64::INFINITY),
            (r#"{"value":"inf"}"#.to_string(), f64::INFINITY)
        );
        assert_eq!(
            round_trip(f64::NEG_INFINITY),
            (r#"{"value":"-inf"}"#.to_string(), f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_integers_and_bad_text() {
        let sample: Sample = serde_json::from_str(r#"{"value":5}"#).unwrap();
        assert_eq!(sample.value, 5.0);

        assert!(serde_json::from_str::<Sample>(r#"{"value":"left"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"value":null}"#).is_err());
    }
}
