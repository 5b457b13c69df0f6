//! Lenient integer decoding for model output.
//!
//! JSON has a single number type, so a model may write `42.0` where the
//! contract says integer. Whole floats are accepted; fractional, negative or
//! oversized values are still rejected as data errors.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};

struct WholeVisitor<T>(PhantomData<T>);

impl<T: TryFrom<u64>> Visitor<'_> for WholeVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative whole number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
        if v.is_finite() && v >= 0.0 && v.trunc() == v && v < u64::MAX as f64 {
            self.visit_u64(v as u64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

/// `deserialize_with` target for `u32`/`u64` fields.
pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    deserializer.deserialize_u64(WholeVisitor(PhantomData))
}

struct Whole(u32);

impl<'de> Deserialize<'de> for Whole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Whole)
    }
}

/// `deserialize_with` target for `Vec<u32>` fields.
pub(crate) fn deserialize_vec<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Whole>::deserialize(deserializer)?;
    Ok(items.into_iter().map(|Whole(n)| n).collect())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Scored {
        #[serde(deserialize_with = "super::deserialize")]
        score: u32,
        #[serde(deserialize_with = "super::deserialize_vec")]
        history: Vec<u32>,
    }

    fn parse(json: &str) -> Result<Scored, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn integers_and_whole_floats_are_accepted() {
        let parsed = parse(r#"{"score": 42.0, "history": [7, 5.0, 3]}"#).expect("whole numbers");
        assert_eq!(parsed.score, 42);
        assert_eq!(parsed.history, vec![7, 5, 3]);
    }

    #[test]
    fn fractional_negative_and_oversized_values_are_data_errors() {
        for body in [
            r#"{"score": 42.5, "history": []}"#,
            r#"{"score": -1, "history": []}"#,
            r#"{"score": -1.0, "history": []}"#,
            r#"{"score": 4294967296, "history": []}"#,
            r#"{"score": 1, "history": [2.5]}"#,
        ] {
            let err = parse(body).expect_err(body);
            assert!(err.is_data(), "{body}: {err}");
        }
    }
}
