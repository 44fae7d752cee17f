//! Lenient number fields for the tournament document.
//!
//! The admin and entry pages post numbers as typed, so a handicap may arrive
//! as `"12"` and a blank hole as `""`. Numeric strings are read as numbers;
//! anything else reads as missing and is coerced by the caller.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A JSON number or numeric string; `None` for anything else.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number))
}

pub fn de_number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_number(deserializer)?.unwrap_or(0.0))
}

/// A list of lenient numbers; `null` reads as no list.
pub fn de_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| values.iter().map(number).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(number(&json!(12)), Some(12.0));
        assert_eq!(number(&json!(9.6)), Some(9.6));
        assert_eq!(number(&json!(" 12 ")), Some(12.0));
        assert_eq!(number(&json!("")), None);
        assert_eq!(number(&json!("abc")), None);
        assert_eq!(number(&json!("inf")), None);
        assert_eq!(number(&json!(null)), None);
        assert_eq!(number(&json!(true)), None);
    }

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "de_number")]
        handicap: Option<f64>,
        #[serde(default, deserialize_with = "de_number_or_zero")]
        weight: f64,
        #[serde(default, deserialize_with = "de_numbers")]
        holes: Option<Vec<Option<f64>>>,
    }

    #[test]
    fn test_fields_never_fail_on_bad_numbers() {
        let f: Fields = serde_json::from_str(r#"{"handicap":"x","weight":"0.5","holes":[4,"5",null,{}]}"#).unwrap();
        assert_eq!(f.handicap, None);
        assert_eq!(f.weight, 0.5);
        assert_eq!(f.holes, Some(vec![Some(4.0), Some(5.0), None, None]));

        let f: Fields = serde_json::from_str("{}").unwrap();
        assert_eq!(f.handicap, None);
        assert_eq!(f.weight, 0.0);
        assert_eq!(f.holes, None);
    }
}
