use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::Error};
use serde_json::{Map, Value};

/// The message the API puts under `error` when it rejects a request.
pub(crate) fn get_error(extra: &Map<String, Value>) -> Option<&str> {
    extra.get("error").and_then(Value::as_str)
}

/// Reads a number the API may send as a JSON number or a numeric string.
/// `null` and `""` read as `None`.
pub(crate) fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n.to_string().parse().map(Some).map_err(D::Error::custom),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Reads a flag sent as a bool, `0`/`1`, or the string forms of either.
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::Number(n) => Ok(Some(n.as_f64().is_some_and(|v| v != 0.0))),
        Value::String(s) => match s.trim() {
            "" => Ok(None),
            "0" | "false" => Ok(Some(false)),
            "1" | "true" => Ok(Some(true)),
            other => Err(D::Error::custom(format!("expected a flag, got {other:?}"))),
        },
        other => Err(D::Error::custom(format!("expected a flag, got {other}"))),
    }
}

/// PHP encodes an empty associative array as `[]`, so an object keyed by id
/// may arrive as a list. Lists are keyed by position, `null` reads as `None`.
pub(crate) fn keyed_map<'de, D, T>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, serde_json::from_value(v).map_err(D::Error::custom)?)))
            .collect::<Result<_, _>>()
            .map(Some),
        Value::Array(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                Ok((
                    i.to_string(),
                    serde_json::from_value(v).map_err(D::Error::custom)?,
                ))
            })
            .collect::<Result<_, _>>()
            .map(Some),
        other => Err(D::Error::custom(format!("expected an object, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    #[derive(Deserialize, Debug, Default)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "super::lenient_number")]
        count: Option<u32>,
        #[serde(deserialize_with = "super::lenient_number")]
        ratio: Option<f64>,
        #[serde(deserialize_with = "super::lenient_flag")]
        flag: Option<bool>,
        #[serde(deserialize_with = "super::keyed_map")]
        items: Option<BTreeMap<String, u32>>,
    }

    #[test]
    fn numbers_from_strings_and_numbers() {
        let sample: Sample = serde_json::from_str(r#"{"count":"42","ratio":1.5}"#).unwrap();
        assert_eq!(sample.count, Some(42));
        assert_eq!(sample.ratio, Some(1.5));

        let sample: Sample = serde_json::from_str(r#"{"count":7,"ratio":" 2.25 "}"#).unwrap();
        assert_eq!(sample.count, Some(7));
        assert_eq!(sample.ratio, Some(2.25));
    }

    #[test]
    fn missing_null_and_empty_are_absent() {
        let sample: Sample = serde_json::from_str(r#"{"count":null,"ratio":""}"#).unwrap();
        assert!(sample.count.is_none());
        assert!(sample.ratio.is_none());
        assert!(sample.flag.is_none());
        assert!(sample.items.is_none());
    }

    #[test]
    fn garbage_number_is_an_error() {
        assert!(serde_json::from_str::<Sample>(r#"{"count":"many"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"count":[1]}"#).is_err());
    }

    #[test]
    fn flags() {
        for (json, expected) in [
            (r#"{"flag":true}"#, Some(true)),
            (r#"{"flag":0}"#, Some(false)),
            (r#"{"flag":"1"}"#, Some(true)),
            (r#"{"flag":"false"}"#, Some(false)),
            (r#"{"flag":""}"#, None),
        ] {
            let sample: Sample = serde_json::from_str(json).unwrap();
            assert_eq!(sample.flag, expected, "{json}");
        }
        assert!(serde_json::from_str::<Sample>(r#"{"flag":"maybe"}"#).is_err());
    }

    #[test]
    fn keyed_map_accepts_object_and_list() {
        let sample: Sample = serde_json::from_str(r#"{"items":{"10":1,"11":2}}"#).unwrap();
        assert_eq!(sample.items.unwrap().get("11"), Some(&2));

        let sample: Sample = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(sample.items.unwrap().is_empty());

        let sample: Sample = serde_json::from_str(r#"{"items":[5,6]}"#).unwrap();
        assert_eq!(sample.items.unwrap().get("1"), Some(&6));

        let sample: Sample = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(sample.items.is_none());
    }

    #[test]
    fn error_key() {
        let extra: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"error":"Invalid API key","code":401}"#).unwrap();
        assert_eq!(super::get_error(&extra), Some("Invalid API key"));
        assert_eq!(super::get_error(&serde_json::Map::new()), None);
    }
}
