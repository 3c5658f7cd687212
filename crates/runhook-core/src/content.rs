//! Job payload content and its normalization.
//!
//! The Jobs API accepts payload parameters only as strings or booleans. Numbers
//! are sent as their decimal string, booleans stay booleans (the API tells
//! `true` apart from `"true"`), and anything else is a caller error.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CoreError;

/// Diagnostic path used for the root of a payload.
pub const DEFAULT_CONTENT_PATH: &str = "json";

/// A JSON-like value as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Content {
    /// Absent value. Not accepted by the Jobs API.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer or floating-point number.
    Number(Number),
    /// String literal.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<Content>),
    /// String-keyed map, insertion order preserved.
    Mapping(IndexMap<String, Content>),
    /// Raw bytes. Not accepted by the Jobs API.
    Bytes(Vec<u8>),
    /// Point in time. Not accepted by the Jobs API.
    Timestamp(DateTime<Utc>),
}

impl Content {
    /// Name of this value's type, as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
        }
    }

    /// Normalize this value with the default `json` path.
    pub fn normalize(&self) -> Result<NormalizedContent, CoreError> {
        normalize_content(self)
    }
}

/// Content whose every leaf is a string or a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NormalizedContent {
    Bool(bool),
    String(String),
    Sequence(Vec<NormalizedContent>),
    Mapping(IndexMap<String, NormalizedContent>),
}

/// Normalize `content` using [`DEFAULT_CONTENT_PATH`] as the root path.
pub fn normalize_content(content: &Content) -> Result<NormalizedContent, CoreError> {
    normalize_content_at(content, DEFAULT_CONTENT_PATH)
}

/// Normalize `content` located at `path`.
///
/// Numbers become their decimal string. Sequence elements are reported as
/// `path[i]` and mapping values as `path[key]` when they fail.
pub fn normalize_content_at(content: &Content, path: &str) -> Result<NormalizedContent, CoreError> {
    match content {
        Content::String(s) => Ok(NormalizedContent::String(s.clone())),
        Content::Bool(b) => Ok(NormalizedContent::Bool(*b)),
        Content::Number(n) => Ok(NormalizedContent::String(number_to_string(n))),
        Content::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| normalize_content_at(item, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(NormalizedContent::Sequence),
        Content::Mapping(entries) => entries
            .iter()
            .map(|(key, value)| {
                let normalized = normalize_content_at(value, &format!("{path}[{key}]"))?;
                Ok((key.clone(), normalized))
            })
            .collect::<Result<IndexMap<_, _>, CoreError>>()
            .map(NormalizedContent::Mapping),
        Content::Null | Content::Bytes(_) | Content::Timestamp(_) => Err(CoreError::ContentType {
            type_name: content.type_name().to_string(),
            path: path.to_string(),
        }),
    }
}

/// Decimal form of a number. Float exponents carry a sign and at least two
/// digits (`1e-09`, `1e+20`).
fn number_to_string(n: &Number) -> String {
    let s = n.to_string();
    if !n.is_f64() {
        return s;
    }
    match s.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp.trim_start_matches('+')),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<NormalizedContent> for Content {
    fn from(content: NormalizedContent) -> Self {
        match content {
            NormalizedContent::Bool(b) => Self::Bool(b),
            NormalizedContent::String(s) => Self::String(s),
            NormalizedContent::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            NormalizedContent::Mapping(entries) => {
                Self::Mapping(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Content {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Content {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for Content {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Content {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON number form and become [`Content::Null`].
impl From<f64> for Content {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Self::Null, Self::Number)
    }
}

impl From<DateTime<Utc>> for Content {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Content>> FromIterator<(K, V)> for Content {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string(s: &str) -> NormalizedContent {
        NormalizedContent::String(s.to_string())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(normalize_content(&"a".into()).unwrap(), string("a"));
        assert_eq!(
            normalize_content(&true.into()).unwrap(),
            NormalizedContent::Bool(true)
        );
        assert_eq!(normalize_content(&1.into()).unwrap(), string("1"));
        assert_eq!(normalize_content(&(-17i64).into()).unwrap(), string("-17"));
        assert_eq!(normalize_content(&2.5.into()).unwrap(), string("2.5"));
        assert_eq!(normalize_content(&1.0.into()).unwrap(), string("1.0"));
    }

    #[test]
    fn test_numbers_are_stable_after_one_pass() {
        let numbers: Vec<Content> = vec![
            0.into(),
            42.into(),
            (-3i64).into(),
            u64::MAX.into(),
            0.1.into(),
            (-7.25).into(),
            1e-9.into(),
        ];
        for n in numbers {
            let once = normalize_content(&n).unwrap();
            let twice = normalize_content(&once.clone().into()).unwrap();
            assert_eq!(once, twice);
            assert!(matches!(once, NormalizedContent::String(_)));
        }
    }

    #[test]
    fn test_mixed_sequence() {
        let content = Content::from(json!([1, "a", true]));
        assert_eq!(
            normalize_content(&content).unwrap(),
            NormalizedContent::Sequence(vec![string("1"), string("a"), NormalizedContent::Bool(true)])
        );
    }

    #[test]
    fn test_nested_mapping() {
        let content = Content::from(json!({"x": 2.5, "y": {"z": false}}));
        let normalized = normalize_content(&content).unwrap();
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({"x": "2.5", "y": {"z": false}})
        );
    }

    #[test]
    fn test_mapping_keeps_key_order() {
        let content: Content = [("b", Content::from(1)), ("a", Content::from(2))]
            .into_iter()
            .collect();
        let NormalizedContent::Mapping(entries) = normalize_content(&content).unwrap() else {
            panic!("Expected mapping");
        };
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_string_and_bool_structure_is_unchanged() {
        let content = Content::from(json!({
            "notebook_task": {"notebook_path": "/Users/a/b", "base_parameters": {"flag": true}},
            "libraries": [{"jar": "dbfs:/lib.jar"}, "extra"],
            "enabled": false
        }));
        let normalized = normalize_content(&content).unwrap();
        assert_eq!(Content::from(normalized.clone()), content);
        assert_eq!(normalize_content(&normalized.into()).unwrap(), normalize_content(&content).unwrap());
    }

    #[test]
    fn test_unsupported_leaf_reports_path() {
        let content: Content = [(
            "a",
            Content::Sequence(vec![1.into(), Content::from(Utc::now())]),
        )]
        .into_iter()
        .collect();

        let err = normalize_content(&content).unwrap_err();
        match err {
            CoreError::ContentType { type_name, path } => {
                assert_eq!(type_name, "timestamp");
                assert_eq!(path, "json[a][1]");
            }
            other => panic!("Expected ContentType, got {other:?}"),
        }
    }

    #[test]
    fn test_null_is_rejected_at_custom_path() {
        let err = normalize_content_at(&Content::from(json!({"k": null})), "notebook_params")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type `null` used for parameter notebook_params[k] is not a number or a string"
        );
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let content = Content::from(f64::NAN);
        assert_eq!(content, Content::Null);
        assert!(normalize_content(&content).is_err());
    }

    #[test]
    fn test_bytes_are_rejected() {
        let content = Content::Sequence(vec!["ok".into(), Content::Bytes(vec![0, 1])]);
        let err = normalize_content(&content).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ContentType { ref type_name, ref path } if type_name == "bytes" && path == "json[1]"
        ));
    }

    #[test]
    fn test_float_exponents_are_padded() {
        assert_eq!(normalize_content(&1e-9.into()).unwrap(), string("1e-09"));
        assert_eq!(normalize_content(&1e20.into()).unwrap(), string("1e+20"));
        assert_eq!(normalize_content(&1.5e300.into()).unwrap(), string("1.5e+300"));
        assert_eq!(normalize_content(&0.001.into()).unwrap(), string("0.001"));
    }

    #[test]
    fn test_decoded_mapping_keeps_key_order() {
        let content: Content =
            serde_json::from_str(r#"{"b": 1, "a": 2, "c": {"z": 3, "y": true}}"#).unwrap();
        let normalized = normalize_content(&content).unwrap();
        assert_eq!(
            serde_json::to_string(&normalized).unwrap(),
            r#"{"b":"1","a":"2","c":{"z":"3","y":true}}"#
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let content: Content = serde_json::from_str(r#"{"n": 3, "s": "x"}"#).unwrap();
        assert_eq!(
            serde_json::to_value(content.normalize().unwrap()).unwrap(),
            json!({"n": "3", "s": "x"})
        );
    }
}
