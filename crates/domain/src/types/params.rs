//! Request parameter maps
//!
//! A [`ParameterMap`] is the flat key/value payload every API call is built
//! from. Values nest arbitrarily: a value may be a scalar, another map, or a
//! list. Insertion order is preserved because it is the order parameters are
//! written to the wire; signing is order independent.

use serde_json::Value;

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Omitted from the wire, contributes an empty string to signatures.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
    Map(ParameterMap),
}

impl ParamValue {
    /// Stable, locale-independent string form of a scalar.
    ///
    /// Booleans become `1`/`0`, null becomes the empty string and integral
    /// floats drop their fractional part. Returns `None` for lists and maps.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(format_float(*f)),
            Self::Str(s) => Some(s.clone()),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Borrow the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as a nested map.
    pub fn as_map(&self) -> Option<&ParameterMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value carries no data (null, empty string, list or map).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return (value as i64).to_string();
    }
    value.to_string()
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<ParameterMap> for ParamValue {
    fn from(value: ParameterMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Str(n.to_string())
                }
            }
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Map(fields.into_iter().collect()),
        }
    }
}

/// Insertion-ordered map of request parameters.
///
/// Re-inserting an existing key replaces the value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`.
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Merge `other` into `self`; keys from `other` win.
    pub fn merge(&mut self, other: ParameterMap) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for ParameterMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_keeps_first_position_on_replace() {
        let mut map = ParameterMap::new().with("list", "vip").with("format", "php");
        let previous = map.insert("format", "json");
        map.insert("api_key", "key");

        assert_eq!(previous, Some(ParamValue::from("php")));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["list", "format", "api_key"]);
        assert_eq!(map.get_str("format"), Some("json"));
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut map: ParameterMap = vec![("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.remove("b"), Some(ParamValue::Int(2)));
        assert_eq!(map.remove("missing"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn scalar_strings_are_locale_independent() {
        assert_eq!(ParamValue::from(true).scalar_string().as_deref(), Some("1"));
        assert_eq!(ParamValue::from(false).scalar_string().as_deref(), Some("0"));
        assert_eq!(ParamValue::Null.scalar_string().as_deref(), Some(""));
        assert_eq!(ParamValue::from(3.0).scalar_string().as_deref(), Some("3"));
        assert_eq!(ParamValue::from(-2.0).scalar_string().as_deref(), Some("-2"));
        assert_eq!(ParamValue::from(0.1).scalar_string().as_deref(), Some("0.1"));
        assert_eq!(ParamValue::from(12.75).scalar_string().as_deref(), Some("12.75"));
        assert_eq!(ParamValue::from(-42_i64).scalar_string().as_deref(), Some("-42"));
        assert_eq!(ParamValue::from(vec!["a"]).scalar_string(), None);
    }

    #[test]
    fn large_unsigned_values_fall_back_to_strings() {
        assert_eq!(ParamValue::from(7_u64), ParamValue::Int(7));
        assert_eq!(ParamValue::from(u64::MAX), ParamValue::Str(u64::MAX.to_string()));
    }

    #[test]
    fn converts_from_json_values() {
        let value = ParamValue::from(json!({
            "name": "shoes",
            "price": 3000,
            "tags": ["blue", "red"],
            "sale": false,
            "discount": null
        }));

        let map = value.as_map().expect("object becomes a map");
        let mut keys = map.keys().collect::<Vec<_>>();
        keys.sort_unstable();
        assert_eq!(keys, vec!["discount", "name", "price", "sale", "tags"]);
        assert_eq!(map.get("price"), Some(&ParamValue::Int(3000)));
        assert_eq!(
            map.get("tags"),
            Some(&ParamValue::List(vec![ParamValue::from("blue"), ParamValue::from("red")]))
        );
        assert!(map.get("discount").is_some_and(ParamValue::is_null));
    }

    #[test]
    fn with_opt_skips_none() {
        let map = ParameterMap::new()
            .with_opt("date", None::<String>)
            .with_opt("list", Some("vip"));
        assert!(!map.contains_key("date"));
        assert_eq!(map.get_str("list"), Some("vip"));
    }

    #[test]
    fn emptiness() {
        assert!(ParamValue::from("").is_empty());
        assert!(ParamValue::Map(ParameterMap::new()).is_empty());
        assert!(!ParamValue::from(0).is_empty());
        assert!(ParameterMap::new().is_empty());
    }
}
