//! Dynamic attribute bag shared by every resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered map of attribute name to JSON value.
///
/// Resources keep whatever attributes the API returns here instead of in
/// fixed struct fields, so new server-side fields show up without a client
/// release. Typed accessors on concrete resources delegate to this map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string value by key.
    ///
    /// Returns `None` if the key is missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Get an integer value by key.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Get a boolean value by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Get an RFC 3339 timestamp by key.
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_str(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Whether the key is present. A key set to `null` is present.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Merge another map into this one; incoming values win.
    pub fn merge(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.0.insert(key, value);
        }
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Attribute names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_every_key() {
        let source = json!({
            "id": 42,
            "name": "Rocky",
            "score": 1.5,
            "active": true,
            "notes": null,
            "tags": ["a", "b"],
            "voice": { "pitch": 3 }
        });
        let map = source.as_object().unwrap().clone();
        let attributes = Attributes::from(map.clone());

        for (key, value) in &map {
            assert_eq!(attributes.get(key), Some(value), "key {key}");
        }
        assert_eq!(attributes.len(), map.len());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let attributes: Attributes = [("zeta", 1), ("alpha", 2), ("mid", 3)].into_iter().collect();
        let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_merge_overwrites_and_keeps_local_keys() {
        let mut attributes: Attributes = [("name", json!("Old")), ("local", json!(1))]
            .into_iter()
            .collect();
        let incoming = json!({ "id": 7, "name": "New" }).as_object().unwrap().clone();

        attributes.merge(incoming);

        assert_eq!(attributes.get_str("name"), Some("New"));
        assert_eq!(attributes.get_i64("id"), Some(7));
        assert_eq!(attributes.get_i64("local"), Some(1));
    }

    #[test]
    fn test_has_distinguishes_null_from_missing() {
        let mut attributes = Attributes::new();
        attributes.set("notes", Value::Null);
        assert!(attributes.has("notes"));
        assert!(!attributes.has("name"));
        assert_eq!(attributes.get_str("notes"), None);
    }

    #[test]
    fn test_typed_getters() {
        let attributes: Attributes = [
            ("created_at", json!("2024-03-01T10:00:00Z")),
            ("done", json!(false)),
            ("bad_date", json!("yesterday")),
        ]
        .into_iter()
        .collect();

        let created = attributes.get_datetime("created_at").unwrap();
        assert_eq!(created.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(attributes.get_bool("done"), Some(false));
        assert_eq!(attributes.get_datetime("bad_date"), None);
    }
}
