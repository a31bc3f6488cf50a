//! Pagination state and list query encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::traits::QueryPairs;

/// Maximum pages a single iteration will fetch (safety limit).
pub const MAX_PAGES: u32 = 1000;

/// Filter predicates sent as `q[<key>]=<value>`, in insertion order.
pub type Filters = Map<String, Value>;

/// Pagination state of a [`ResourceIndex`](crate::ResourceIndex).
///
/// Before the first fetch only `current` (and `per`, if chosen) are known.
/// Each fetch replaces the state with the server's `pagination` object;
/// a `current` or `per` the server leaves out keeps the requested value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed).
    #[serde(default = "first_page")]
    pub current: u32,
    /// Number of items per page; the server default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<u32>,
    /// Number of the last page, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    /// Total number of items across all pages, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: first_page(),
            per: None,
            last: None,
            count: None,
        }
    }
}

impl Pagination {
    /// Whether a page after `current` is known to exist.
    pub fn has_next(&self) -> bool {
        matches!(self.last, Some(last) if self.current < last)
    }

    /// Keep the requested page and size, forget what the server reported.
    pub(crate) fn unfetched(&self) -> Self {
        Self {
            current: self.current,
            per: self.per,
            last: None,
            count: None,
        }
    }
}

/// Build the list query: `per`, `page`, then one pair per filter value.
///
/// Null values, empty strings and empty arrays are left out. Arrays become
/// repeated `q[key][]` pairs and objects nest as `q[key][sub]`.
pub(crate) fn list_query(pagination: &Pagination, filters: &Filters) -> QueryPairs {
    let mut pairs = QueryPairs::new();

    if let Some(per) = pagination.per {
        pairs.push(("per".to_string(), per.to_string()));
    }
    pairs.push(("page".to_string(), pagination.current.to_string()));

    for (key, value) in filters {
        push_filter(&mut pairs, format!("q[{key}]"), value);
    }

    pairs
}

fn push_filter(pairs: &mut QueryPairs, name: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        Value::String(s) => pairs.push((name, s.clone())),
        Value::Bool(_) | Value::Number(_) => pairs.push((name, value.to_string())),
        Value::Array(items) => {
            for item in items {
                push_filter(pairs, format!("{name}[]"), item);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                push_filter(pairs, format!("{name}[{key}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(query: &QueryPairs) -> Vec<(&str, &str)> {
        query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_default_starts_on_first_page() {
        let pagination = Pagination::default();
        assert_eq!(pagination.current, 1);
        assert_eq!(pagination.per, None);
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_has_next() {
        let mut pagination: Pagination =
            serde_json::from_value(json!({ "current": 1, "per": 1, "last": 2, "count": 2 })).unwrap();
        assert!(pagination.has_next());

        pagination.current = 2;
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_unfetched_forgets_server_state() {
        let pagination = Pagination {
            current: 3,
            per: Some(10),
            last: Some(5),
            count: Some(42),
        };
        let fresh = pagination.unfetched();
        assert_eq!(fresh.current, 3);
        assert_eq!(fresh.per, Some(10));
        assert_eq!(fresh.last, None);
        assert_eq!(fresh.count, None);
    }

    #[test]
    fn test_list_query_without_per() {
        let query = list_query(&Pagination::default(), &Filters::new());
        assert_eq!(pairs(&query), vec![("page", "1")]);
    }

    #[test]
    fn test_list_query_encodes_filters() {
        let pagination = Pagination {
            current: 2,
            per: Some(50),
            ..Default::default()
        };
        let filters = json!({
            "name_eq": "Rocky",
            "character_id_eq": 12,
            "archived_eq": false,
            "id_in": [1, 2]
        });

        let query = list_query(&pagination, filters.as_object().unwrap());

        assert_eq!(
            pairs(&query),
            vec![
                ("per", "50"),
                ("page", "2"),
                ("q[name_eq]", "Rocky"),
                ("q[character_id_eq]", "12"),
                ("q[archived_eq]", "false"),
                ("q[id_in][]", "1"),
                ("q[id_in][]", "2"),
            ]
        );
    }

    #[test]
    fn test_list_query_omits_empty_values() {
        let filters = json!({
            "name_eq": "",
            "scene_id_eq": null,
            "id_in": [],
            "kept_eq": "yes"
        });

        let query = list_query(&Pagination::default(), filters.as_object().unwrap());

        assert_eq!(pairs(&query), vec![("page", "1"), ("q[kept_eq]", "yes")]);
    }

    #[test]
    fn test_list_query_nests_objects() {
        let filters = json!({ "g": { "name_cont": "ro" } });
        let query = list_query(&Pagination::default(), filters.as_object().unwrap());
        assert_eq!(pairs(&query), vec![("page", "1"), ("q[g][name_cont]", "ro")]);
    }
}
