//! HTTP request handlers for the mock server.
//!
//! Responses use the API envelope: `{ "result": ... }` for single resources,
//! `{ "result": [...], "pagination": {...} }` for lists.

pub mod projects;
pub mod resources;

pub use projects::*;
pub use resources::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::mock_server::state::{MockState, Record};
use crate::{
    Character, DictionaryEntry, Line, LineTag, ResourceKind, Scene, SynthesisExport, Take,
    TakeBatch,
};

/// Page size used when a list request has no `per`.
pub const DEFAULT_PER: u32 = 25;

/// Query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per: Option<u32>,
    #[serde(default)]
    pub q: Map<String, Value>,
}

impl ListQuery {
    /// Parse a raw query string such as `page=2&q%5Bname_eq%5D=Rocky`.
    ///
    /// Brackets may arrive percent-encoded, so parsing is not strict.
    pub fn parse(raw: Option<&str>) -> Result<Self, Response> {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Ok(Self::default());
        };
        serde_qs::Config::new(5, false)
            .deserialize_str(raw)
            .map_err(|e| error(StatusCode::BAD_REQUEST, &format!("Invalid query: {e}")))
    }
}

/// Snake-case body key for a child resource path, `None` for unknown paths.
pub fn resource_key(path: &str) -> Option<String> {
    let kinds: [(&str, fn() -> String); 8] = [
        (Character::PATH, Character::resource_name),
        (Take::PATH, Take::resource_name),
        (Line::PATH, Line::resource_name),
        (Scene::PATH, Scene::resource_name),
        (TakeBatch::PATH, TakeBatch::resource_name),
        (LineTag::PATH, LineTag::resource_name),
        (DictionaryEntry::PATH, DictionaryEntry::resource_name),
        (SynthesisExport::PATH, SynthesisExport::resource_name),
    ];
    kinds
        .iter()
        .find(|(kind_path, _)| *kind_path == path)
        .map(|(_, name)| name())
}

/// Reject the request when a token is required and not presented.
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(token) = &state.required_token else {
        return Ok(());
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if presented == Some(token.as_str()) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid or missing API token"))
    }
}

/// Pull `body[key]` out as a record; 422 when absent or not an object.
pub fn payload(body: Value, key: &str) -> Result<Record, Response> {
    match body {
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Object(record)) => Ok(record),
            _ => Err(error(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("param is missing or the value is empty: {key}"),
            )),
        },
        _ => Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "request body must be a JSON object",
        )),
    }
}

/// `{ "result": record }` with the given status.
pub fn single(status: StatusCode, record: &Record) -> Response {
    (status, Json(json!({ "result": record }))).into_response()
}

/// Filter, then slice one page out of `items`.
pub fn page_of(items: Vec<&Record>, query: &ListQuery) -> Response {
    let matching: Vec<&Record> = items
        .into_iter()
        .filter(|record| matches(record, &query.q))
        .collect();

    let per = query.per.filter(|p| *p > 0).unwrap_or(DEFAULT_PER) as usize;
    let current = query.page.unwrap_or(1).max(1) as usize;
    let count = matching.len();
    let last = count.div_ceil(per).max(1);

    let result: Vec<&Record> = matching
        .into_iter()
        .skip((current - 1) * per)
        .take(per)
        .collect();

    Json(json!({
        "result": result,
        "pagination": {
            "current": current,
            "per": per,
            "last": last,
            "count": count,
        }
    }))
    .into_response()
}

/// Whether a record satisfies every `<attr>_eq` / `<attr>_cont` predicate.
///
/// Other predicates are accepted and ignored.
pub fn matches(record: &Record, filters: &Map<String, Value>) -> bool {
    filters.iter().all(|(key, expected)| {
        let expected = text(expected);
        if let Some(attr) = key.strip_suffix("_eq") {
            record.get(attr).map(text).as_deref() == Some(expected.as_str())
        } else if let Some(attr) = key.strip_suffix("_cont") {
            record
                .get(attr)
                .map(|v| text(v).to_lowercase().contains(&expected.to_lowercase()))
                .unwrap_or(false)
        } else {
            true
        }
    })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JSON error body with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_resource_key() {
        assert_eq!(resource_key("characters").as_deref(), Some("character"));
        assert_eq!(resource_key("take_batches").as_deref(), Some("take_batch"));
        assert_eq!(
            resource_key("dictionary_entries").as_deref(),
            Some("dictionary_entry")
        );
        assert_eq!(resource_key("unicorns"), None);
    }

    #[test]
    fn test_parse_encoded_filters() {
        let query =
            ListQuery::parse(Some("page=2&per=10&q%5Bname_eq%5D=Rocky")).unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per, Some(10));
        assert_eq!(query.q["name_eq"], "Rocky");
    }

    #[test]
    fn test_matches_eq_and_cont() {
        let rocky = record(json!({ "id": 1, "name": "Rocky Balboa" }));

        let eq: Map<String, Value> = record(json!({ "id_eq": "1" }));
        assert!(matches(&rocky, &eq));

        let cont = record(json!({ "name_cont": "balboa" }));
        assert!(matches(&rocky, &cont));

        let miss = record(json!({ "name_eq": "Adrian" }));
        assert!(!matches(&rocky, &miss));
    }

    #[test]
    fn test_payload_requires_key() {
        assert!(payload(json!({ "character": { "name": "X" } }), "character").is_ok());
        assert!(payload(json!({ "name": "X" }), "character").is_err());
    }
}
