//! Transport trait for issuing API requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Query string as ordered `(key, value)` pairs.
///
/// Keys may repeat (e.g. `q[id_in][]`), so this is a list rather than a map.
pub type QueryPairs = Vec<(String, String)>;

/// Issue requests against the Enginn API.
///
/// Routes are relative to the API base URL (e.g. `projects/abc/characters/42`).
/// Implementations attach authentication and JSON content negotiation, and
/// must turn any non-2xx response into a [`RemoteError`](crate::RemoteError)
/// carrying the status and body. Connection-level failures become a
/// `NilStatus` remote error. An empty response body is returned as
/// [`Value::Null`].
///
/// [`EnginnClient`](crate::EnginnClient) is the HTTP implementation; tests can
/// supply their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `route` with the given query string.
    async fn get(&self, route: &str, query: &QueryPairs) -> Result<Value>;

    /// POST a JSON body to `route`.
    async fn post(&self, route: &str, body: &Value) -> Result<Value>;

    /// PATCH a JSON body to `route`.
    async fn patch(&self, route: &str, body: &Value) -> Result<Value>;

    /// DELETE `route`.
    async fn delete(&self, route: &str) -> Result<Value>;
}
