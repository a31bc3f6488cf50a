//! Handlers for resources nested under a project.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::projects::project_not_found;
use super::{authorize, error, page_of, payload, resource_key, single, ListQuery};
use crate::mock_server::state::MockState;

/// GET /projects/{uid}/{path}
pub async fn list_resources(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((uid, path)): Path<(String, String)>,
    RawQuery(raw): RawQuery,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    if resource_key(&path).is_none() {
        return unknown_path(&path);
    }
    let query = match ListQuery::parse(raw.as_deref()) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.list(&uid, &path) {
        Some(items) => page_of(items, &query),
        None => project_not_found(&uid),
    }
}

/// POST /projects/{uid}/{path}
pub async fn create_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((uid, path)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let Some(key) = resource_key(&path) else {
        return unknown_path(&path);
    };
    let attributes = match payload(body, &key) {
        Ok(attributes) => attributes,
        Err(response) => return response,
    };

    match state.create(&uid, &path, attributes) {
        Some(record) => single(StatusCode::CREATED, record),
        None => project_not_found(&uid),
    }
}

/// GET /projects/{uid}/{path}/{id}
pub async fn get_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((uid, path, id)): Path<(String, String, String)>,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match parse_id(&id).and_then(|id| state.get(&uid, &path, id)) {
        Some(record) => single(StatusCode::OK, record),
        None => not_found(&path, &id),
    }
}

/// PATCH /projects/{uid}/{path}/{id}
pub async fn update_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((uid, path, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let Some(key) = resource_key(&path) else {
        return unknown_path(&path);
    };
    let attributes = match payload(body, &key) {
        Ok(attributes) => attributes,
        Err(response) => return response,
    };

    match parse_id(&id).and_then(|parsed| state.update(&uid, &path, parsed, attributes)) {
        Some(record) => single(StatusCode::OK, record),
        None => not_found(&path, &id),
    }
}

/// DELETE /projects/{uid}/{path}/{id}
pub async fn delete_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((uid, path, id)): Path<(String, String, String)>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match parse_id(&id).and_then(|parsed| state.delete(&uid, &path, parsed)) {
        Some(record) => single(StatusCode::OK, &record),
        None => not_found(&path, &id),
    }
}

fn parse_id(id: &str) -> Option<u64> {
    id.parse().ok()
}

fn not_found(path: &str, id: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        &format!("No record in {path} with id: {id}"),
    )
}

fn unknown_path(path: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        &format!("No such resource type: {path}"),
    )
}
