//! Project endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{authorize, error, page_of, payload, single, ListQuery};
use crate::mock_server::state::MockState;
use crate::{Project, ResourceKind};

/// GET /projects
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let query = match ListQuery::parse(raw.as_deref()) {
        Ok(query) => query,
        Err(response) => return response,
    };

    page_of(state.list_projects(), &query)
}

/// GET /projects/{uid}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.get_project(&uid) {
        Some(project) => single(StatusCode::OK, project),
        None => project_not_found(&uid),
    }
}

/// PATCH /projects/{uid}
pub async fn update_project(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(uid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let attributes = match payload(body, &Project::resource_name()) {
        Ok(attributes) => attributes,
        Err(response) => return response,
    };

    match state.update_project(&uid, attributes) {
        Some(project) => single(StatusCode::OK, project),
        None => project_not_found(&uid),
    }
}

pub(super) fn project_not_found(uid: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        &format!("No project found with uid: {uid}"),
    )
}
