//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Enginn API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// One stored resource: its attributes as the API would send them.
pub type Record = Map<String, Value>;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by uid.
    pub projects: BTreeMap<String, Record>,

    /// Project children: uid, then resource path, then id.
    pub resources: BTreeMap<String, BTreeMap<String, BTreeMap<u64, Record>>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state; `attributes` should carry its `uid`.
    pub fn with_project(mut self, uid: &str, mut attributes: Record) -> Self {
        attributes.insert("uid".to_string(), Value::from(uid));
        self.projects.insert(uid.to_string(), attributes);
        self
    }

    /// Add a child resource to a project, assigning it the next id.
    ///
    /// # Panics
    ///
    /// Panics if no project with `uid` was added first.
    pub fn with_resource(mut self, uid: &str, path: &str, attributes: Record) -> Self {
        let created = self.create(uid, path, attributes).is_some();
        assert!(created, "fixture {path} added to unknown project {uid}");
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a project by uid.
    pub fn get_project(&self, uid: &str) -> Option<&Record> {
        self.projects.get(uid)
    }

    /// All projects, ordered by uid.
    pub fn list_projects(&self) -> Vec<&Record> {
        self.projects.values().collect()
    }

    /// Merge `attributes` into a project and return the updated version.
    ///
    /// The uid itself cannot be changed.
    pub fn update_project(&mut self, uid: &str, attributes: Record) -> Option<&Record> {
        let project = self.projects.get_mut(uid)?;
        for (key, value) in attributes {
            if key != "uid" {
                project.insert(key, value);
            }
        }
        touch(project);
        Some(project)
    }

    /// Resources at `path` under a project, ordered by id.
    ///
    /// `None` when the project does not exist.
    pub fn list(&self, uid: &str, path: &str) -> Option<Vec<&Record>> {
        self.projects.get(uid)?;
        Some(
            self.resources
                .get(uid)
                .and_then(|paths| paths.get(path))
                .map(|items| items.values().collect())
                .unwrap_or_default(),
        )
    }

    /// Get one resource.
    pub fn get(&self, uid: &str, path: &str, id: u64) -> Option<&Record> {
        self.resources.get(uid)?.get(path)?.get(&id)
    }

    /// Store a new resource with a fresh id and timestamps.
    ///
    /// `None` when the project does not exist.
    pub fn create(&mut self, uid: &str, path: &str, mut attributes: Record) -> Option<&Record> {
        self.projects.get(uid)?;

        self.next_id += 1;
        let id = self.next_id;
        let now = Value::from(Utc::now().to_rfc3339());
        attributes.insert("id".to_string(), Value::from(id));
        attributes.insert("created_at".to_string(), now.clone());
        attributes.insert("updated_at".to_string(), now);

        let items = self
            .resources
            .entry(uid.to_string())
            .or_default()
            .entry(path.to_string())
            .or_default();
        items.insert(id, attributes);
        items.get(&id)
    }

    /// Merge `attributes` into a resource and return the updated version.
    ///
    /// The id itself cannot be changed.
    pub fn update(&mut self, uid: &str, path: &str, id: u64, attributes: Record) -> Option<&Record> {
        let record = self.resources.get_mut(uid)?.get_mut(path)?.get_mut(&id)?;
        for (key, value) in attributes {
            if key != "id" {
                record.insert(key, value);
            }
        }
        touch(record);
        Some(record)
    }

    /// Remove a resource, returning it.
    pub fn delete(&mut self, uid: &str, path: &str, id: u64) -> Option<Record> {
        self.resources.get_mut(uid)?.get_mut(path)?.remove(&id)
    }
}

fn touch(record: &mut Record) {
    record.insert(
        "updated_at".to_string(),
        Value::from(Utc::now().to_rfc3339()),
    );
}
