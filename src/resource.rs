//! Generic remote entity with a dynamic attribute bag.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::attributes::Attributes;
use crate::error::{EnginnError, Result};
use crate::resource_index::ResourceIndex;
use crate::scope::Scope;
use crate::traits::ResourceKind;

/// One remote object: a Character, a Take, a Project...
///
/// A resource is addressed under its parent [`Scope`] and keeps every
/// attribute the API sent in an [`Attributes`] map. [`fetch`](Self::fetch)
/// and [`save`](Self::save) merge the server's representation back into that
/// map, so after either call the local attributes reflect the last response.
///
/// A resource without its identifier attribute is *new*: saving it issues a
/// POST, and the identifier comes back in the response. With an identifier,
/// saving issues a PATCH carrying the full attribute set.
///
/// Every request method comes in two flavours: `fetch`/`save`/`destroy`
/// return the error, while the `*_quietly` variants push it onto
/// [`errors`](Self::errors) and return `false`.
///
/// # Example
///
/// ```ignore
/// let mut color = Resource::<Color>::new(scope, [("code", "#16161D")]);
/// color.save().await?; // POST, a new color is created
/// color.set("name", "Eigengrau");
/// color.save().await?; // PATCH, the color is updated
/// ```
pub struct Resource<K: ResourceKind> {
    scope: Scope,
    attributes: Attributes,
    errors: Vec<EnginnError>,
    kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Resource<K> {
    /// Build a resource in memory; nothing is sent.
    pub fn new(scope: Scope, attributes: impl Into<Attributes>) -> Self {
        Self {
            scope,
            attributes: attributes.into(),
            errors: Vec::new(),
            kind: PhantomData,
        }
    }

    /// Build a handle to an existing resource from its identifier alone.
    pub fn with_identifier(scope: Scope, identifier: impl Into<Value>) -> Self {
        let mut attributes = Attributes::new();
        attributes.set(K::IDENTIFIER, identifier);
        Self::new(scope, attributes)
    }

    /// The parent scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// All attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access to all attributes.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Set an attribute; it is sent on the next [`save`](Self::save).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Whether an attribute is present.
    pub fn has(&self, key: &str) -> bool {
        self.attributes.has(key)
    }

    /// Remove an attribute locally.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// The identifier attribute (`id`, or `uid` for projects).
    pub fn identifier(&self) -> Option<&Value> {
        self.attributes.get(K::IDENTIFIER).filter(|v| !v.is_null())
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&Value> {
        self.attributes.get("id")
    }

    /// When the server created this resource.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attributes.get_datetime("created_at")
    }

    /// When the server last updated this resource.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.attributes.get_datetime("updated_at")
    }

    /// Whether the resource has no identifier yet.
    pub fn is_new(&self) -> bool {
        self.identifier().is_none()
    }

    /// Route of this resource: `{parent}/{path}/{identifier}`.
    ///
    /// A new resource routes to its collection, `{parent}/{path}`.
    pub fn route(&self) -> String {
        match self.identifier().map(route_segment) {
            Some(segment) => self.scope.join(&[K::PATH, &segment]),
            None => self.scope.join(&[K::PATH]),
        }
    }

    /// Resources of kind `R` in the same scope whose `foreign_key` filter
    /// matches this resource's `id`.
    ///
    /// `character.related::<Take>("character_id_eq")` lists the takes of a
    /// character. A resource without an `id` has no related resources: the
    /// index is [`empty`](ResourceIndex::empty) and never hits the API.
    pub fn related<R: ResourceKind>(&self, foreign_key: &str) -> ResourceIndex<R> {
        match self.id().filter(|id| !id.is_null()) {
            Some(id) => ResourceIndex::new(self.scope.clone()).filter([(foreign_key, id.clone())]),
            None => ResourceIndex::empty(self.scope.clone()),
        }
    }

    /// Errors recorded by the `*_quietly` methods, oldest first.
    pub fn errors(&self) -> &[EnginnError] {
        &self.errors
    }

    /// Forget recorded errors.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Load the resource from the API and merge the result into the
    /// attributes.
    ///
    /// # Errors
    ///
    /// Returns the remote error on a non-2xx response, or
    /// `UnexpectedResponse` if the body has no `result` object.
    pub async fn fetch(&mut self) -> Result<()> {
        let route = self.route();
        let body = self.scope.transport().get(&route, &Vec::new()).await?;
        self.sync(body)
    }

    /// Create the resource if it is new, update it otherwise, then merge the
    /// server's representation into the attributes.
    ///
    /// The request body is `{ "<resource_name>": { ...attributes } }`.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    pub async fn save(&mut self) -> Result<()> {
        let route = self.route();
        let mut payload = Map::new();
        payload.insert(K::resource_name(), self.attributes.clone().into_value());
        let payload = Value::Object(payload);
        let transport = self.scope.transport();

        let body = if self.is_new() {
            transport.post(&route, &payload).await?
        } else {
            transport.patch(&route, &payload).await?
        };
        self.sync(body)
    }

    /// Delete the resource remotely.
    ///
    /// Local attributes are left untouched; the object stays inspectable but
    /// no longer matches anything on the server.
    ///
    /// # Errors
    ///
    /// Returns the remote error on a non-2xx response.
    pub async fn destroy(&mut self) -> Result<()> {
        let route = self.route();
        self.scope.transport().delete(&route).await?;
        Ok(())
    }

    /// [`fetch`](Self::fetch), recording any error instead of returning it.
    pub async fn fetch_quietly(&mut self) -> bool {
        let result = self.fetch().await;
        self.record(result)
    }

    /// [`save`](Self::save), recording any error instead of returning it.
    pub async fn save_quietly(&mut self) -> bool {
        let result = self.save().await;
        self.record(result)
    }

    /// [`destroy`](Self::destroy), recording any error instead of returning it.
    pub async fn destroy_quietly(&mut self) -> bool {
        let result = self.destroy().await;
        self.record(result)
    }

    fn record(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(resource = K::NAME, route = %self.route(), error = %e, "request failed");
                self.errors.push(e);
                false
            }
        }
    }

    fn sync(&mut self, body: Value) -> Result<()> {
        match body {
            Value::Object(mut envelope) => match envelope.remove("result") {
                Some(Value::Object(result)) => {
                    self.attributes.merge(result);
                    Ok(())
                }
                _ => Err(EnginnError::UnexpectedResponse(format!(
                    "{} response has no `result` object",
                    K::NAME
                ))),
            },
            _ => Err(EnginnError::UnexpectedResponse(format!(
                "{} response is not a JSON object",
                K::NAME
            ))),
        }
    }
}

/// Clones share the scope and attributes; recorded errors are not copied.
impl<K: ResourceKind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self::new(self.scope.clone(), self.attributes.clone())
    }
}

impl<K: ResourceKind> std::fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct(K::NAME);
        for (key, value) in &self.attributes {
            debug.field(key, &format_args!("{value}"));
        }
        debug.finish()
    }
}

/// Identifier as a route segment: strings unquoted and percent-encoded,
/// everything else in its JSON form.
fn route_segment(identifier: &Value) -> String {
    match identifier {
        Value::String(s) => urlencoding::encode(s).into_owned(),
        other => other.to_string(),
    }
}
