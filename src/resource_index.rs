//! Filterable, paginated collection of resources.

use serde_json::Value;

use crate::error::{EnginnError, Result};
use crate::pagination::{list_query, Filters, Pagination, MAX_PAGES};
use crate::resource::Resource;
use crate::scope::Scope;
use crate::traits::ResourceKind;

/// A filterable, paginated query over resources of one kind.
///
/// Narrow it with the chainable [`filter`](Self::filter), [`per`](Self::per)
/// and [`page`](Self::page) methods. Each returns a new index and leaves the
/// receiver untouched, so two indexes derived from a common one never share
/// filters or pagination.
///
/// Requests are only issued by [`fetch`](Self::fetch) and while iterating
/// through a [`Cursor`]. Iteration fetches the next page whenever the end of
/// the current one is reached, unless the index was pinned to a page with
/// [`page`](Self::page).
///
/// # Example
///
/// ```ignore
/// let mut characters = project.characters().filter([("scene_id_eq", 12)]).per(50);
/// for character in characters.collect_all().await? {
///     println!("{:?}", character.name());
/// }
/// ```
pub struct ResourceIndex<K: ResourceKind> {
    scope: Scope,
    filters: Filters,
    pagination: Pagination,
    page_locked: bool,
    detached: bool,
    items: Vec<Resource<K>>,
    errors: Vec<EnginnError>,
}

impl<K: ResourceKind> ResourceIndex<K> {
    /// An unfiltered index under `scope`, starting at page 1.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            filters: Filters::new(),
            pagination: Pagination::default(),
            page_locked: false,
            detached: false,
            items: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// An index that matches nothing and never sends a request.
    ///
    /// Relationship helpers return this for a parent that has no id yet.
    pub fn empty(scope: Scope) -> Self {
        Self {
            detached: true,
            ..Self::new(scope)
        }
    }

    /// Whether this index was built by [`empty`](Self::empty).
    pub fn is_empty_query(&self) -> bool {
        self.detached
    }

    /// Copy of the query with no fetched state attached.
    fn derive(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            filters: self.filters.clone(),
            pagination: self.pagination.unfetched(),
            page_locked: self.page_locked,
            detached: self.detached,
            items: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A new index with `filters` merged into the current ones.
    ///
    /// Keys already present are overwritten; other keys are kept.
    pub fn filter<I, F, V>(&self, filters: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<Value>,
    {
        let mut index = self.derive();
        for (key, value) in filters {
            index.filters.insert(key.into(), value.into());
        }
        index
    }

    /// A new index whose filters are exactly `filters`.
    pub fn with_filters(&self, filters: Filters) -> Self {
        let mut index = self.derive();
        index.filters = filters;
        index
    }

    /// A new index pinned to page `page`.
    ///
    /// Iterating a pinned index yields that single page and stops.
    pub fn page(&self, page: u32) -> Self {
        let mut index = self.derive();
        index.pagination.current = page.max(1);
        index.page_locked = true;
        index
    }

    /// A new index fetching `per` items per page.
    pub fn per(&self, per: u32) -> Self {
        let mut index = self.derive();
        index.pagination.per = Some(per);
        index
    }

    /// The parent scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Current filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Current pagination state.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Whether the index is pinned to one page.
    pub fn is_page_locked(&self) -> bool {
        self.page_locked
    }

    /// Resources of the most recently fetched page.
    pub fn items(&self) -> &[Resource<K>] {
        &self.items
    }

    /// Route of the collection: `{parent}/{path}`.
    pub fn route(&self) -> String {
        self.scope.join(&[K::PATH])
    }

    /// Errors recorded by [`fetch_quietly`](Self::fetch_quietly), oldest first.
    pub fn errors(&self) -> &[EnginnError] {
        &self.errors
    }

    /// Forget recorded errors.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Fetch the current page.
    ///
    /// Replaces the buffered items with the response's `result` array and
    /// the pagination state with its `pagination` object.
    ///
    /// # Errors
    ///
    /// Returns the remote error on a non-2xx response, or
    /// `UnexpectedResponse` if the body is not a list envelope.
    pub async fn fetch(&mut self) -> Result<()> {
        if self.detached {
            self.items.clear();
            self.pagination = Pagination {
                last: Some(self.pagination.current),
                count: Some(0),
                ..self.pagination.unfetched()
            };
            return Ok(());
        }

        let route = self.route();
        let query = list_query(&self.pagination, &self.filters);
        let body = self.scope.transport().get(&route, &query).await?;
        self.sync(body)
    }

    /// [`fetch`](Self::fetch), recording any error instead of returning it.
    pub async fn fetch_quietly(&mut self) -> bool {
        match self.fetch().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(resource = K::NAME, route = %self.route(), error = %e, "fetch failed");
                self.errors.push(e);
                false
            }
        }
    }

    /// Start iterating over every matching resource.
    pub fn iter(&mut self) -> Cursor<'_, K> {
        Cursor {
            index: self,
            position: 0,
            pages: 0,
            state: CursorState::Pending,
        }
    }

    /// Iterate to the end and collect every resource.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching a page.
    pub async fn collect_all(&mut self) -> Result<Vec<Resource<K>>> {
        let mut cursor = self.iter();
        let mut all_items = Vec::new();
        while let Some(item) = cursor.next().await {
            all_items.push(item?);
        }
        Ok(all_items)
    }

    fn sync(&mut self, body: Value) -> Result<()> {
        let Value::Object(mut envelope) = body else {
            return Err(EnginnError::UnexpectedResponse(format!(
                "{} list response is not a JSON object",
                K::NAME
            )));
        };

        let Some(Value::Array(results)) = envelope.remove("result") else {
            return Err(EnginnError::UnexpectedResponse(format!(
                "{} list response has no `result` array",
                K::NAME
            )));
        };

        let items = results
            .into_iter()
            .map(|item| match item {
                Value::Object(attributes) => Ok(Resource::new(self.scope.clone(), attributes)),
                other => Err(EnginnError::UnexpectedResponse(format!(
                    "{} list item is not an object: {other}",
                    K::NAME
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        // Without pagination info, treat the response as the only page
        let pagination = match envelope.remove("pagination") {
            Some(value) => {
                let reported_current = value.get("current").is_some_and(|c| !c.is_null());
                let reported_per = value.get("per").is_some_and(|p| !p.is_null());
                let mut pagination: Pagination = serde_json::from_value(value)?;
                // Keep the page that was asked for when the server leaves it out
                if !reported_current {
                    pagination.current = self.pagination.current;
                }
                if !reported_per {
                    pagination.per = self.pagination.per;
                }
                pagination
            }
            None => Pagination {
                last: Some(self.pagination.current),
                count: Some(items.len() as u64),
                ..self.pagination.clone()
            },
        };

        self.items = items;
        self.pagination = pagination;
        Ok(())
    }
}

/// Clones carry the query and buffered items; recorded errors are not copied.
impl<K: ResourceKind> Clone for ResourceIndex<K> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            filters: self.filters.clone(),
            pagination: self.pagination.clone(),
            page_locked: self.page_locked,
            detached: self.detached,
            items: self.items.clone(),
            errors: Vec::new(),
        }
    }
}

impl<K: ResourceKind> std::fmt::Debug for ResourceIndex<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(&format!("{}Index", K::NAME))
            .field("route", &self.route())
            .field("filters", &self.filters)
            .field("pagination", &self.pagination)
            .field("page_locked", &self.page_locked)
            .field("detached", &self.detached)
            .field("items", &self.items.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Pending,
    Active,
    Done,
}

/// Lazy iteration over a [`ResourceIndex`].
///
/// Each call to [`next`](Self::next) yields one resource, fetching a page
/// first when needed. A cursor walks every page from the first one, or just
/// the pinned page of a page-locked index. When it ends, the index is back
/// on page 1 (unless pinned), so a new cursor repeats the same sequence.
///
/// A failed fetch is yielded once as an error, then the cursor ends.
pub struct Cursor<'a, K: ResourceKind> {
    index: &'a mut ResourceIndex<K>,
    position: usize,
    pages: u32,
    state: CursorState,
}

impl<K: ResourceKind> Cursor<'_, K> {
    /// The next resource, or `None` once every page has been consumed.
    pub async fn next(&mut self) -> Option<Result<Resource<K>>> {
        loop {
            match self.state {
                CursorState::Done => return None,
                CursorState::Pending => {
                    if !self.index.page_locked {
                        self.index.pagination.current = 1;
                    }
                    if let Err(e) = self.load_page().await {
                        return Some(Err(e));
                    }
                    self.state = CursorState::Active;
                }
                CursorState::Active => {
                    if let Some(item) = self.index.items.get(self.position) {
                        self.position += 1;
                        return Some(Ok(item.clone()));
                    }

                    if self.index.page_locked || !self.index.pagination.has_next() {
                        self.finish();
                        return None;
                    }

                    if self.pages >= MAX_PAGES {
                        tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                        self.finish();
                        return None;
                    }

                    self.index.pagination.current += 1;
                    if let Err(e) = self.load_page().await {
                        return Some(Err(e));
                    }
                }
            }
        }
    }

    /// Fetch the index's current page and rewind to its first item.
    async fn load_page(&mut self) -> Result<()> {
        tracing::debug!(
            resource = K::NAME,
            page = self.index.pagination.current,
            "fetching page"
        );
        match self.index.fetch().await {
            Ok(()) => {
                self.position = 0;
                self.pages += 1;
                Ok(())
            }
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }

    fn finish(&mut self) {
        self.state = CursorState::Done;
        if !self.index.page_locked {
            self.index.pagination.current = 1;
        }
    }
}
