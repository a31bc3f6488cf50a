//! Parent context that resources and indexes are addressed under.

use std::sync::Arc;

use crate::traits::Transport;

/// Transport handle plus the route of the parent object.
///
/// Projects live in the root scope (empty route). Everything else lives in a
/// project's scope, whose route is `projects/{uid}`. A scope holds a snapshot
/// of the parent route, not the parent itself.
#[derive(Clone)]
pub struct Scope {
    transport: Arc<dyn Transport>,
    route: String,
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl Scope {
    /// Root scope over the given transport.
    pub fn root(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            route: String::new(),
        }
    }

    /// Child scope rooted at `route`, sharing this scope's transport.
    pub fn nested(&self, route: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            route: route.into(),
        }
    }

    /// The parent route; empty for the root scope.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Append segments to the parent route.
    pub(crate) fn join(&self, segments: &[&str]) -> String {
        let mut route = self.route.clone();
        for segment in segments {
            if !route.is_empty() {
                route.push('/');
            }
            route.push_str(segment);
        }
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnginnClient;

    fn root() -> Scope {
        Scope::root(Arc::new(EnginnClient::new("token", "http://localhost").unwrap()))
    }

    #[test]
    fn test_root_join_has_no_leading_slash() {
        let scope = root();
        assert_eq!(scope.route(), "");
        assert_eq!(scope.join(&["projects", "abc"]), "projects/abc");
    }

    #[test]
    fn test_nested_join() {
        let scope = root().nested("projects/abc");
        assert_eq!(scope.join(&["takes"]), "projects/abc/takes");
        assert_eq!(scope.join(&["takes", "42"]), "projects/abc/takes/42");
    }
}
