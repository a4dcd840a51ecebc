//! Route registration table.
//!
//! # Responsibilities
//! - Pin path prefixes to the namespace that actually serves them
//! - Resolve a request path to its registered namespace, if any
//!
//! # Design Decisions
//! - Matching is segment-aligned so a pin for `task` never captures `tasks`
//! - The query string is ignored when matching
//! - Longest prefix wins, making `create/selection` beat `create`
//! - Unregistered paths resolve to None; the caller decides the policy
//! - No regex to guarantee O(n) matching

use crate::config::schema::{Namespace, RouteConfig};

/// Compiled table of path-prefix → namespace registrations.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Entries sorted by prefix length, longest first.
    entries: Vec<(String, Namespace)>,
}

impl RouteTable {
    /// Compile a table from config registrations.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let mut entries: Vec<(String, Namespace)> = routes
            .iter()
            .map(|r| (r.path_prefix.clone(), r.namespace))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { entries }
    }

    /// Resolve a path to its registered namespace.
    pub fn resolve(&self, path: &str) -> Option<Namespace> {
        let path = path.split('?').next().unwrap_or(path);

        self.entries
            .iter()
            .find(|(prefix, _)| prefix_matches(prefix, path))
            .map(|(_, namespace)| *namespace)
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Segment-aligned prefix match: the path equals the prefix, or continues
/// with a `/` right after it.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }
    path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pins: &[(&str, Namespace)]) -> RouteTable {
        let routes: Vec<RouteConfig> = pins
            .iter()
            .map(|(prefix, namespace)| RouteConfig {
                path_prefix: (*prefix).to_string(),
                namespace: *namespace,
            })
            .collect();
        RouteTable::from_config(&routes)
    }

    #[test]
    fn exact_and_nested_paths_match() {
        let table = table(&[("create", Namespace::Fallback)]);
        assert_eq!(table.resolve("create"), Some(Namespace::Fallback));
        assert_eq!(table.resolve("create/selection"), Some(Namespace::Fallback));
    }

    #[test]
    fn sibling_prefixes_do_not_collide() {
        let table = table(&[("task", Namespace::Primary)]);
        assert_eq!(table.resolve("task"), Some(Namespace::Primary));
        assert_eq!(table.resolve("task/finale"), Some(Namespace::Primary));
        assert_eq!(table.resolve("tasks"), None);
        assert_eq!(table.resolve("tasks?projectName=x"), None);
    }

    #[test]
    fn query_string_is_ignored() {
        let table = table(&[("tasks", Namespace::Fallback)]);
        assert_eq!(
            table.resolve("tasks?projectName=AI+Notepad"),
            Some(Namespace::Fallback)
        );
    }

    #[test]
    fn longest_prefix_wins() {
        let table = table(&[
            ("create", Namespace::Fallback),
            ("create/selection", Namespace::Primary),
        ]);
        assert_eq!(table.resolve("create"), Some(Namespace::Fallback));
        assert_eq!(table.resolve("create/selection"), Some(Namespace::Primary));
        assert_eq!(
            table.resolve("create/selection?confirm=1"),
            Some(Namespace::Primary)
        );
    }

    #[test]
    fn unregistered_paths_resolve_to_none() {
        let table = table(&[("members", Namespace::Fallback)]);
        assert_eq!(table.resolve("task"), None);
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);
    }
}
