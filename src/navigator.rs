//! Navigation seam
//!
//! The client never manages route definitions; it asks the host
//! application's navigation system to move to a named route. The
//! [`Navigator`] trait is that boundary: the route guard and the
//! session-invalidation path both drive it, and the host wires it to
//! whatever routing machinery it uses.

/// A navigation request: a named route plus optional query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Route name, e.g. `"Login"`
    pub route: String,
    /// Query parameters appended to the navigation, e.g. a return path
    pub query: Vec<(String, String)>,
}

impl NavigationTarget {
    /// Target the named route with no query parameters.
    pub fn named(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The host application's navigation system.
///
/// `current_path` reports the path of the route the user is on; the
/// session-invalidation redirect inspects it to choose between the
/// standard and the administrative login entry points.
pub trait Navigator: Send + Sync {
    /// Navigate to the given target.
    fn navigate(&self, target: NavigationTarget);

    /// The path of the current route, e.g. `"/admin/clubs"`.
    fn current_path(&self) -> String;

    /// Set the document/window title. Purely cosmetic.
    fn set_title(&self, title: &str);
}
