//! Route guarding
//!
//! The host application owns its route table; the guard only consumes
//! the per-route metadata in [`RouteTarget`] and the session's
//! authentication flag. Unauthenticated access to a protected route
//! redirects to login with the original path as the `redirect` query;
//! authenticated access to a login/registration entry route redirects
//! home.

use crate::navigator::{NavigationTarget, Navigator};
use crate::session::Session;
use std::sync::Arc;

/// Name of the standard login route.
pub const LOGIN: &str = "Login";
/// Name of the administrative login route.
pub const ADMIN_LOGIN: &str = "AdminLogin";
/// Name of the registration route.
pub const REGISTER: &str = "Register";
/// Name of the home route.
pub const HOME: &str = "Home";

/// Query parameter carrying the originally requested path through a
/// login redirect.
pub const REDIRECT_PARAM: &str = "redirect";

/// Suffix appended to every document title.
const APP_TITLE: &str = "Campus Community";

/// Metadata of the route a navigation is headed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// Route name, e.g. `"PostDetail"`
    pub name: String,
    /// Full requested path, used as the login return path
    pub path: String,
    /// Whether the route requires an authenticated session
    pub requires_auth: bool,
    /// Whether the route is a login/registration entry point
    pub entry_route: bool,
    /// Title from the route metadata
    pub title: Option<String>,
}

impl RouteTarget {
    /// A public route with no title.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            requires_auth: false,
            entry_route: false,
            title: None,
        }
    }

    /// Mark the route as requiring authentication.
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Mark the route as a login/registration entry point.
    pub fn entry(mut self) -> Self {
        self.entry_route = true;
        self
    }

    /// Attach a document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The document title for this route.
    pub fn document_title(&self) -> String {
        match &self.title {
            Some(title) => format!("{} - {}", title, APP_TITLE),
            None => APP_TITLE.to_string(),
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation proceeds to the requested route
    Allow,
    /// Auth required but absent; go to login carrying the return path
    RedirectToLogin {
        /// The originally requested path
        redirect: String,
    },
    /// Already authenticated on an entry route; go home
    RedirectHome,
}

/// Navigation guard consulting the session
pub struct RouteGuard {
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    /// Create a guard over the given session and navigation system.
    pub fn new(session: Arc<Session>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Decide whether the navigation may proceed. Pure: no side
    /// effects, no navigation.
    pub fn resolve(&self, target: &RouteTarget) -> GuardDecision {
        let authenticated = self.session.is_authenticated();

        if target.requires_auth && !authenticated {
            return GuardDecision::RedirectToLogin {
                redirect: target.path.clone(),
            };
        }

        if target.entry_route && authenticated {
            return GuardDecision::RedirectHome;
        }

        GuardDecision::Allow
    }

    /// Run the guard for a navigation: set the document title, resolve,
    /// and perform any redirect through the navigator.
    pub fn before_navigate(&self, target: &RouteTarget) -> GuardDecision {
        self.navigator.set_title(&target.document_title());

        let decision = self.resolve(target);
        match &decision {
            GuardDecision::Allow => {}
            GuardDecision::RedirectToLogin { redirect } => {
                tracing::debug!(path = %target.path, "navigation denied, redirecting to login");
                self.navigator.navigate(
                    NavigationTarget::named(LOGIN).with_query(REDIRECT_PARAM, redirect.clone()),
                );
            }
            GuardDecision::RedirectHome => {
                tracing::debug!(route = %target.name, "already authenticated, redirecting home");
                self.navigator.navigate(NavigationTarget::named(HOME));
            }
        }
        decision
    }
}
