//! Route table module
//!
//! Maps exact request paths to fixed plain-text bodies.

/// A route: an exact path mapped to a fixed response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub body: &'static str,
}

/// The set of all defined routes, built once at startup.
///
/// Lookup is an exact, case-sensitive string match on the URI path.
/// Trailing slashes and duplicate slashes are not normalized.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: vec![
                Route {
                    path: "/",
                    body: "Hello world",
                },
                Route {
                    path: "/evening",
                    body: "Good evening",
                },
            ],
        }
    }

    /// Find the route whose path exactly equals the given path.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
