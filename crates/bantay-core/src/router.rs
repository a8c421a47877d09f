//! Client-side routes and their views.
//!
//! The mapping is fixed and carries no access control: reaching `/admin`
//! without a session is not prevented here.

use std::fmt;

/// One of the four navigable locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Login,
    Admin,
    CoastGuard,
    Fisherfolk,
}

/// Placeholder content shown for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub title: &'static str,
    pub body: &'static str,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Login,
        Route::Admin,
        Route::CoastGuard,
        Route::Fisherfolk,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Admin => "/admin",
            Route::CoastGuard => "/coast-guard",
            Route::Fisherfolk => "/fisherfolk",
        }
    }

    /// Resolves a path to a route. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(trimmed) => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn view(self) -> View {
        match self {
            Route::Login => View {
                title: "Bantay",
                body: "Sign in with your email and password.",
            },
            Route::Admin => View {
                title: "Admin Dashboard",
                body: "Administration tools will appear here.",
            },
            Route::CoastGuard => View {
                title: "Coast Guard View",
                body: "Coast guard tools will appear here.",
            },
            Route::Fisherfolk => View {
                title: "Fisherfolk View",
                body: "Fisherfolk tools will appear here.",
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receiver of navigation instructions.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// In-memory location: the current route plus the routes left behind.
#[derive(Debug, Clone, Default)]
pub struct Location {
    current: Route,
    history: Vec<Route>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Previously visited routes, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Navigator for Location {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.current, to = %route, "navigate");
        self.history.push(self.current);
        self.current = route;
    }
}
