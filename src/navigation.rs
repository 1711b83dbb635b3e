//! Route transitions between the test page and the results page

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Test,
    Results,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Test => "/test",
            Route::Results => "/results",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Imperative route change; data travels through the context, not the call
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Tracks the route currently shown by the application
#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::Test,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: Route) {
        if self.current != route {
            log::debug!("Navigating {} -> {}", self.current, route);
        }
        self.current = route;
    }
}
