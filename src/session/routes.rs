use crate::error::Error;

/// A declared application route and whether it needs a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub name: String,
    /// Path pattern; `:name` segments match any single non-empty segment.
    pub pattern: String,
    pub requires_auth: bool,
}

impl RouteMeta {
    #[must_use]
    pub fn protected(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            requires_auth: true,
        }
    }

    #[must_use]
    pub fn public(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            requires_auth: false,
        }
    }

    /// Whether `path` (no query or fragment) matches this route's pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        pattern_matches(&self.pattern, path)
    }

    fn param_count(&self) -> usize {
        segments(&self.pattern).filter(|s| s.starts_with(':')).count()
    }
}

/// Segment-wise match of `path` against `pattern`, ignoring empty segments.
pub(crate) fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut wanted = segments(pattern);
    let mut actual = segments(path);
    loop {
        match (wanted.next(), actual.next()) {
            (None, None) => return true,
            (Some(w), Some(a)) if w.starts_with(':') || w == a => {}
            _ => return false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The application's route table.
///
/// Every route requires a session except the ticket callback route, which is
/// the only one reachable without one.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteMeta>,
}

impl RouteTable {
    /// Builds a table, checking that `callback_path` is declared public, that
    /// no other route is, and that navigating to it resolves to that route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the table violates that rule.
    pub fn new(routes: Vec<RouteMeta>, callback_path: &str) -> Result<Self, Error> {
        let callback = routes
            .iter()
            .find(|r| pattern_matches(&r.pattern, callback_path) && r.param_count() == 0)
            .ok_or_else(|| {
                Error::Config(format!("callback route '{callback_path}' is not declared"))
            })?;
        if callback.requires_auth {
            return Err(Error::Config(format!(
                "callback route '{callback_path}' must not require a session"
            )));
        }
        if let Some(open) = routes
            .iter()
            .find(|r| !r.requires_auth && !std::ptr::eq(*r, callback))
        {
            return Err(Error::Config(format!(
                "route '{}' ({}) must require a session",
                open.name, open.pattern
            )));
        }

        let table = Self { routes };
        match table.resolve(callback_path) {
            Some(route) if !route.requires_auth => Ok(table),
            Some(route) => Err(Error::Config(format!(
                "callback route '{callback_path}' is shadowed by '{}' ({})",
                route.name, route.pattern
            ))),
            None => Err(Error::Config(format!(
                "callback route '{callback_path}' is not reachable"
            ))),
        }
    }

    /// The booking app's views plus the callback route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `callback_path` collides with a protected view.
    pub fn standard(callback_path: &str) -> Result<Self, Error> {
        let routes = vec![
            RouteMeta::protected("home", "/"),
            RouteMeta::protected("about", "/about"),
            RouteMeta::protected("packages-list", "/packages"),
            RouteMeta::protected("package-detail", "/packages/:id"),
            RouteMeta::protected("plan-detail", "/plans/:id"),
            RouteMeta::protected("activities-list", "/activities"),
            RouteMeta::protected("activity-detail", "/activities/:id"),
            RouteMeta::protected("loyalty", "/loyalty"),
            RouteMeta::protected("loyalty-coupons", "/loyalty/coupons"),
            RouteMeta::protected("statistics", "/statistics"),
            RouteMeta::public("auth-callback", callback_path),
        ];
        Self::new(routes, callback_path)
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteMeta] {
        &self.routes
    }

    /// The route matching the path part of `location`.
    ///
    /// When several patterns match, the one with the fewest `:param`
    /// segments wins, then declaration order.
    #[must_use]
    pub fn resolve(&self, location: &str) -> Option<&RouteMeta> {
        let path = path_of(location);
        self.routes
            .iter()
            .filter(|r| r.matches(path))
            .min_by_key(|r| r.param_count())
    }
}

/// Strips the query string and fragment from a location.
pub(crate) fn path_of(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or_default()
}
