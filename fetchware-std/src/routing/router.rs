//! Ordered, multi-match router.

use crate::path::CompiledPath;
use fetchware_core::{Method, Params, RegistrationError};

/// One registered handler binding.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: Method,
    path: CompiledPath,
    handler: H,
}

impl<H> Route<H> {
    /// The verb this route serves.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The compiled pattern.
    pub fn path(&self) -> &CompiledPath {
        &self.path
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// A route that matched a lookup, with the values of its named placeholders.
#[derive(Debug, PartialEq)]
pub struct RouteMatch<'a, H> {
    /// The matching route's handler.
    pub handler: &'a H,
    /// Named placeholder values captured from the URL.
    pub params: Params,
}

/// A router that returns every matching handler in registration order.
///
/// Routes are appended by [`Router::add`] and never reordered, replaced or
/// deduplicated: registering the same handler twice makes it run twice.
/// Lookups take `&self`, so a router shared after setup can serve concurrent
/// dispatches without locking.
///
/// # Example
///
/// ```rust,ignore
/// let mut router = Router::new();
/// router.get("/users/:id", 1)?;
/// router.all("*", 2)?;
///
/// let matches = router.match_route("GET", "/users/42");
/// assert_eq!(matches[0].params.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `handler` for `method` requests whose URL matches `pattern`.
    ///
    /// The method is trimmed and compared case-insensitively.
    pub fn add(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RegistrationError> {
        let method = Method::parse(method)?;
        self.insert(method, pattern, handler)
    }

    /// Register `handler` for an already parsed verb.
    pub fn insert(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RegistrationError> {
        let path = CompiledPath::compile(pattern)?;
        tracing::debug!(%method, pattern, regex = path.as_str(), "route registered");
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        Ok(self)
    }

    /// Shorthand for `add("get", ..)`.
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::Get, pattern, handler)
    }

    /// Shorthand for `add("post", ..)`.
    pub fn post(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::Post, pattern, handler)
    }

    /// Shorthand for `add("put", ..)`.
    pub fn put(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::Put, pattern, handler)
    }

    /// Shorthand for `add("delete", ..)`.
    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::Delete, pattern, handler)
    }

    /// Shorthand for `add("head", ..)`.
    pub fn head(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::Head, pattern, handler)
    }

    /// Shorthand for `add("all", ..)`.
    pub fn all(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RegistrationError> {
        self.insert(Method::All, pattern, handler)
    }

    /// Every handler registered for `method` whose pattern matches `url`, in
    /// registration order.
    ///
    /// An unrecognized verb is not an error here: it simply matches nothing,
    /// so requests with unusual methods fall through to the fallback.
    pub fn match_route(&self, method: &str, url: &str) -> Vec<RouteMatch<'_, H>> {
        let Ok(method) = Method::parse(method) else {
            tracing::trace!(method, url, "unsupported method, no routes match");
            return Vec::new();
        };

        self.routes
            .iter()
            .filter(|route| route.method.accepts(method))
            .filter_map(|route| {
                route.path.captures(url).map(|params| RouteMatch {
                    handler: &route.handler,
                    params,
                })
            })
            .collect()
    }

    /// Registered routes in order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handlers(router: &Router<u32>, method: &str, url: &str) -> Vec<u32> {
        router
            .match_route(method, url)
            .into_iter()
            .map(|m| *m.handler)
            .collect()
    }

    #[test]
    fn test_add_pushes_route() {
        let mut router = Router::new();
        router.add("get", "/", 1).unwrap();

        let route = router.routes().next().unwrap();
        assert_eq!(route.method(), Method::Get);
        assert_eq!(route.path().as_str(), "/$");
        assert!(route.path().placeholder_names().is_empty());
        assert_eq!(*route.handler(), 1);
    }

    #[test]
    fn test_add_sanitizes_method() {
        let mut router = Router::new();
        router.add("  GET ", "/", 1).unwrap();
        router.add("all", "/", 2).unwrap();
        assert_eq!(router.routes().map(Route::method).collect::<Vec<_>>(), [
            Method::Get,
            Method::All
        ]);
    }

    #[test]
    fn test_add_rejects_unknown_method() {
        let mut router = Router::new();
        let err = router.add("invalidMethod", "/", 1).unwrap_err();
        assert_eq!(err, RegistrationError::UnsupportedMethod("invalidMethod".into()));
        assert!(router.is_empty());
    }

    #[test]
    fn test_add_propagates_invalid_pattern() {
        let mut router = Router::new();
        assert!(matches!(
            router.get("/foo/:bar:baz", 1),
            Err(RegistrationError::InvalidPattern { .. })
        ));
        assert!(router.is_empty());
    }

    #[test]
    fn test_shortcuts_fix_the_verb() {
        let mut router = Router::new();
        router
            .get("/", 1)
            .and_then(|r| r.post("/", 2))
            .and_then(|r| r.put("/", 3))
            .and_then(|r| r.delete("/", 4))
            .and_then(|r| r.head("/", 5))
            .and_then(|r| r.all("/", 6))
            .unwrap();

        let verbs: Vec<_> = router.routes().map(Route::method).collect();
        assert_eq!(verbs, Method::VERBS);
    }

    #[test]
    fn test_match_in_registration_order() {
        let mut router = Router::new();
        router.get("/", 1).unwrap();
        router.get("/", 2).unwrap();
        assert_eq!(handlers(&router, "get", "/"), [1, 2]);
    }

    #[test]
    fn test_match_regular_expression() {
        let mut router = Router::new();
        router.get("/[0-9]+", 1).unwrap();
        assert_eq!(handlers(&router, "get", "/1"), [1]);
        assert!(handlers(&router, "get", "/").is_empty());
    }

    #[test]
    fn test_match_separates_methods() {
        let mut router = Router::new();
        router.get("/", 1).unwrap();
        router.post("/", 2).unwrap();
        assert_eq!(handlers(&router, "get", "/"), [1]);
        assert_eq!(handlers(&router, "POST", "/"), [2]);
        assert!(handlers(&router, "put", "/").is_empty());
    }

    #[test]
    fn test_match_separates_urls() {
        let mut router = Router::new();
        router.get("/a", 1).unwrap();
        router.get("/b", 2).unwrap();
        assert_eq!(handlers(&router, "get", "/a"), [1]);
    }

    #[test]
    fn test_match_unknown_method_is_empty() {
        let mut router = Router::new();
        router.all("*", 1).unwrap();
        assert!(router.match_route("PATCH", "/").is_empty());
        assert!(router.match_route("", "/").is_empty());
    }

    #[test]
    fn test_all_matches_every_verb() {
        let mut router = Router::new();
        router.all("/", 1).unwrap();
        for verb in ["get", "post", "put", "delete", "head", "all"] {
            assert_eq!(handlers(&router, verb, "/"), [1], "verb {verb}");
        }
    }

    #[test]
    fn test_match_attaches_empty_params() {
        let mut router = Router::new();
        router.get("/", 1).unwrap();
        let matched = &router.match_route("get", "/")[0];
        assert!(matched.params.is_empty());
    }
}
