//! Verb shortcuts that accept any handler shape.

use super::router::Router;
use fetchware_core::{BoxMiddleware, HandlerKind, Method, RegistrationError};

impl Router<BoxMiddleware> {
    /// Borrow verb-named registration shortcuts that accept callables and
    /// components alike.
    ///
    /// This lets another type (the dispatcher) offer the same registration
    /// surface as the router without duplicating matching logic.
    pub fn proxy_methods(&mut self) -> MethodProxy<'_> {
        MethodProxy { router: self }
    }
}

/// Registration shortcuts delegating to a [`Router`].
///
/// Each shortcut resolves the handler once, failing with
/// [`RegistrationError::UnsupportedHandler`] when it cannot handle fetch
/// requests, and then calls [`Router::insert`].
pub struct MethodProxy<'a> {
    router: &'a mut Router<BoxMiddleware>,
}

impl MethodProxy<'_> {
    /// Register a handler of any shape for `method`.
    pub fn add(
        &mut self,
        method: Method,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        let handler = handler.into().resolve()?;
        self.router.insert(method, pattern, handler)?;
        Ok(self)
    }

    /// Register for `get`.
    pub fn get(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::Get, pattern, handler)
    }

    /// Register for `post`.
    pub fn post(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::Post, pattern, handler)
    }

    /// Register for `put`.
    pub fn put(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::Put, pattern, handler)
    }

    /// Register for `delete`.
    pub fn delete(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::Delete, pattern, handler)
    }

    /// Register for `head`.
    pub fn head(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::Head, pattern, handler)
    }

    /// Register for every verb.
    pub fn all(
        &mut self,
        pattern: &str,
        handler: impl Into<HandlerKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.add(Method::All, pattern, handler)
    }
}
