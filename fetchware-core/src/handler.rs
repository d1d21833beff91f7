//! # Handler shapes
//!
//! A handler is registered either as a bare callable (any [`Middleware`]) or
//! as a [`Component`]: a long-lived object that may or may not be able to
//! handle fetch requests. [`HandlerKind`] is the closed set of the two; it is
//! resolved once, at registration, into a uniform [`BoxMiddleware`].

use crate::{
    error::RegistrationError,
    middleware::{BoxMiddleware, Middleware},
};
use std::sync::Arc;

/// A registered object with optional request-handling capability.
///
/// Components that can handle fetch requests return themselves (or a bound
/// handler sharing their state) from [`Component::fetch_handler`].
///
/// # Example
///
/// ```rust,ignore
/// impl Component for OfflineCache {
///     fn fetch_handler(self: Arc<Self>) -> Option<BoxMiddleware> {
///         Some(self)
///     }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// The fetch-handling capability, if any.
    fn fetch_handler(self: Arc<Self>) -> Option<BoxMiddleware> {
        None
    }

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The accepted handler shapes.
#[derive(Clone)]
pub enum HandlerKind {
    /// A plain request handler.
    Callable(BoxMiddleware),
    /// An object that may expose a fetch handler.
    Component(Arc<dyn Component>),
}

impl HandlerKind {
    /// Wrap a middleware.
    pub fn callable<M: Middleware>(middleware: M) -> Self {
        HandlerKind::Callable(Arc::new(middleware))
    }

    /// Wrap a component.
    pub fn component<C: Component>(component: C) -> Self {
        HandlerKind::Component(Arc::new(component))
    }

    /// Resolve to the handler the router stores.
    ///
    /// Fails with [`RegistrationError::UnsupportedHandler`] when a component
    /// cannot handle fetch requests.
    pub fn resolve(self) -> Result<BoxMiddleware, RegistrationError> {
        match self {
            HandlerKind::Callable(handler) => Ok(handler),
            HandlerKind::Component(component) => {
                let name = component.name().to_string();
                component
                    .fetch_handler()
                    .ok_or(RegistrationError::UnsupportedHandler(name))
            }
        }
    }
}

impl<M: Middleware> From<M> for HandlerKind {
    fn from(middleware: M) -> Self {
        HandlerKind::callable(middleware)
    }
}

impl std::fmt::Debug for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerKind::Callable(_) => f.write_str("Callable"),
            HandlerKind::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}
