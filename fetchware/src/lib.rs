//! # fetchware - Middleware Chaining for Intercepted Requests
//!
//! `fetchware` routes intercepted network requests through an ordered chain
//! of middleware. Routes are matched by HTTP verb and URL pattern; every
//! matching middleware runs in registration order, followed by a mandatory
//! fallback, and each step may rewrite the request, set or clear the
//! response, or end the chain early.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fetchware::prelude::*;
//!
//! let mut dispatcher = Dispatcher::new(network)?;
//! dispatcher.use_middleware(Use::new(LogRequests::new()))?;
//! dispatcher
//!     .routes()
//!     .get("/users/:id", from_fn(|req, _res, end: EndWith| async move {
//!         end.with(Response::text(format!("user {}", req.param("id").unwrap_or_default())))
//!     }))?;
//!
//! let response = dispatcher.dispatch(Request::get("/users/42")).await?;
//! ```
//!
//! ## Patterns
//!
//! | syntax | meaning |
//! |--------|---------|
//! | `*` | any text, possibly empty |
//! | `:name` | non-empty text, captured as `request.param("name")` |
//! | `\*`, `\:` | literal `*` and `:` |
//! | anything else | regular expression source |
//!
//! Patterns match the end of the URL.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;

pub use dispatcher::{Dispatcher, DispatcherBuilder, FetchEvent, ResponseFuture, Use};

pub use fetchware_core::{
    BoxError, BoxMiddleware, Bytes, Component, DynMiddleware, EndWith, FromFn, HandlerKind,
    HeaderMap, HeaderName, HeaderValue, IntoOutcome, Method, Middleware, Outcome, Params,
    PipelineError, RegistrationError, Request, Response, StatusCode, Terminated, Value, from_fn,
    header,
};

pub use fetchware_std::{
    path::CompiledPath,
    pipeline::{Pipeline, Step},
    report::{FailureSink, LogFailures},
    routing::{MethodProxy, Route, RouteMatch, Router},
};

/// Standard middleware decorators.
pub mod decorators {
    pub use fetchware_std::decorators::{IfNoResponse, LogRequests, MiddlewareExt, StopAfter};
}

/// Testing utilities.
pub mod testing {
    pub use fetchware_std::testing::{CountingMiddleware, RecordingMiddleware, RecordingSink};
}

/// Prelude module - common imports for fetchware.
///
/// # Usage
///
/// ```rust,ignore
/// use fetchware::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Component, Dispatcher, EndWith, FetchEvent, HandlerKind, Method, Middleware, Outcome,
        PipelineError, RegistrationError, Request, Response, Use, Value,
        decorators::{LogRequests, MiddlewareExt},
        from_fn,
    };
}
