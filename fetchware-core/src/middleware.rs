//! # Middleware
//!
//! The unit of work in a fetchware pipeline. A middleware receives the
//! current request, the response produced so far (if any) and the
//! termination primitive, and returns something convertible into an
//! [`Outcome`].
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Middleware`] uses native `async fn` for static dispatch. Routers and
//! pipelines store [`BoxMiddleware`], the shared object-safe form produced by
//! the blanket [`DynMiddleware`] impl.

use crate::{
    outcome::{EndWith, IntoOutcome, Outcome},
    request::Request,
    response::Response,
};
use std::{future::Future, pin::Pin, sync::Arc};

/// A request handler that takes part in a pipeline.
///
/// # Example
///
/// ```rust,ignore
/// struct Cors;
///
/// impl Middleware for Cors {
///     type Output = Option<Response>;
///
///     async fn handle(&self, _req: Request, res: Option<Response>, _end: EndWith) -> Self::Output {
///         res.map(|r| r.with_header(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Middleware`",
    label = "missing `Middleware` implementation",
    note = "Wrap closures with `from_fn`, or implement `handle` for the type."
)]
pub trait Middleware: Send + Sync + 'static {
    /// What the middleware returns; normalized into an [`Outcome`].
    type Output: IntoOutcome;

    /// Handle one pipeline step.
    fn handle(
        &self,
        request: Request,
        response: Option<Response>,
        end: EndWith,
    ) -> impl Future<Output = Self::Output> + Send;
}

/// Dynamic object-safe version of [`Middleware`].
///
/// Implemented for every [`Middleware`]; the returned future already
/// normalizes the output against the state the step was invoked with.
pub trait DynMiddleware: Send + Sync + 'static {
    /// Handle one pipeline step (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: Request,
        response: Option<Response>,
    ) -> Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;
}

impl<M: Middleware> DynMiddleware for M {
    fn handle_dyn<'a>(
        &'a self,
        request: Request,
        response: Option<Response>,
    ) -> Pin<Box<dyn Future<Output = Outcome> + Send + 'a>> {
        Box::pin(async move {
            let output = self
                .handle(request.clone(), response.clone(), EndWith::new())
                .await;
            output.into_outcome(request, response)
        })
    }
}

/// A shared, type-erased middleware.
pub type BoxMiddleware = Arc<dyn DynMiddleware>;

/// Adapts an async closure into a [`Middleware`].
///
/// Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

/// Wrap an async closure taking `(request, response, end)`.
///
/// ```rust,ignore
/// let hello = from_fn(|_req, _res, end: EndWith| async move {
///     end.with(Response::text("hello"))
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request, Option<Response>, EndWith) -> Fut + Send + Sync + 'static,
    Fut: Future + Send,
    Fut::Output: IntoOutcome,
{
    FromFn { f }
}

impl<F, Fut> Middleware for FromFn<F>
where
    F: Fn(Request, Option<Response>, EndWith) -> Fut + Send + Sync + 'static,
    Fut: Future + Send,
    Fut::Output: IntoOutcome,
{
    type Output = Fut::Output;

    fn handle(
        &self,
        request: Request,
        response: Option<Response>,
        end: EndWith,
    ) -> impl Future<Output = Self::Output> + Send {
        (self.f)(request, response, end)
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn")
            .field("f", &std::any::type_name::<F>())
            .finish()
    }
}
