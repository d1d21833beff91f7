//! Conditional middleware - run only while no response exists.

use fetchware_core::{EndWith, IntoOutcome, Middleware, Outcome, Request, Response};

/// A middleware that only runs its inner middleware when the pipeline has no
/// response yet.
///
/// When a response already exists the state is passed through unchanged and
/// the inner middleware is never invoked.
///
/// # Example
///
/// ```rust,ignore
/// // Only go to the cache when nothing upstream produced a response.
/// router.all("*", cache.if_no_response().boxed())?;
/// ```
#[derive(Debug, Clone)]
pub struct IfNoResponse<M> {
    inner: M,
}

impl<M> IfNoResponse<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// The wrapped middleware.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Middleware> Middleware for IfNoResponse<M> {
    type Output = Outcome;

    async fn handle(&self, request: Request, response: Option<Response>, end: EndWith) -> Outcome {
        if response.is_some() {
            return Outcome::Continue(request, response);
        }
        self.inner
            .handle(request.clone(), None, end)
            .await
            .into_outcome(request, None)
    }
}
