//! # Pipeline engine
//!
//! Runs an ordered list of middleware steps against one request.
//!
//! ```text
//! Running(0, request, None)
//!   ── Continue(req, res) ──▶ Running(i + 1, req, res)
//!   ── Terminate(res)     ──▶ Ok(Some(res))        later steps never run
//!   ── Error(e)           ──▶ report(e); Err(e)    later steps never run
//! Running(len, _, res)    ──▶ Ok(res)
//! ```
//!
//! Each step suspends until its middleware resolves. There is no retry, no
//! timeout and no way to cancel a started pipeline from outside.

use crate::{
    report::{FailureSink, LogFailures},
    routing::RouteMatch,
};
use fetchware_core::{BoxMiddleware, Outcome, Params, PipelineError, Request, Response};
use futures::FutureExt;
use std::{any::Any, fmt, panic::AssertUnwindSafe, sync::Arc};
use tracing::Instrument;

/// One middleware together with the route parameters it was matched with.
#[derive(Clone)]
pub struct Step {
    handler: BoxMiddleware,
    params: Params,
}

impl Step {
    /// Create a step.
    pub fn new(handler: BoxMiddleware, params: Params) -> Self {
        Self { handler, params }
    }

    /// The middleware.
    pub fn handler(&self) -> &BoxMiddleware {
        &self.handler
    }

    /// Parameters attached to the request before the middleware runs.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl From<RouteMatch<'_, BoxMiddleware>> for Step {
    fn from(matched: RouteMatch<'_, BoxMiddleware>) -> Self {
        Step::new(Arc::clone(matched.handler), matched.params)
    }
}

/// An ordered list of middleware steps for one dispatch.
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
    sink: Arc<dyn FailureSink>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create an empty pipeline that logs failures.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            sink: Arc::new(LogFailures),
        }
    }

    /// Build a pipeline from router matches, in match order.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = RouteMatch<'a, BoxMiddleware>>,
    {
        let mut pipeline = Self::new();
        pipeline.steps.extend(matches.into_iter().map(Step::from));
        pipeline
    }

    /// Replace the failure sink.
    pub fn with_sink(self, sink: impl FailureSink) -> Self {
        self.with_shared_sink(Arc::new(sink))
    }

    /// Replace the failure sink with a shared one.
    pub fn with_shared_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Append a step.
    pub fn push(&mut self, handler: BoxMiddleware, params: Params) -> &mut Self {
        self.steps.push(Step::new(handler, params));
        self
    }

    /// Append a step, builder style.
    pub fn then(mut self, handler: BoxMiddleware) -> Self {
        self.push(handler, Params::new());
        self
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `request`.
    ///
    /// Resolves with the terminating response, or with whatever response is
    /// current once the steps are exhausted (possibly `None`). A failing step
    /// is reported to the failure sink exactly once and returned as `Err`.
    pub async fn run(&self, request: Request) -> Result<Option<Response>, PipelineError> {
        let span = tracing::debug_span!(
            "dispatch",
            method = request.method(),
            url = request.url(),
            steps = self.steps.len()
        );
        self.drive(request).instrument(span).await
    }

    async fn drive(&self, mut request: Request) -> Result<Option<Response>, PipelineError> {
        let mut response = None;

        for (index, step) in self.steps.iter().enumerate() {
            request = request.with_params(step.params.clone());
            tracing::trace!(step = index, params = ?step.params, "running middleware");

            let invocation = step.handler.handle_dyn(request, response);
            let outcome = match AssertUnwindSafe(invocation).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(panic) => Outcome::Error(PipelineError::Panicked(panic_message(panic))),
            };

            match outcome {
                Outcome::Continue(next_request, next_response) => {
                    request = next_request;
                    response = next_response;
                }
                Outcome::Terminate(end) => {
                    tracing::debug!(step = index, status = end.status().as_u16(), "pipeline terminated");
                    return Ok(Some(end));
                }
                Outcome::Error(error) => {
                    self.sink.report(index, &error);
                    return Err(error);
                }
            }
        }

        tracing::trace!(responded = response.is_some(), "pipeline exhausted");
        Ok(response)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => panic
            .downcast_ref::<&str>()
            .map_or_else(|| "unknown panic".to_string(), |s| s.to_string()),
    }
}
