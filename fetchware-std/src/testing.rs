//! Testing utilities for fetchware.
//!
//! - [`RecordingMiddleware`]: records every request it sees
//! - [`CountingMiddleware`]: counts invocations
//! - [`RecordingSink`]: collects reported pipeline failures

use crate::report::FailureSink;
use fetchware_core::{EndWith, Middleware, Outcome, PipelineError, Request, Response};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// Ignores poisoning left by a panicking middleware.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that records every request it receives.
///
/// By default it passes the state through unchanged. Use
/// [`RecordingMiddleware::responding`] to make it set a response, or
/// [`RecordingMiddleware::terminating`] to make it end the pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingMiddleware::new();
/// router.get("/users/:id", recorder.clone().boxed())?;
///
/// dispatcher.dispatch(Request::get("/users/42")).await?;
/// assert_eq!(recorder.requests()[0].param("id"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingMiddleware {
    requests: Arc<Mutex<Vec<Request>>>,
    reply: Reply,
}

#[derive(Clone, Default)]
enum Reply {
    #[default]
    PassThrough,
    Respond(Response),
    Terminate(Response),
}

impl RecordingMiddleware {
    /// Create a recorder that continues with the state it received.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that continues with `response`.
    pub fn responding(response: Response) -> Self {
        Self {
            reply: Reply::Respond(response),
            ..Self::default()
        }
    }

    /// Create a recorder that ends the pipeline with `response`.
    pub fn terminating(response: Response) -> Self {
        Self {
            reply: Reply::Terminate(response),
            ..Self::default()
        }
    }

    /// Get a clone of the recorded requests.
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    /// Get the number of recorded requests.
    pub fn count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Clear all recorded requests.
    pub fn clear(&self) {
        lock(&self.requests).clear();
    }
}

impl Middleware for RecordingMiddleware {
    type Output = Outcome;

    async fn handle(&self, request: Request, response: Option<Response>, end: EndWith) -> Outcome {
        lock(&self.requests).push(request.clone());
        match &self.reply {
            Reply::PassThrough => Outcome::Continue(request, response),
            Reply::Respond(reply) => Outcome::Continue(request, Some(reply.clone())),
            Reply::Terminate(reply) => Outcome::Terminate(end.with(reply.clone()).into_response()),
        }
    }
}

// ============================================================================
// Counting Middleware
// ============================================================================

/// A middleware that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingMiddleware::new();
/// pipeline = pipeline.then(counter.clone().boxed());
///
/// pipeline.run(request).await?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingMiddleware {
    count: Arc<AtomicUsize>,
    body: Option<&'static str>,
}

impl CountingMiddleware {
    /// Create a counter that passes the state through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter that continues with a text response of `body`.
    pub fn responding(body: &'static str) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Middleware for CountingMiddleware {
    type Output = (Request, Option<Response>);

    async fn handle(
        &self,
        request: Request,
        response: Option<Response>,
        _end: EndWith,
    ) -> Self::Output {
        self.count.fetch_add(1, Ordering::SeqCst);
        match self.body {
            Some(body) => (request, Some(Response::text(body))),
            None => (request, response),
        }
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// A failure sink that keeps every report as `(step, message)`.
#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<(usize, String)>>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the reports.
    pub fn reports(&self) -> Vec<(usize, String)> {
        lock(&self.reports).clone()
    }

    /// Get the number of reports.
    pub fn count(&self) -> usize {
        lock(&self.reports).len()
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, step: usize, error: &PipelineError) {
        lock(&self.reports).push((step, error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchware_core::DynMiddleware;

    #[tokio::test]
    async fn test_recording_middleware() {
        let recorder = RecordingMiddleware::new();
        let clone = recorder.clone();

        let outcome = recorder.handle_dyn(Request::get("/a"), None).await;
        assert!(matches!(outcome, Outcome::Continue(_, None)));

        assert_eq!(clone.count(), 1);
        assert_eq!(clone.requests()[0].url(), "/a");

        clone.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_recording_middleware_replies() {
        let responding = RecordingMiddleware::responding(Response::text("set"));
        match responding.handle_dyn(Request::get("/"), None).await {
            Outcome::Continue(_, Some(response)) => assert_eq!(response.body_text(), "set"),
            other => panic!("unexpected outcome {other:?}"),
        }

        let terminating = RecordingMiddleware::terminating(Response::text("done"));
        match terminating.handle_dyn(Request::get("/"), None).await {
            Outcome::Terminate(response) => assert_eq!(response.body_text(), "done"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_counting_middleware() {
        let counter = CountingMiddleware::new();

        counter.handle_dyn(Request::get("/"), None).await;
        counter.handle_dyn(Request::get("/"), None).await;
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.report(3, &PipelineError::InvalidReturn);

        assert_eq!(sink.count(), 1);
        assert_eq!(sink.reports()[0].0, 3);
    }
}
