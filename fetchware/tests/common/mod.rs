#![allow(dead_code)]

use fetchware::{
    FetchEvent, Request, Response, ResponseFuture, Router,
    decorators::{IfNoResponse, MiddlewareExt},
    testing::RecordingMiddleware,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

// ============================================================================
// Router helpers
// ============================================================================

/// Labels of every route matching `method` and `url`, in match order.
pub fn matched(router: &Router<&'static str>, method: &str, url: &str) -> Vec<&'static str> {
    router
        .match_route(method, url)
        .into_iter()
        .map(|m| *m.handler)
        .collect()
}

// ============================================================================
// Fallbacks
// ============================================================================

/// A fallback standing in for the network: replies only when nothing
/// upstream did.
pub fn network(recorder: &RecordingMiddleware) -> IfNoResponse<RecordingMiddleware> {
    recorder.clone().if_no_response()
}

/// A recorder replying with the body `from_network`.
pub fn network_recorder() -> RecordingMiddleware {
    RecordingMiddleware::responding(Response::text("from_network"))
}

// ============================================================================
// Test event
// ============================================================================

/// A fetch event that stores the future it is handed.
pub struct TestEvent {
    pub request: Request,
    pending: Mutex<Vec<ResponseFuture>>,
}

impl TestEvent {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `respond_with` was called.
    pub fn responded(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Take the first pending reply.
    pub fn take(&self) -> ResponseFuture {
        self.pending.lock().unwrap().remove(0)
    }
}

impl FetchEvent for TestEvent {
    fn request(&self) -> Request {
        self.request.clone()
    }

    fn respond_with(&self, response: ResponseFuture) {
        self.pending.lock().unwrap().push(response);
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// A tracing layer counting `ERROR` events.
#[derive(Clone, Default)]
pub struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
