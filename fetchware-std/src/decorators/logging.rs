//! Logging middleware - observability for dispatched requests.

use fetchware_core::{EndWith, Middleware, Request, Response};

/// A middleware that logs each request and passes the state on unchanged.
///
/// # Example
///
/// ```rust,ignore
/// // Log every request before any other middleware sees it.
/// router.all("*", LogRequests::named("fetch").boxed())?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogRequests {
    name: &'static str,
}

impl LogRequests {
    /// Create a new `LogRequests` with a default name.
    pub fn new() -> Self {
        Self { name: "fetch" }
    }

    /// Create a new `LogRequests` with a custom name.
    ///
    /// The name is used in log messages to identify the pipeline stage.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LogRequests {
    type Output = (Request, Option<Response>);

    async fn handle(
        &self,
        request: Request,
        response: Option<Response>,
        _end: EndWith,
    ) -> Self::Output {
        tracing::debug!(
            name = %self.name,
            method = request.method(),
            url = request.url(),
            params = ?request.params(),
            responded = response.is_some(),
            "request passing through"
        );
        (request, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchware_core::{DynMiddleware, Outcome};

    #[tokio::test]
    async fn test_logging_continues_unchanged() {
        let outcome = LogRequests::new()
            .handle_dyn(Request::get("/logged"), Some(Response::text("body")))
            .await;

        match outcome {
            Outcome::Continue(request, Some(response)) => {
                assert_eq!(request.url(), "/logged");
                assert_eq!(response.body_text(), "body");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_logging_named_keeps_missing_response() {
        let outcome = LogRequests::named("edge")
            .handle_dyn(Request::get("/"), None)
            .await;
        assert!(matches!(outcome, Outcome::Continue(_, None)));
    }
}
