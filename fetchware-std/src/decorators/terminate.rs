//! Force-terminating middleware.

use fetchware_core::{
    EndWith, IntoOutcome, Middleware, Outcome, PipelineError, Request, Response,
};

/// A middleware that always ends the pipeline after its inner middleware.
///
/// `Continue` and `Terminate` outcomes both become `Terminate` with the
/// resulting response. A `Continue` without a response cannot terminate and
/// fails with [`PipelineError::EndWithoutResponse`]. Errors pass through.
#[derive(Debug, Clone)]
pub struct StopAfter<M> {
    inner: M,
}

impl<M> StopAfter<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// The wrapped middleware.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Middleware> Middleware for StopAfter<M> {
    type Output = Outcome;

    async fn handle(&self, request: Request, response: Option<Response>, end: EndWith) -> Outcome {
        let output = self
            .inner
            .handle(request.clone(), response.clone(), end)
            .await;

        match output.into_outcome(request, response) {
            Outcome::Continue(_, Some(response)) | Outcome::Terminate(response) => {
                Outcome::Terminate(response)
            }
            Outcome::Continue(_, None) => Outcome::Error(PipelineError::EndWithoutResponse),
            failed @ Outcome::Error(_) => failed,
        }
    }
}
