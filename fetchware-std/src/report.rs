//! Failure reporting for pipelines.

use fetchware_core::PipelineError;

/// Receives the failure that ended a pipeline, once per failed dispatch.
///
/// The pipeline still returns the error to its caller; a sink only makes
/// sure the failure is surfaced even if the caller swallows it.
pub trait FailureSink: Send + Sync + 'static {
    /// Called with the index of the failing step and its error.
    fn report(&self, step: usize, error: &PipelineError);
}

/// The default sink: logs the failure with `tracing` at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFailures;

impl FailureSink for LogFailures {
    fn report(&self, step: usize, error: &PipelineError) {
        tracing::error!(step, %error, "middleware pipeline failed");
    }
}

impl<F> FailureSink for F
where
    F: Fn(usize, &PipelineError) + Send + Sync + 'static,
{
    fn report(&self, step: usize, error: &PipelineError) {
        (self)(step, error)
    }
}
