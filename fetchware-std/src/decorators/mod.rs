//! Standard middleware decorators.
//!
//! - [`IfNoResponse`]: run the inner middleware only while no response exists
//! - [`StopAfter`]: end the pipeline with whatever the inner middleware produced
//! - [`LogRequests`]: trace each request passing through

mod conditional;
mod logging;
mod terminate;

pub use conditional::IfNoResponse;
pub use logging::LogRequests;
pub use terminate::StopAfter;

use fetchware_core::{BoxMiddleware, Middleware};
use std::sync::Arc;

/// Combinators available on every [`Middleware`].
pub trait MiddlewareExt: Middleware + Sized {
    /// Skip this middleware when a response has already been produced.
    fn if_no_response(self) -> IfNoResponse<Self> {
        IfNoResponse::new(self)
    }

    /// End the pipeline right after this middleware.
    fn stop_after(self) -> StopAfter<Self> {
        StopAfter::new(self)
    }

    /// Erase the type.
    fn boxed(self) -> BoxMiddleware {
        Arc::new(self)
    }
}

impl<M: Middleware> MiddlewareExt for M {}
