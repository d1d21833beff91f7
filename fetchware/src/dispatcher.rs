//! The request dispatcher: route table, fallback and event binding.
//!
//! A [`Dispatcher`] lives in two phases. During setup it is owned and
//! mutable, and routes are registered through [`Dispatcher::use_middleware`]
//! or [`Dispatcher::routes`]. [`Dispatcher::init`] moves it into an `Arc`,
//! after which the route table is read-only and every intercepted request
//! gets its own [`Pipeline`].

use fetchware_core::{
    BoxMiddleware, HandlerKind, Method, Params, PipelineError, RegistrationError, Request,
    Response,
};
use fetchware_std::{
    pipeline::Pipeline,
    report::{FailureSink, LogFailures},
    routing::{MethodProxy, Router},
};
use futures::{FutureExt, future::BoxFuture};
use std::{fmt, sync::Arc};

/// The future handed to [`FetchEvent::respond_with`].
pub type ResponseFuture = BoxFuture<'static, Result<Option<Response>, PipelineError>>;

/// An intercepted request as delivered by the host environment.
///
/// The host owns the event; the dispatcher only reads the request and hands
/// back the future that will produce the reply.
pub trait FetchEvent {
    /// The intercepted request.
    fn request(&self) -> Request;

    /// Accept the pending reply.
    fn respond_with(&self, response: ResponseFuture);
}

/// Registration of a middleware for every request, or for a path and verb.
///
/// # Example
///
/// ```rust,ignore
/// dispatcher.use_middleware(Use::new(LogRequests::new()))?;
/// dispatcher.use_middleware(Use::new(auth).at("/admin/*").method(Method::Post))?;
/// ```
#[derive(Debug)]
pub struct Use {
    handler: HandlerKind,
    path: Option<String>,
    method: Method,
}

impl Use {
    /// Register `handler` for every verb on the dispatcher's default path.
    pub fn new(handler: impl Into<HandlerKind>) -> Self {
        Self {
            handler: handler.into(),
            path: None,
            method: Method::All,
        }
    }

    /// Restrict to URLs matching `pattern`.
    pub fn at(mut self, pattern: impl Into<String>) -> Self {
        self.path = Some(pattern.into());
        self
    }

    /// Restrict to one verb.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

/// Routes intercepted requests through matching middleware, then the
/// fallback.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = Dispatcher::new(network)?;
/// dispatcher.routes().get("/users/:id", load_user)?;
///
/// let dispatcher = dispatcher.init(|d| host.on_fetch(move |event| d.on_fetch(&event)));
/// ```
pub struct Dispatcher {
    router: Router<BoxMiddleware>,
    fallback: BoxMiddleware,
    sink: Arc<dyn FailureSink>,
    default_path: String,
}

impl Dispatcher {
    /// Create a dispatcher whose pipelines end with `fallback`.
    pub fn new(fallback: impl Into<HandlerKind>) -> Result<Self, RegistrationError> {
        Self::builder().fallback(fallback).build()
    }

    /// Start configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Register a middleware.
    ///
    /// Without [`Use::at`] the middleware applies to the default path, which
    /// matches every URL unless configured otherwise. A component without a
    /// fetch handler is accepted and left out of the route table; the
    /// [`Dispatcher::routes`] shortcuts reject it instead.
    pub fn use_middleware(&mut self, entry: Use) -> Result<&mut Self, RegistrationError> {
        let Use {
            handler,
            path,
            method,
        } = entry;
        let pattern = path.unwrap_or_else(|| self.default_path.clone());

        let handler = match handler.resolve() {
            Ok(handler) => handler,
            Err(RegistrationError::UnsupportedHandler(name)) => {
                tracing::trace!(component = %name, pattern = %pattern, "no fetch handler, not routed");
                return Ok(self);
            }
            Err(err) => return Err(err),
        };
        self.router.insert(method, &pattern, handler)?;
        Ok(self)
    }

    /// Verb-named registration shortcuts.
    pub fn routes(&mut self) -> MethodProxy<'_> {
        self.router.proxy_methods()
    }

    /// The route table.
    pub fn router(&self) -> &Router<BoxMiddleware> {
        &self.router
    }

    /// The pipeline that would serve `request`: every matching route in
    /// registration order, then the fallback.
    pub fn pipeline_for(&self, request: &Request) -> Pipeline {
        let mut pipeline = Pipeline::from_matches(
            self.router.match_route(request.method(), request.url()),
        )
        .with_shared_sink(Arc::clone(&self.sink));
        pipeline.push(Arc::clone(&self.fallback), Params::new());
        pipeline
    }

    /// Run the pipeline for `request`.
    pub async fn dispatch(&self, request: Request) -> Result<Option<Response>, PipelineError> {
        self.pipeline_for(&request).run(request).await
    }

    /// Serve an intercepted request.
    ///
    /// The pipeline is built synchronously; the event receives a future that
    /// owns it and resolves with the pipeline's result.
    pub fn on_fetch<E: FetchEvent + ?Sized>(&self, event: &E) {
        let request = event.request();
        let pipeline = self.pipeline_for(&request);
        event.respond_with(async move { pipeline.run(request).await }.boxed());
    }

    /// Enter the running phase.
    ///
    /// Freezes the route table and calls `register` once, with the shared
    /// dispatcher, so the host can bind it to its request events.
    pub fn init(self, register: impl FnOnce(Arc<Dispatcher>)) -> Arc<Dispatcher> {
        let dispatcher = Arc::new(self);
        tracing::debug!(routes = dispatcher.router.len(), "dispatcher initialized");
        register(Arc::clone(&dispatcher));
        dispatcher
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.router.len())
            .field("default_path", &self.default_path)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder {
    fallback: Option<HandlerKind>,
    sink: Arc<dyn FailureSink>,
    default_path: String,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// Create a builder with the logging failure sink and the `*` default
    /// path.
    pub fn new() -> Self {
        Self {
            fallback: None,
            sink: Arc::new(LogFailures),
            default_path: "*".to_string(),
        }
    }

    /// Set the handler every pipeline ends with.
    pub fn fallback(mut self, fallback: impl Into<HandlerKind>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Set where pipeline failures are reported.
    pub fn failure_sink(mut self, sink: impl FailureSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Set the pattern used by [`Dispatcher::use_middleware`] when no path is
    /// given.
    pub fn default_path(mut self, pattern: impl Into<String>) -> Self {
        self.default_path = pattern.into();
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Result<Dispatcher, RegistrationError> {
        let fallback = self
            .fallback
            .ok_or(RegistrationError::MissingFallback)?
            .resolve()?;

        Ok(Dispatcher {
            router: Router::new(),
            fallback,
            sink: self.sink,
            default_path: self.default_path,
        })
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("fallback", &self.fallback)
            .field("default_path", &self.default_path)
            .finish_non_exhaustive()
    }
}
