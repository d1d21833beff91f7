//! Pipeline outcomes and middleware return-value conversion.
//!
//! Every middleware step resolves to exactly one [`Outcome`]. Middleware can
//! build an `Outcome` directly, or return any type implementing
//! [`IntoOutcome`], which is normalized against the current pipeline state.
//!
//! # Default Implementations
//!
//! - [`Outcome`] → As is
//! - [`Terminated`] → `Terminate`
//! - `Option<Response>` → `None` clears the response, `Some` replaces it
//! - [`Response`] → `Continue` with the current request
//! - [`Request`] → `Continue` with the current response
//! - `(Request, Option<Response>)`, `(Request, Response)` → `Continue`
//! - [`Value`] → Loosely typed return values, see [`Value::into_outcome`]
//! - `Result<T, E>` → Delegates to inner `T`, an `Err` fails the pipeline
//! - `()`, strings, booleans, numbers → Fail with [`PipelineError::InvalidReturn`]

use crate::{
    error::{BoxError, PipelineError},
    request::Request,
    response::Response,
};

/// Result of one middleware step.
#[derive(Debug)]
pub enum Outcome {
    /// Continue with the next middleware using this state.
    Continue(Request, Option<Response>),
    /// Stop the pipeline and resolve with this response.
    Terminate(Response),
    /// Stop the pipeline and resolve with this failure.
    Error(PipelineError),
}

/// Proof that a middleware asked to end the pipeline.
///
/// Only [`EndWith`] can produce this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminated(Response);

impl Terminated {
    /// The response the pipeline ends with.
    pub fn response(&self) -> &Response {
        &self.0
    }

    /// Take the response out.
    pub fn into_response(self) -> Response {
        self.0
    }
}

/// The termination primitive handed to every middleware.
///
/// Returning the [`Terminated`] it produces halts the pipeline immediately;
/// no later middleware runs, including the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndWith {
    _private: (),
}

impl EndWith {
    /// Create the primitive for one middleware invocation.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// End the pipeline with `response`.
    pub fn with(self, response: Response) -> Terminated {
        Terminated(response)
    }

    /// End the pipeline with `response`, failing when there is none.
    ///
    /// Useful to re-supply the current response:
    /// `end.with_optional(response)?`.
    pub fn with_optional(self, response: Option<Response>) -> Result<Terminated, PipelineError> {
        response
            .map(Terminated)
            .ok_or(PipelineError::EndWithoutResponse)
    }
}

/// A loosely typed middleware return value.
///
/// Mirrors the shapes accepted from handlers that do not construct an
/// [`Outcome`] themselves.
#[derive(Debug, Clone)]
pub enum Value {
    /// Nothing was returned.
    Undefined,
    /// An explicit "no response".
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A request.
    Request(Request),
    /// A response.
    Response(Response),
    /// The result of the termination primitive.
    End(Terminated),
}

impl Value {
    /// Build the `[request, response]` pair.
    pub fn pair(request: Request, response: Option<Response>) -> Self {
        Value::List(vec![Value::Request(request), response.into()])
    }

    /// Normalize against the current state.
    ///
    /// Checked in order: termination, null, two-element pair, response,
    /// request. Everything else is an [`PipelineError::InvalidReturn`].
    pub fn into_outcome(self, request: Request, response: Option<Response>) -> Outcome {
        match self {
            Value::End(terminated) => Outcome::Terminate(terminated.into_response()),
            Value::Null => Outcome::Continue(request, None),
            Value::List(items) => match <[Value; 2]>::try_from(items) {
                Ok([Value::Request(next), Value::Response(res)]) => {
                    Outcome::Continue(next, Some(res))
                }
                Ok([Value::Request(next), Value::Null]) => Outcome::Continue(next, None),
                _ => Outcome::Error(PipelineError::InvalidReturn),
            },
            Value::Response(res) => Outcome::Continue(request, Some(res)),
            Value::Request(next) => Outcome::Continue(next, response),
            Value::Undefined | Value::Bool(_) | Value::Number(_) | Value::Text(_) => {
                Outcome::Error(PipelineError::InvalidReturn)
            }
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Request> for Value {
    fn from(request: Request) -> Self {
        Value::Request(request)
    }
}

impl From<Response> for Value {
    fn from(response: Response) -> Self {
        Value::Response(response)
    }
}

impl From<Option<Response>> for Value {
    fn from(response: Option<Response>) -> Self {
        response.map_or(Value::Null, Value::Response)
    }
}

impl From<Terminated> for Value {
    fn from(terminated: Terminated) -> Self {
        Value::End(terminated)
    }
}

/// Trait for converting a middleware's output into an [`Outcome`].
///
/// `request` and `response` are the pipeline state the middleware was
/// invoked with; implementations fill in whatever the output leaves out.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "missing `IntoOutcome` implementation",
    note = "Middleware must return a Response, a Request, a pair, an Outcome or the result of `EndWith`."
)]
pub trait IntoOutcome: Send {
    /// Convert the output into the outcome of this step.
    fn into_outcome(self, request: Request, response: Option<Response>) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self, _request: Request, _response: Option<Response>) -> Outcome {
        self
    }
}

impl IntoOutcome for Terminated {
    fn into_outcome(self, _request: Request, _response: Option<Response>) -> Outcome {
        Outcome::Terminate(self.0)
    }
}

impl IntoOutcome for Response {
    fn into_outcome(self, request: Request, _response: Option<Response>) -> Outcome {
        Outcome::Continue(request, Some(self))
    }
}

impl IntoOutcome for Option<Response> {
    fn into_outcome(self, request: Request, _response: Option<Response>) -> Outcome {
        Outcome::Continue(request, self)
    }
}

impl IntoOutcome for Request {
    fn into_outcome(self, _request: Request, response: Option<Response>) -> Outcome {
        Outcome::Continue(self, response)
    }
}

impl IntoOutcome for (Request, Option<Response>) {
    fn into_outcome(self, _request: Request, _response: Option<Response>) -> Outcome {
        Outcome::Continue(self.0, self.1)
    }
}

impl IntoOutcome for (Request, Response) {
    fn into_outcome(self, _request: Request, _response: Option<Response>) -> Outcome {
        Outcome::Continue(self.0, Some(self.1))
    }
}

impl IntoOutcome for Value {
    fn into_outcome(self, request: Request, response: Option<Response>) -> Outcome {
        Value::into_outcome(self, request, response)
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError> + Send,
{
    fn into_outcome(self, request: Request, response: Option<Response>) -> Outcome {
        match self {
            Ok(t) => t.into_outcome(request, response),
            Err(e) => Outcome::Error(PipelineError::from_boxed(e.into())),
        }
    }
}

// Scalars and the unit type are never valid middleware results.
macro_rules! invalid_outcome {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoOutcome for $ty {
                fn into_outcome(self, _request: Request, _response: Option<Response>) -> Outcome {
                    Outcome::Error(PipelineError::InvalidReturn)
                }
            }
        )+
    };
}

invalid_outcome!((), bool, i32, i64, u32, u64, f64, String, &'static str);
