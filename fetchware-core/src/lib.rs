//! # fetchware-core
//!
//! Core types and traits for the fetchware request dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! middleware authors that don't need the router or pipeline engine from
//! `fetchware-std`.
//!
//! # Building Blocks
//!
//! ## Data ([`Request`], [`Response`], [`Params`], [`Method`])
//!
//! Owned, cheaply cloneable values. A pipeline threads a
//! `(Request, Option<Response>)` pair through its steps, replacing it after
//! each one.
//!
//! ## Middleware ([`Middleware`])
//!
//! The unit of work. Receives the current request, the response produced so
//! far and the termination primitive ([`EndWith`]).
//!
//! ## Outcome ([`Outcome`], [`IntoOutcome`])
//!
//! Every step resolves to exactly one of `Continue`, `Terminate` or `Error`.
//! Middleware either builds the outcome itself or returns a type that
//! converts into one.
//!
//! ## Handler shapes ([`HandlerKind`], [`Component`])
//!
//! The closed set of things that can be registered as a route handler,
//! resolved once at registration time.
//!
//! # Error Types
//!
//! - [`RegistrationError`] - Route and middleware registration errors
//! - [`PipelineError`] - Pipeline execution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod method;
mod middleware;
mod outcome;
mod request;
mod response;

// Re-exports
pub use error::{BoxError, INVALID_RETURN_MESSAGE, PipelineError, RegistrationError};
pub use handler::{Component, HandlerKind};
pub use method::Method;
pub use middleware::{BoxMiddleware, DynMiddleware, FromFn, Middleware, from_fn};
pub use outcome::{EndWith, IntoOutcome, Outcome, Terminated, Value};
pub use request::{Params, Request};
pub use response::Response;

pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
