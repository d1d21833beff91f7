//! # fetchware-std
//!
//! Standard building blocks for fetchware.
//!
//! - [`path`]: pattern compilation and parameter capture
//! - [`routing`]: the ordered, multi-match router
//! - [`pipeline`]: sequential middleware execution
//! - [`report`]: failure sinks
//! - [`decorators`]: reusable middleware wrappers
//! - [`testing`]: helpers for tests

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod decorators;
pub mod path;
pub mod pipeline;
pub mod report;
pub mod routing;
pub mod testing;

pub use fetchware_core;
