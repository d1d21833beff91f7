//! # Routing
//!
//! - [`Router`]: ordered route table with multi-match lookup.
//! - [`MethodProxy`]: verb shortcuts over a router of boxed middleware that
//!   accept any [`HandlerKind`](fetchware_core::HandlerKind).
//!
//! # Matching rules
//!
//! | rule | behavior |
//! |------|----------|
//! | order | matches are returned in registration order |
//! | method | a route matches its own verb, `all` routes match every verb |
//! | unknown verb | lookup returns no matches instead of failing |
//! | pattern | suffix match, see [`crate::path`] |

mod proxy;
mod router;

pub use proxy::MethodProxy;
pub use router::{Route, RouteMatch, Router};
