//! Shared types for the Goddard enrollment portal.
//!
//! Both the actix backend and the yew front end depend on this crate. It holds
//! the wire models, the request payloads, and the tabular resource core that
//! every admin page is built on: a store per entity kind, a filter pipeline, a
//! two-viewport paginator and a mutation coordinator that only touches local
//! state once the backing service has confirmed a change.

pub mod export;
pub mod model;
pub mod portal;
pub mod query;
pub mod requests;
pub mod table;
pub mod validation;
