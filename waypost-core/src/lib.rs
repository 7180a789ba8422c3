//! # waypost-core
//!
//! Host-facing contracts for the Waypost path dispatch library.
//!
//! Waypost sits atop a host web platform's URL-rewriting and event-hook
//! machinery. This crate defines the seams to that host, with minimal
//! dependencies so host adapters can implement them without pulling in
//! the full `waypost` crate:
//!
//! - [`EventBus`] — the named-channel publish/subscribe primitive
//! - [`RewriteSink`] — the recipient of compiled rewrite rules
//! - [`RequestQuery`] — resolved query variables and the main-query predicate
//! - [`TemplateLoader`] — template rendering before request halting
//! - [`Callback`] — the handler contract for dispatched paths
//!
//! # Error Types
//!
//! - [`WaypostError`] - Top-level error type
//! - [`RegistryError`] - Path registration errors
//! - [`RewriteError`] - Rewrite-rule compilation errors
//! - [`DispatchError`] - Request dispatch errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod callback;
mod error;
mod payload;
mod query;
mod rewrite;
mod template;

// Re-exports
pub use bus::EventBus;
pub use callback::{ArcCallback, Callback};
pub use error::{BoxError, DispatchError, RegistryError, RewriteError, WaypostError};
pub use payload::Payload;
pub use query::RequestQuery;
pub use rewrite::{RewriteRule, RewriteSink, RulePosition};
pub use template::TemplateLoader;
