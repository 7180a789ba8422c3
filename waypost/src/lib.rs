//! # waypost
//!
//! Path-based request dispatch atop a host web platform's URL-rewriting
//! and event-hook machinery.
//!
//! Callers register virtual paths (and custom rewrite patterns) with a
//! [`PathRegistry`]. The registry compiles them into rewrite rules for
//! the host's rewrite engine, and a [`PathDispatcher`] maps each resolved
//! request back to its registration: invoking the stored callback or
//! emitting a named event channel, optionally rendering a template and
//! halting the request.
//!
//! The host seams — event bus, rewrite sink, resolved query, template
//! loader — are trait contracts defined in `waypost-core`; this crate
//! ships standard in-memory implementations ([`ChannelBus`], [`RuleSet`],
//! [`ResolvedQuery`]) for embedders and tests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::{ChannelBus, DispatchPath, PathDispatcher, PathRegistry, RuleSet};
//!
//! let mut registry = PathRegistry::new();
//! registry.register(
//!     DispatchPath::new("changelog")
//!         .callback(|record: &DispatchPath| println!("serving {}", record.path)),
//! )?;
//!
//! let mut rules = RuleSet::new();
//! registry.compile_rules(&mut rules)?;
//!
//! let bus = ChannelBus::new();
//! let templates = /* host template loader */;
//! let dispatcher = PathDispatcher::new(&registry, &bus, &templates);
//!
//! if let Some(query) = rules.resolve("/changelog/") {
//!     dispatcher.dispatch(&query)?;
//! }
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod dispatch;
mod path;
mod registry;
mod rules;
pub mod testing;

// Re-exports
pub use bus::ChannelBus;
pub use dispatch::{DispatchOutcome, PathDispatcher};
pub use path::{DispatchPath, PathRewrite};
pub use registry::{DEFAULT_TARGET, DISPATCH_VAR, PathRegistry, dispatch_channel};
pub use rules::{ResolvedQuery, RuleSet};

pub use waypost_core::{
    // Handler contract
    ArcCallback,
    // Errors
    BoxError,
    Callback,
    DispatchError,
    // Host seams
    EventBus,
    Payload,
    RegistryError,
    RequestQuery,
    RewriteError,
    RewriteRule,
    RewriteSink,
    RulePosition,
    TemplateLoader,
    WaypostError,
};

/// Prelude module - common imports for Waypost.
///
/// # Usage
///
/// ```rust,ignore
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Callback, ChannelBus, DispatchOutcome, DispatchPath, EventBus, PathDispatcher,
        PathRegistry, PathRewrite, RequestQuery, ResolvedQuery, RewriteSink, RuleSet,
        TemplateLoader,
    };
}
