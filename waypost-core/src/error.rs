//! Error types for Waypost.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WaypostError`] - Top-level error type for all Waypost operations
//! - [`RegistryError`] - Errors from path registration
//! - [`RewriteError`] - Errors from rewrite-rule compilation
//! - [`DispatchError`] - Errors surfaced while dispatching a request

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Waypost operations.
#[derive(Error, Debug)]
pub enum WaypostError {
    /// An error occurred while registering a path.
    #[error("registration error: {0}")]
    Registry(#[from] RegistryError),

    /// An error occurred while compiling rewrite rules.
    #[error("rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// An error occurred while dispatching a request.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur during path registration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The path specification carried no path.
    #[error("path specification has an empty path")]
    EmptyPath,
}

/// Errors that can occur while compiling rewrite rules.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The sink rejected a rule pattern.
    #[error("invalid rewrite pattern `{pattern}`")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying rejection.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while dispatching a resolved request.
///
/// Handler and template failures are propagated unmodified as sources;
/// this component neither catches nor wraps their semantics.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The registration's own handler failed.
    #[error("path handler failed")]
    Handler(#[source] BoxError),

    /// A bus subscriber failed during delivery.
    #[error("event delivery failed on channel `{channel}`")]
    Emit {
        /// The channel being emitted.
        channel: String,
        /// The subscriber error.
        #[source]
        source: BoxError,
    },

    /// The template loader failed.
    #[error("template `{template}` failed to render")]
    Template {
        /// The template identifier.
        template: String,
        /// The loader error.
        #[source]
        source: BoxError,
    },
}

// Convenience conversions
impl From<BoxError> for WaypostError {
    fn from(err: BoxError) -> Self {
        WaypostError::Custom(err)
    }
}
