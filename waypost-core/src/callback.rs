//! # Handler Contract (Callback)
//!
//! The terminal point of a dispatched path: the user code that runs when a
//! registered path resolves.
//!
//! # Design
//!
//! - **Synchronous**: the host's request model is one synchronous pass per
//!   request; handlers run inline and must not block on external work.
//! - **Fallible**: a handler error is propagated unmodified to the
//!   embedder's own fault handling, never caught here.
//! - **Object-safe**: handlers are stored and invoked as trait objects, so
//!   registries can hold arbitrary handler types behind [`ArcCallback`].

use crate::{error::BoxError, payload::Payload};
use std::sync::Arc;

/// A handler invoked when a dispatched path resolves.
///
/// Implemented automatically for infallible `Fn(&P)` closures. Handlers
/// that can fail implement the trait directly and surface their error,
/// which the dispatcher propagates unmodified.
///
/// The payload is the full registration record, so a handler sees every
/// caller-supplied field of the path it serves.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle payloads of type `{P}`",
    label = "missing `Callback` implementation",
    note = "Implement `Callback<{P}>` or use an `Fn(&{P})` closure."
)]
pub trait Callback<P: Payload>: Send + Sync {
    /// Invoke the handler with the registration record as payload.
    fn invoke(&self, payload: &P) -> Result<(), BoxError>;
}

// Blanket implementation: any infallible closure over the payload is a
// valid handler.
impl<P, F> Callback<P> for F
where
    P: Payload,
    F: Fn(&P) + Send + Sync,
{
    fn invoke(&self, payload: &P) -> Result<(), BoxError> {
        self(payload);
        Ok(())
    }
}

/// A shared, clonable handler reference.
pub type ArcCallback<P> = Arc<dyn Callback<P>>;
