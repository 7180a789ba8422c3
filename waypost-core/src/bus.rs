//! Event bus contract.
//!
//! The host's named-channel publish/subscribe primitive. Dispatch emits
//! the full registration record on a channel; any number of subscribers
//! per channel receive it in subscription order.

use crate::{callback::ArcCallback, error::BoxError, payload::Payload};

/// A named-channel publish/subscribe primitive.
///
/// Channels hold an unbounded number of subscribers. Delivery is
/// synchronous and sequential; the first subscriber error stops delivery
/// on that channel and is returned unmodified.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot carry payloads of type `{P}`",
    label = "missing `EventBus` implementation",
    note = "Implement `EventBus<{P}>` to bridge Waypost to the host's event system."
)]
pub trait EventBus<P: Payload>: Send + Sync {
    /// Subscribe a handler to a channel.
    fn subscribe(&mut self, channel: &str, handler: ArcCallback<P>);

    /// Emit a payload on a channel.
    ///
    /// Returns the number of handlers invoked. A channel with no
    /// subscribers is not an error; the emit simply reports zero.
    fn emit(&self, channel: &str, payload: &P) -> Result<usize, BoxError>;
}
