//! Payload trait for bus payload types.

/// A marker trait for values carried through the event bus.
///
/// Payloads must be `Send + Sync + 'static` so a bus and its subscribers
/// may be shared behind whatever synchronization the embedder chooses.
///
/// # Example
///
/// ```rust,ignore
/// struct PathRecord { path: String }
///
/// impl Payload for PathRecord {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Payload",
    label = "must be `Send + Sync + 'static`",
    note = "All bus payloads in Waypost must be thread-safe and static."
)]
pub trait Payload: Send + Sync + 'static {}

// Common Payload implementations
impl Payload for () {}
impl Payload for String {}
impl Payload for &'static str {}
impl<T: Payload> Payload for Box<T> {}
impl<T: Payload> Payload for std::sync::Arc<T> {}
