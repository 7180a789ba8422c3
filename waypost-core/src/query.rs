//! Resolved request query contract.

/// The host's view of one resolved request query.
///
/// Dispatch only acts on the main query of a request; secondary queries
/// issued during the same request lifecycle (widgets, sidebars) must
/// report `is_main() == false` and are never dispatched.
pub trait RequestQuery {
    /// Whether this is the primary, request-defining query.
    fn is_main(&self) -> bool;

    /// The resolved value of a query variable.
    ///
    /// Returns `None` when the variable is absent or resolved to the
    /// empty string.
    fn var(&self, name: &str) -> Option<&str>;
}
