//! Template loader contract.

use crate::error::BoxError;

/// The host's template-loading facility.
///
/// A registration that names a template has it rendered immediately after
/// its handler fires; the dispatcher then halts normal request output.
/// Render failures are propagated unmodified to the embedder.
pub trait TemplateLoader {
    /// Render the template identified by `id`.
    fn render(&self, id: &str) -> Result<(), BoxError>;
}
