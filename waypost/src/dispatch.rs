//! Request dispatch.
//!
//! Maps a resolved request back to its registration and runs the
//! handler. Registration stores data only; this is the step that invokes
//! the stored callback or emits the named channel, renders the template,
//! and decides whether the request halts.

use crate::path::DispatchPath;
use crate::registry::{DISPATCH_VAR, PathRegistry, dispatch_channel};
use waypost_core::{DispatchError, EventBus, RequestQuery, TemplateLoader};

/// What a dispatch attempt did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not the main query, no dispatch value, or no matching
    /// registration; the host continues untouched.
    Skipped,
    /// A registration fired; normal request output continues.
    Fired,
    /// A registration fired and rendered its template; the embedder must
    /// produce no further normal output for this request.
    Halted,
}

impl DispatchOutcome {
    /// Whether the request must produce no further normal output.
    pub fn is_halted(&self) -> bool {
        matches!(self, DispatchOutcome::Halted)
    }

    /// Whether a registration fired for this request.
    pub fn dispatched(&self) -> bool {
        !matches!(self, DispatchOutcome::Skipped)
    }
}

/// Maps resolved requests back to registered paths and runs their
/// handlers.
///
/// Composes a registry with the host seams; constructed once at
/// bootstrap and invoked for every resolved request.
///
/// ```rust,ignore
/// let dispatcher = PathDispatcher::new(&registry, &bus, &templates);
/// for query in requests {
///     if dispatcher.dispatch(&query)?.is_halted() {
///         continue; // template rendered, no normal output
///     }
///     // ... host's normal handling
/// }
/// ```
pub struct PathDispatcher<'a, B, T> {
    registry: &'a PathRegistry,
    bus: &'a B,
    templates: &'a T,
}

impl<'a, B, T> PathDispatcher<'a, B, T>
where
    B: EventBus<DispatchPath>,
    T: TemplateLoader,
{
    /// Create a dispatcher over a registry and the host seams.
    pub fn new(registry: &'a PathRegistry, bus: &'a B, templates: &'a T) -> Self {
        Self {
            registry,
            bus,
            templates,
        }
    }

    /// Dispatch one resolved request.
    ///
    /// Only acts on the main query with a non-empty `dispatch` variable
    /// naming a registered path; everything else is [`Skipped`] and falls
    /// through to the host's normal handling.
    ///
    /// A registration with a custom `action` has that channel emitted
    /// with the full record as payload; the stored callback does not run.
    /// Otherwise the stored callback is invoked directly and the default
    /// channel (`dispatch_path_{path}`) is emitted for external
    /// subscribers. A registration with a `template` has it rendered
    /// after the handler, and the outcome is [`Halted`].
    ///
    /// Handler, delivery, and template failures propagate as
    /// [`DispatchError`] variants wrapping the source error.
    ///
    /// [`Skipped`]: DispatchOutcome::Skipped
    /// [`Halted`]: DispatchOutcome::Halted
    pub fn dispatch(&self, query: &dyn RequestQuery) -> Result<DispatchOutcome, DispatchError> {
        if !query.is_main() {
            return Ok(DispatchOutcome::Skipped);
        }
        let Some(path) = query.var(DISPATCH_VAR).filter(|value| !value.is_empty()) else {
            return Ok(DispatchOutcome::Skipped);
        };
        let Some(record) = self.registry.lookup(path) else {
            return Ok(DispatchOutcome::Skipped);
        };

        match &record.action {
            Some(action) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(path, channel = %action, "dispatching path");

                self.bus
                    .emit(action, record)
                    .map_err(|source| DispatchError::Emit {
                        channel: action.clone(),
                        source,
                    })?;
            }
            None => {
                let channel = dispatch_channel(path);

                #[cfg(feature = "tracing")]
                tracing::debug!(path, channel = %channel, "dispatching path");

                if let Some(callback) = &record.callback {
                    callback.invoke(record).map_err(DispatchError::Handler)?;
                }
                self.bus
                    .emit(&channel, record)
                    .map_err(|source| DispatchError::Emit { channel, source })?;
            }
        }

        if let Some(template) = &record.template {
            self.templates
                .render(template)
                .map_err(|source| DispatchError::Template {
                    template: template.clone(),
                    source,
                })?;
            return Ok(DispatchOutcome::Halted);
        }
        Ok(DispatchOutcome::Fired)
    }
}
