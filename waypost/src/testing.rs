//! Test doubles for the host seams.
//!
//! - [`CountingCallback`]: a handler that counts invocations and records
//!   the paths it was handed
//! - [`FailingCallback`]: a handler that always fails
//! - [`RecordingSink`]: a rewrite sink that captures rules verbatim
//! - [`RecordingTemplates`]: a template loader that records rendered ids
//! - [`FailingTemplates`]: a template loader that always fails

use crate::path::DispatchPath;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use waypost_core::{BoxError, Callback, RewriteError, RewriteRule, RewriteSink, TemplateLoader};

// ============================================================================
// Counting Callback
// ============================================================================

/// A handler that counts invocations and records payload paths.
///
/// Clones share state, so a clone registered as a callback can be
/// inspected after dispatch:
///
/// ```rust,ignore
/// let counter = CountingCallback::new();
/// registry.register(DispatchPath::new("hi").callback(counter.clone()))?;
/// // ... dispatch ...
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingCallback {
    count: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl CountingCallback {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// The paths of the payloads handed to this handler, in order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    /// Reset the recorded state.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
        self.paths.lock().unwrap().clear();
    }
}

impl Default for CountingCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingCallback {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            paths: self.paths.clone(),
        }
    }
}

impl Callback<DispatchPath> for CountingCallback {
    fn invoke(&self, payload: &DispatchPath) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(payload.path.clone());
        Ok(())
    }
}

// ============================================================================
// Failing Callback
// ============================================================================

/// A handler that always fails, for error propagation tests.
pub struct FailingCallback;

impl Callback<DispatchPath> for FailingCallback {
    fn invoke(&self, _payload: &DispatchPath) -> Result<(), BoxError> {
        Err("intentional handler failure".into())
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// A rewrite sink that captures rules verbatim, without compiling them.
#[derive(Default)]
pub struct RecordingSink {
    rules: Vec<RewriteRule>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured rules, in registration order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}

impl RewriteSink for RecordingSink {
    fn add_rule(&mut self, rule: RewriteRule) -> Result<(), RewriteError> {
        self.rules.push(rule);
        Ok(())
    }
}

// ============================================================================
// Template Loaders
// ============================================================================

/// A template loader that records rendered identifiers.
///
/// Clones share state.
pub struct RecordingTemplates {
    rendered: Arc<Mutex<Vec<String>>>,
}

impl RecordingTemplates {
    /// Create a new recording loader.
    pub fn new() -> Self {
        Self {
            rendered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The rendered template identifiers, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

impl Default for RecordingTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingTemplates {
    fn clone(&self) -> Self {
        Self {
            rendered: self.rendered.clone(),
        }
    }
}

impl TemplateLoader for RecordingTemplates {
    fn render(&self, id: &str) -> Result<(), BoxError> {
        self.rendered.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// A template loader that always fails.
pub struct FailingTemplates;

impl TemplateLoader for FailingTemplates {
    fn render(&self, id: &str) -> Result<(), BoxError> {
        Err(format!("template `{id}` refused to render").into())
    }
}
