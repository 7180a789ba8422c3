//! The dispatch path record.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use waypost_core::{ArcCallback, Callback, Payload, RulePosition};

/// A custom rewrite attached to a dispatch path.
///
/// Presence of this record routes the registration into the rewrite-path
/// mapping: the path is reachable through the custom `rule` instead of the
/// combined literal-path rule.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathRewrite {
    /// The rewrite pattern handed to the host.
    pub rule: String,
    /// The internal query-string target. Defaults to the standard
    /// dispatch target when absent.
    pub redirect: Option<String>,
    /// The evaluation band. Defaults to [`RulePosition::Top`].
    pub position: Option<RulePosition>,
    /// Extra query variables to register with the host.
    pub query_vars: Vec<String>,
}

impl PathRewrite {
    /// Create a rewrite with the given rule pattern.
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            ..Self::default()
        }
    }

    /// Set the internal query-string target.
    pub fn redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    /// Set the evaluation band.
    pub fn position(mut self, position: RulePosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Register an extra query variable with the host.
    pub fn query_var(mut self, name: impl Into<String>) -> Self {
        self.query_vars.push(name.into());
        self
    }
}

/// One registered virtual path.
///
/// The record is both the registry entry and the payload handed to
/// handlers: whatever a caller attaches here (including arbitrary fields
/// in [`extra`](Self::extra)) arrives at the handler verbatim when the
/// path dispatches.
///
/// A bare string converts into a record with only `path` set:
///
/// ```rust,ignore
/// registry.register("changelog")?;
/// registry.register(
///     DispatchPath::new("feed")
///         .callback(|p: &DispatchPath| println!("serving {}", p.path))
///         .template("feed"),
/// )?;
/// ```
#[derive(Clone, Deserialize)]
pub struct DispatchPath {
    /// The dispatch path: lookup key and, for simple paths, the literal
    /// URL segment.
    pub path: String,

    /// Handler invoked directly when this path dispatches without a
    /// custom action. Not deserializable; attach it in code.
    #[serde(skip)]
    pub callback: Option<ArcCallback<DispatchPath>>,

    /// Event channel to emit instead of the path-derived default. When
    /// set, the stored callback does not run; handling belongs to the
    /// channel's subscribers.
    #[serde(default)]
    pub action: Option<String>,

    /// Custom rewrite for this path.
    #[serde(default)]
    pub rewrite: Option<PathRewrite>,

    /// Template rendered after the handler fires; halts the request.
    #[serde(default)]
    pub template: Option<String>,

    /// Arbitrary caller-supplied fields, delivered verbatim to handlers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DispatchPath {
    /// Create a record for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            callback: None,
            action: None,
            rewrite: None,
            template: None,
            extra: Map::new(),
        }
    }

    /// Attach a handler to invoke when this path dispatches.
    pub fn callback<C: Callback<DispatchPath> + 'static>(mut self, callback: C) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Emit a custom event channel instead of the default.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach a custom rewrite.
    pub fn rewrite(mut self, rewrite: PathRewrite) -> Self {
        self.rewrite = Some(rewrite);
        self
    }

    /// Render a template and halt the request after dispatch.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Attach an arbitrary field, passed through to handlers.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Payload for DispatchPath {}

impl From<&str> for DispatchPath {
    fn from(path: &str) -> Self {
        DispatchPath::new(path)
    }
}

impl From<String> for DispatchPath {
    fn from(path: String) -> Self {
        DispatchPath::new(path)
    }
}

impl fmt::Debug for DispatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchPath")
            .field("path", &self.path)
            .field("callback", &self.callback.as_ref().map(|_| "<handler>"))
            .field("action", &self.action)
            .field("rewrite", &self.rewrite)
            .field("template", &self.template)
            .field("extra", &self.extra)
            .finish()
    }
}
