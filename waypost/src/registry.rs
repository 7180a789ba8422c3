//! Dispatch-table storage and rewrite-rule compilation.

use crate::path::DispatchPath;
use indexmap::{IndexMap, IndexSet};
use waypost_core::{RegistryError, RewriteError, RewriteRule, RewriteSink, RulePosition};

/// The query variable carrying the resolved dispatch path.
pub const DISPATCH_VAR: &str = "dispatch";

/// The default rewrite target: the internal query string the host
/// resolves, with the matched path in the first capture group.
pub const DEFAULT_TARGET: &str = "index.php?dispatch=$matches[1]";

/// The channel a path dispatches on when no custom action is set.
pub fn dispatch_channel(path: &str) -> String {
    format!("dispatch_path_{path}")
}

/// The dispatch table: registered paths, their rewrite rules, and the
/// query variables to expose to the host.
///
/// One registry serves an application. It is constructed by the
/// bootstrap routine, populated during configuration, and read during
/// each request; [`reset`](Self::reset) restores the freshly-constructed
/// state for test isolation.
pub struct PathRegistry {
    /// Paths with no custom rewrite, keyed by path. Insertion-ordered.
    simple: IndexMap<String, DispatchPath>,
    /// Paths with a custom rewrite, keyed by path. Insertion-ordered.
    rewrite: IndexMap<String, DispatchPath>,
    /// Query variables to register with the host. Always contains
    /// [`DISPATCH_VAR`].
    query_vars: IndexSet<String>,
}

impl PathRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        let mut query_vars = IndexSet::new();
        query_vars.insert(DISPATCH_VAR.to_string());
        Self {
            simple: IndexMap::new(),
            rewrite: IndexMap::new(),
            query_vars,
        }
    }

    /// Register one path specification.
    ///
    /// Accepts anything convertible into a [`DispatchPath`], including a
    /// bare string. A record with a rewrite lands in the rewrite-path
    /// mapping and its `query_vars` are merged into the registry's set;
    /// any other record lands in the simple-path mapping. Re-registering
    /// a path replaces the previous record, switching mappings if the
    /// rewrite presence changed.
    pub fn register(&mut self, spec: impl Into<DispatchPath>) -> Result<(), RegistryError> {
        let spec = spec.into();
        if spec.path.is_empty() {
            return Err(RegistryError::EmptyPath);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            path = %spec.path,
            rewrite = spec.rewrite.is_some(),
            "registered dispatch path"
        );

        let path = spec.path.clone();
        match &spec.rewrite {
            Some(rewrite) => {
                for var in &rewrite.query_vars {
                    self.query_vars.insert(var.clone());
                }
                self.simple.shift_remove(&path);
                self.rewrite.insert(path, spec);
            }
            None => {
                self.rewrite.shift_remove(&path);
                self.simple.insert(path, spec);
            }
        }
        Ok(())
    }

    /// Register an ordered sequence of path specifications.
    ///
    /// Later entries with a colliding path override earlier ones. The
    /// first error aborts the sequence.
    pub fn register_all<I>(&mut self, specs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator,
        I::Item: Into<DispatchPath>,
    {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(())
    }

    /// Union the host's query variables with the registry's.
    ///
    /// Pure and idempotent: order is preserved, duplicates are dropped,
    /// and repeated application yields the same set.
    pub fn filter_query_vars(&self, host_vars: Vec<String>) -> Vec<String> {
        let mut merged: IndexSet<String> = host_vars.into_iter().collect();
        merged.extend(self.query_vars.iter().cloned());
        merged.into_iter().collect()
    }

    /// Compile the registered paths into rewrite rules.
    ///
    /// All simple paths collapse into a single alternation rule (one rule
    /// regardless of path count); each rewrite path with a non-empty rule
    /// contributes its own, in insertion order, after the combined rule.
    ///
    /// Overlapping patterns are not detected: with first-match-wins
    /// evaluation, a custom rule whose pattern overlaps the combined
    /// simple rule (or another custom rule) can be shadowed. Keep custom
    /// patterns on distinct literal prefixes.
    pub fn compile_rules(&self, sink: &mut dyn RewriteSink) -> Result<(), RewriteError> {
        if !self.simple.is_empty() {
            let slugs = self
                .simple
                .keys()
                .map(|slug| regex::escape(slug))
                .collect::<Vec<_>>()
                .join("|");
            sink.add_rule(RewriteRule {
                pattern: format!("({slugs})/?$"),
                target: DEFAULT_TARGET.to_string(),
                position: RulePosition::Top,
            })?;
        }

        for spec in self.rewrite.values() {
            let Some(rewrite) = &spec.rewrite else {
                continue;
            };
            if rewrite.rule.is_empty() {
                continue;
            }
            sink.add_rule(RewriteRule {
                pattern: rewrite.rule.clone(),
                target: rewrite
                    .redirect
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
                position: rewrite.position.unwrap_or_default(),
            })?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            simple = self.simple.len(),
            rewrite = self.rewrite.len(),
            "compiled rewrite rules"
        );

        Ok(())
    }

    /// Look up a registration by path: simple paths first, then rewrite
    /// paths.
    pub fn lookup(&self, path: &str) -> Option<&DispatchPath> {
        self.simple.get(path).or_else(|| self.rewrite.get(path))
    }

    /// Check whether a path is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// The number of registered paths across both mappings.
    pub fn len(&self) -> usize {
        self.simple.len() + self.rewrite.len()
    }

    /// Check whether the registry has no registrations.
    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.rewrite.is_empty()
    }

    /// The query variables the registry exposes to the host.
    pub fn query_vars(&self) -> impl Iterator<Item = &str> {
        self.query_vars.iter().map(String::as_str)
    }

    /// Clear all registrations and restore the initial query-var set.
    pub fn reset(&mut self) {
        self.simple.clear();
        self.rewrite.clear();
        self.query_vars.clear();
        self.query_vars.insert(DISPATCH_VAR.to_string());
    }
}

impl Default for PathRegistry {
    fn default() -> Self {
        Self::new()
    }
}
