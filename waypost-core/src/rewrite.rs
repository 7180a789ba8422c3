//! Rewrite-rule contract.
//!
//! The host's rewrite engine maps URL shapes onto internal query strings.
//! Waypost only produces rules; evaluation belongs to the host. The sink
//! trait is the seam between the two.

use crate::error::RewriteError;

/// Evaluation band for a rewrite rule.
///
/// `Top` rules are evaluated before `Bottom` rules; within a band, rules
/// keep insertion order and the first matching rule wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RulePosition {
    /// Evaluated before the host's own rules.
    #[default]
    Top,
    /// Evaluated after the host's own rules.
    Bottom,
}

/// A single pattern → target mapping handed to the host's rewrite engine.
///
/// `pattern` is matched against the request path; `target` is the internal
/// query string the host resolves, with `$matches[N]` referencing capture
/// groups of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// The pattern evaluated against request paths.
    pub pattern: String,
    /// The internal query-string target.
    pub target: String,
    /// The evaluation band.
    pub position: RulePosition,
}

/// Recipient of compiled rewrite rules.
///
/// Implemented by host adapters (and by the in-memory rule store the
/// `waypost` crate ships). A sink that compiles patterns eagerly may
/// reject a rule; the error aborts the compile cycle that produced it.
pub trait RewriteSink {
    /// Register one rewrite rule with the host.
    fn add_rule(&mut self, rule: RewriteRule) -> Result<(), RewriteError>;
}
