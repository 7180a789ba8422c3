//! In-memory rewrite rules with request-path resolution.
//!
//! A stand-in for the host's rewrite engine: it accepts the rules
//! [`PathRegistry::compile_rules`](crate::PathRegistry::compile_rules)
//! produces and resolves request paths against them the way the host
//! would — first-match-wins, `Top` band before `Bottom`, capture groups
//! substituted into the target's `$matches[N]` references, and the
//! resulting query string parsed into variables.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use waypost_core::{RequestQuery, RewriteError, RewriteRule, RewriteSink, RulePosition};

static MATCH_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$matches\[(\d+)\]").expect("literal pattern"));

struct CompiledRule {
    pattern: Regex,
    target: String,
}

/// An in-memory rewrite-rule store.
///
/// Patterns compile eagerly on [`add_rule`](RewriteSink::add_rule) and are
/// anchored at the start of the request path. Rules live in two bands:
/// `Top` rules are evaluated before `Bottom` rules, in insertion order
/// within a band, and the first matching rule wins.
pub struct RuleSet {
    top: Vec<CompiledRule>,
    bottom: Vec<CompiledRule>,
}

impl RuleSet {
    /// Create an empty rule store.
    pub fn new() -> Self {
        Self {
            top: Vec::new(),
            bottom: Vec::new(),
        }
    }

    /// The number of stored rules across both bands.
    pub fn len(&self) -> usize {
        self.top.len() + self.bottom.len()
    }

    /// Check whether no rules are stored.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    /// Resolve a request path against the stored rules.
    ///
    /// Leading and trailing slashes on the request path are trimmed, as
    /// the host trims them before matching. Returns the resolved query of
    /// the first matching rule, or `None` when no rule matches (the
    /// request falls through to the host's normal handling).
    pub fn resolve(&self, request_path: &str) -> Option<ResolvedQuery> {
        let path = request_path.trim_matches('/');
        self.top
            .iter()
            .chain(self.bottom.iter())
            .find_map(|rule| {
                rule.pattern
                    .captures(path)
                    .map(|caps| ResolvedQuery::from_target(&expand_matches(&rule.target, &caps)))
            })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RewriteSink for RuleSet {
    fn add_rule(&mut self, rule: RewriteRule) -> Result<(), RewriteError> {
        // Anchor at the start of the path, as the host does.
        let pattern = Regex::new(&format!("^{}", rule.pattern)).map_err(|source| {
            RewriteError::InvalidPattern {
                pattern: rule.pattern.clone(),
                source: Box::new(source),
            }
        })?;
        let compiled = CompiledRule {
            pattern,
            target: rule.target,
        };
        match rule.position {
            RulePosition::Top => self.top.push(compiled),
            RulePosition::Bottom => self.bottom.push(compiled),
        }
        Ok(())
    }
}

/// Substitute `$matches[N]` references in a rule target with the capture
/// groups of the matched pattern. Unmatched groups substitute as empty.
fn expand_matches(target: &str, caps: &Captures<'_>) -> String {
    MATCH_REF
        .replace_all(target, |reference: &Captures<'_>| {
            reference[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| caps.get(index))
                .map(|group| group.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

/// A resolved request query over an ordered variable map.
///
/// Produced by [`RuleSet::resolve`]; also buildable by hand for tests
/// and embedders that resolve queries themselves. Queries are main
/// queries unless marked [`secondary`](Self::secondary).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedQuery {
    vars: IndexMap<String, String>,
    secondary: bool,
}

impl ResolvedQuery {
    /// Create an empty main query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the query-string portion of a rewrite target.
    fn from_target(target: &str) -> Self {
        let query = target
            .split_once('?')
            .map_or(target, |(_script, query)| query);
        let mut vars = IndexMap::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            vars.insert(name.into_owned(), value.into_owned());
        }
        Self {
            vars,
            secondary: false,
        }
    }

    /// Set a query variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Mark this as a secondary query, exempt from dispatch.
    pub fn secondary(mut self) -> Self {
        self.secondary = true;
        self
    }
}

impl RequestQuery for ResolvedQuery {
    fn is_main(&self) -> bool {
        !self.secondary
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolvedQuery, RuleSet};
    use waypost_core::{RequestQuery, RewriteError, RewriteRule, RewriteSink, RulePosition};

    fn rule(pattern: &str, target: &str, position: RulePosition) -> RewriteRule {
        RewriteRule {
            pattern: pattern.to_string(),
            target: target.to_string(),
            position,
        }
    }

    #[test]
    fn test_matches_are_substituted_into_the_target() {
        let mut rules = RuleSet::new();
        rules
            .add_rule(rule(
                "ex/(.*)/?",
                "index.php?dispatch=p&qv=$matches[1]",
                RulePosition::Top,
            ))
            .unwrap();

        let query = rules.resolve("/ex/foo/").expect("rule should match");
        assert_eq!(query.var("dispatch"), Some("p"));
        assert_eq!(query.var("qv"), Some("foo"));
    }

    #[test]
    fn test_patterns_anchor_at_the_path_start() {
        let mut rules = RuleSet::new();
        rules
            .add_rule(rule(
                "(hi)/?$",
                "index.php?dispatch=$matches[1]",
                RulePosition::Top,
            ))
            .unwrap();

        assert!(rules.resolve("hi/").is_some());
        assert!(rules.resolve("nested/hi/").is_none());
    }

    #[test]
    fn test_top_band_is_evaluated_before_bottom() {
        let mut rules = RuleSet::new();
        rules
            .add_rule(rule(
                "docs.*",
                "index.php?dispatch=late",
                RulePosition::Bottom,
            ))
            .unwrap();
        rules
            .add_rule(rule(
                "(docs)/?$",
                "index.php?dispatch=$matches[1]",
                RulePosition::Top,
            ))
            .unwrap();

        let query = rules.resolve("docs/").expect("some rule should match");
        assert_eq!(query.var("dispatch"), Some("docs"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut rules = RuleSet::new();
        let result = rules.add_rule(rule("(", "index.php?dispatch=x", RulePosition::Top));
        assert!(matches!(
            result,
            Err(RewriteError::InvalidPattern { .. })
        ));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_empty_values_read_as_absent() {
        let query = ResolvedQuery::new().with_var("dispatch", "");
        assert_eq!(query.var("dispatch"), None);
    }

    #[test]
    fn test_secondary_queries_report_not_main() {
        let query = ResolvedQuery::new().with_var("dispatch", "hi").secondary();
        assert!(!query.is_main());
        assert_eq!(query.var("dispatch"), Some("hi"));
    }
}
