//! Substring pattern matching shared by the classifier and synthesizers.
//!
//! Every rule table in the configuration is an ordered list of rules, each
//! carrying a list of lowercase substrings. Matching is case-insensitive on
//! the target and first-match-wins across rules.

use crate::config::{MeasureRule, SegmentRule};

/// A rule that carries a list of name substrings.
pub trait PatternRule {
    fn patterns(&self) -> &[String];

    /// Does any pattern occur in `target` (case-insensitive)?
    fn matches(&self, target: &str) -> bool {
        matches_any(target, self.patterns())
    }
}

impl PatternRule for MeasureRule {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl PatternRule for SegmentRule {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Does any pattern occur as a substring of `target`?
pub fn matches_any<S: AsRef<str>>(target: &str, patterns: &[S]) -> bool {
    let target = target.to_lowercase();
    patterns
        .iter()
        .any(|p| !p.as_ref().is_empty() && target.contains(&p.as_ref().to_lowercase()))
}

/// The first rule (in order) whose pattern list matches `target`.
pub fn first_match<'a, R: PatternRule>(target: &str, rules: &'a [R]) -> Option<&'a R> {
    rules.iter().find(|rule| rule.matches(target))
}
