//! Text-level Schengen scope applied to extracted rules.

use super::rules::patterns::{NON_SCHENGEN, WITHIN_SCHENGEN};
use crate::models::rules::NotificationRule;

/// Flight scope stated by the text as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchengenScope {
    Unspecified,
    SchengenOnly,
    NonSchengenOnly,
    /// Both scopes appear; per-scope rules are left as extracted.
    Ambiguous,
}

/// Classify the Schengen language of a text.
pub fn detect_schengen_scope(text: &str) -> SchengenScope {
    let non_schengen = NON_SCHENGEN.is_match(text);
    let within = WITHIN_SCHENGEN
        .find_iter(text)
        .any(|m| !negated(&text[..m.start()]));

    match (within, non_schengen) {
        (false, false) => SchengenScope::Unspecified,
        (true, false) => SchengenScope::SchengenOnly,
        (false, true) => SchengenScope::NonSchengenOnly,
        (true, true) => SchengenScope::Ambiguous,
    }
}

/// "non-Schengen only" must not count as Schengen-only.
fn negated(prefix: &str) -> bool {
    let prefix = prefix
        .trim_end_matches(|c: char| c.is_whitespace() || c == '-')
        .to_lowercase();
    prefix.ends_with("non") || prefix.ends_with("extra")
}

/// Set the text's scope on every rule that does not carry one yet.
pub fn apply_schengen_context(mut rules: Vec<NotificationRule>, text: &str) -> Vec<NotificationRule> {
    let scope = detect_schengen_scope(text);
    let (schengen_only, non_schengen_only) = match scope {
        SchengenScope::SchengenOnly => (true, false),
        SchengenScope::NonSchengenOnly => (false, true),
        SchengenScope::Unspecified | SchengenScope::Ambiguous => return rules,
    };

    for rule in rules.iter_mut().filter(|r| !r.has_schengen_scope()) {
        rule.schengen_only = schengen_only;
        rule.non_schengen_only = non_schengen_only;
    }
    rules
}
