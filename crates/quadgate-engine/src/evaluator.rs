//! Applies a rule catalog against content under a declared context.

use std::collections::HashSet;

use quadgate_core::{RuleCategory, ToolContext, Violation};

use crate::catalog::{self, Rule};
use crate::research;

/// Evaluate one rule category against `(content, file_ext, context)`.
///
/// Per rule, in catalog order: skip if disabled by id, skip if out of
/// context scope, skip if the rule has a file-type allow-list and
/// `file_ext` is non-empty and not a member (an empty extension — e.g. a
/// shell command — is never filtered by type). Otherwise test the pattern
/// and collect a violation on match. All matching rules are collected; a
/// single write can trigger several simultaneous violations.
///
/// Total on its input domain: empty or malformed content yields an empty
/// list, never an error. [`RuleCategory::Research`] dispatches to the
/// claim verifier, which ignores `file_ext` and `context` — routing to it
/// is the dispatch policy's job, not the verifier's.
pub fn evaluate(
    content: &str,
    file_ext: &str,
    context: ToolContext,
    disabled: &HashSet<String>,
    category: RuleCategory,
) -> Vec<Violation> {
    let rules: &[Rule] = match category {
        RuleCategory::Quality => catalog::quality(),
        RuleCategory::Security => catalog::security(),
        RuleCategory::Research => return research::verify_research(content, disabled),
    };
    run_rules(rules, content, file_ext, context, disabled, category)
}

fn run_rules(
    rules: &[Rule],
    content: &str,
    file_ext: &str,
    context: ToolContext,
    disabled: &HashSet<String>,
    category: RuleCategory,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rule in rules {
        if disabled.contains(rule.id) {
            continue;
        }
        if !rule.scope.covers(context) {
            continue;
        }
        if !rule.file_types.is_empty()
            && !file_ext.is_empty()
            && !rule.file_types.contains(&file_ext)
        {
            continue;
        }
        if rule.matches(content) {
            violations.push(Violation::new(rule.id, category, rule.message));
        }
    }
    violations
}
