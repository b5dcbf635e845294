//! Violations, categories, and the approve/block verdict.

use serde::{Deserialize, Serialize};

/// A grouping of rules with a shared theme and a shared enable toggle.
///
/// Each category carries a stable cycle number that appears in violation
/// records and audit logs: 1 = code quality, 2 = security, 4 = research
/// claims. The numbering has a gap because cycle 3 in the original gate
/// design was a prompt-side review with no engine logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCategory {
    /// Placeholder/stub detection — cycle 1.
    Quality,
    /// Dangerous-pattern detection — cycle 2.
    Security,
    /// Research claim sourcing — cycle 4.
    Research,
}

impl RuleCategory {
    /// The stable cycle number recorded on violations.
    pub const fn cycle(self) -> u8 {
        match self {
            Self::Quality => 1,
            Self::Security => 2,
            Self::Research => 4,
        }
    }
}

/// A single rule match against evaluated content.
///
/// A violation is evidence, not a decision — the decision is derived from
/// whether the violation list is empty. Violations are created fresh per
/// evaluation call and have no lifecycle beyond it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Id of the rule that matched. The stable contract surface: callers
    /// disable rules by id and audit logs reference violations by id.
    pub rule_id: String,
    /// Cycle number of the rule's category (1, 2, or 4).
    pub cycle: u8,
    /// Human-readable remediation text.
    pub message: String,
}

impl Violation {
    /// Build a violation for a rule in the given category.
    pub fn new(rule_id: impl Into<String>, category: RuleCategory, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            cycle: category.cycle(),
            message: message.into(),
        }
    }
}

/// The approve/block decision derived from a violation list.
///
/// A verdict is a pure function of the evaluated input — no hidden state,
/// no I/O. Violations keep the order they were produced in (catalog order
/// within a category, quality before security across categories), and that
/// order is part of the observable contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No rule matched; the operation may proceed.
    Approve,
    /// One or more rules matched; the operation must be rejected.
    Block(Vec<Violation>),
}

impl Verdict {
    /// Derive a verdict from a violation list: empty approves, non-empty
    /// blocks.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Approve
        } else {
            Self::Block(violations)
        }
    }

    /// Whether this verdict rejects the operation.
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    /// The violations backing this verdict (empty for approve).
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Approve => &[],
            Self::Block(v) => v,
        }
    }

    /// Stable decision label for audit records.
    pub const fn decision(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Block(_) => "block",
        }
    }

    /// One actionable explanation concatenating every violation's cycle,
    /// rule id, and message in evaluation order. `None` for approve.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Approve => None,
            Self::Block(violations) => Some(
                violations
                    .iter()
                    .map(|v| format!("[Cycle {} - {}] {}", v.cycle, v.rule_id, v.message))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(id: &str, category: RuleCategory) -> Violation {
        Violation::new(id, category, format!("{id} matched"))
    }

    #[test]
    fn cycle_numbers_are_stable() {
        assert_eq!(RuleCategory::Quality.cycle(), 1);
        assert_eq!(RuleCategory::Security.cycle(), 2);
        assert_eq!(RuleCategory::Research.cycle(), 4);
    }

    #[test]
    fn violation_serializes_camel_case() {
        let v = violation("no-todo", RuleCategory::Quality);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["ruleId"], "no-todo");
        assert_eq!(json["cycle"], 1);
        assert!(json["message"].as_str().unwrap().contains("no-todo"));
    }

    #[test]
    fn empty_violations_approve() {
        let verdict = Verdict::from_violations(Vec::new());
        assert_eq!(verdict, Verdict::Approve);
        assert!(!verdict.is_block());
        assert_eq!(verdict.decision(), "approve");
        assert_eq!(verdict.reason(), None);
    }

    #[test]
    fn non_empty_violations_block() {
        let verdict = Verdict::from_violations(vec![violation("no-eval", RuleCategory::Security)]);
        assert!(verdict.is_block());
        assert_eq!(verdict.decision(), "block");
        assert_eq!(verdict.violations().len(), 1);
    }

    #[test]
    fn reason_preserves_evaluation_order() {
        let verdict = Verdict::from_violations(vec![
            violation("no-todo", RuleCategory::Quality),
            violation("no-eval", RuleCategory::Security),
        ]);
        let reason = verdict.reason().unwrap();
        let todo_at = reason.find("no-todo").unwrap();
        let eval_at = reason.find("no-eval").unwrap();
        assert!(todo_at < eval_at, "quality violation must come first");
        assert!(reason.contains("[Cycle 1 - no-todo]"));
        assert!(reason.contains("[Cycle 2 - no-eval]"));
    }
}
