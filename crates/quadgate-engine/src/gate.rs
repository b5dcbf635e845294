//! Verdict dispatch.
//!
//! Routes a piece of content through the rule cycles it is subject to
//! and merges the results into a single [`Verdict`]. Research documents
//! answer to the claim verifier alone; everything else runs the quality
//! cycle followed by the security cycle.

use std::collections::HashSet;

use quadgate_core::research::{file_extension, is_research_target};
use quadgate_core::{RuleCategory, ToolContext, Verdict, Violation};

use crate::evaluator::evaluate;

/// Which cycles run, and which individual rules are switched off.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    /// Run the quality cycle.
    pub quality: bool,
    /// Run the security cycle.
    pub security: bool,
    /// Run the research claim verifier on research documents.
    pub research: bool,
    /// Rule ids excluded from every cycle.
    pub disabled: HashSet<String>,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            quality: true,
            security: true,
            research: true,
            disabled: HashSet::new(),
        }
    }
}

/// Review `content` destined for `file_path` and render a verdict.
///
/// Research-targeted markdown is exempt from the code cycles; prose
/// about `eval()` in a research note is not a security finding. For
/// payloads with no meaningful path (shell commands, URLs) pass an
/// empty `file_path`, which disables file-type filtering.
pub fn review(
    content: &str,
    file_path: &str,
    context: ToolContext,
    policy: &GatePolicy,
) -> Verdict {
    let mut violations: Vec<Violation> = Vec::new();

    if is_research_target(file_path) {
        if policy.research {
            violations.extend(evaluate(
                content,
                "",
                context,
                &policy.disabled,
                RuleCategory::Research,
            ));
        }
    } else {
        let ext = file_extension(file_path);
        if policy.quality {
            violations.extend(evaluate(
                content,
                &ext,
                context,
                &policy.disabled,
                RuleCategory::Quality,
            ));
        }
        if policy.security {
            violations.extend(evaluate(
                content,
                &ext,
                context,
                &policy.disabled,
                RuleCategory::Security,
            ));
        }
    }

    let verdict = Verdict::from_violations(violations);
    if let Verdict::Block(ref violations) = verdict {
        tracing::debug!(
            file_path,
            context = context.as_str(),
            count = violations.len(),
            "content blocked"
        );
    }
    verdict
}
