//! The fixed rule catalog — quality (cycle 1) and security (cycle 2).
//!
//! Rules are declarative data, not branching logic: each entry is a
//! pattern, an applicability scope, an optional file-type allow-list, and
//! a remediation message. Adding a rule never touches evaluator control
//! flow. Catalog order is part of the observable contract — it determines
//! violation ordering in the verdict.
//!
//! The patterns are acknowledged heuristics (a secret-like string in a
//! comment still matches); precision is deliberately not tuned beyond the
//! documented examples.

use std::sync::LazyLock;

use quadgate_core::ToolContext;
use regex::Regex;

/// Which operation contexts a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleScope {
    /// The rule applies under every context.
    All,
    /// The rule applies under exactly one context.
    Only(ToolContext),
}

impl RuleScope {
    /// Whether content evaluated under `context` is in scope.
    pub fn covers(self, context: ToolContext) -> bool {
        match self {
            Self::All => true,
            Self::Only(ctx) => ctx == context,
        }
    }
}

/// How a rule tests content.
enum RuleMatcher {
    /// Plain pattern match.
    Pattern(Regex),
    /// Pattern match with an allow-list: a hit is discarded when the text
    /// immediately after the match starts with one of the exemptions.
    /// Stands in for negative lookahead, which the `regex` crate does not
    /// support.
    PatternUnless {
        pattern: Regex,
        exempt: &'static [&'static str],
    },
}

impl RuleMatcher {
    fn is_match(&self, content: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(content),
            Self::PatternUnless { pattern, exempt } => {
                pattern.find_iter(content).any(|m| {
                    let rest = &content[m.end()..];
                    !exempt.iter().any(|e| rest.starts_with(e))
                })
            }
        }
    }
}

/// An immutable rule definition. Loaded once at process start, never
/// mutated. The `id` is the stable contract surface: callers disable
/// rules by id and audit logs reference violations by id.
pub struct Rule {
    /// Unique, stable rule id.
    pub id: &'static str,
    /// Applicability by operation context.
    pub scope: RuleScope,
    /// File-extension allow-list; empty means all types.
    pub file_types: &'static [&'static str],
    /// Human-readable remediation text.
    pub message: &'static str,
    matcher: RuleMatcher,
}

impl Rule {
    /// Test the rule's pattern against `content`.
    pub fn matches(&self, content: &str) -> bool {
        self.matcher.is_match(content)
    }
}

fn rule(
    id: &'static str,
    scope: RuleScope,
    file_types: &'static [&'static str],
    pattern: &str,
    message: &'static str,
) -> Rule {
    Rule {
        id,
        scope,
        file_types,
        message,
        matcher: RuleMatcher::Pattern(Regex::new(pattern).expect("catalog pattern")),
    }
}

const PYTHON: &[&str] = &[".py", ".pyi"];
const JS_TS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs"];
const JS_TS_PY: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs", ".py"];
const JS_TS_HTML: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs", ".html"];

static QUALITY: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let fw = RuleScope::Only(ToolContext::FileWrite);
    vec![
        rule(
            "no-todo",
            fw,
            &[],
            r"\b(TODO|FIXME|HACK|XXX)\b",
            "Code contains a TODO/FIXME/HACK/XXX comment. Remove placeholder comments and implement the actual logic.",
        ),
        rule(
            "no-empty-pass",
            fw,
            PYTHON,
            r"(?m)^\s*pass\s*$",
            "Python file contains a bare \"pass\" statement. Implement the actual logic instead of using a placeholder.",
        ),
        rule(
            "no-not-implemented",
            fw,
            PYTHON,
            r"raise\s+NotImplementedError",
            "Code raises NotImplementedError. Implement the actual functionality instead of leaving a stub.",
        ),
        rule(
            "no-ellipsis",
            fw,
            PYTHON,
            r"(?m)^\s*\.\.\.\s*$",
            "Python file contains an ellipsis (...) placeholder. Implement the actual logic.",
        ),
        rule(
            "no-placeholder-text",
            fw,
            &[],
            r"(?i)\b(placeholder|stub|mock implementation|implement\s+this|add\s+implementation\s+here|your\s+code\s+here)\b",
            "Code contains placeholder/stub text. Write the complete implementation.",
        ),
        rule(
            "no-throw-not-impl",
            fw,
            JS_TS,
            r#"(?i)throw\s+new\s+Error\s*\(\s*['"`].*not\s+implemented"#,
            "Code throws a \"not implemented\" error. Implement the actual functionality.",
        ),
    ]
});

static SECURITY: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let fw = RuleScope::Only(ToolContext::FileWrite);
    let sh = RuleScope::Only(ToolContext::Shell);
    vec![
        rule(
            "no-eval",
            fw,
            JS_TS_PY,
            r"\beval\s*\(",
            "Code uses eval(). This is a critical security risk (code injection). Use a safe alternative.",
        ),
        rule(
            "no-exec",
            fw,
            PYTHON,
            r"\bexec\s*\(",
            "Python code uses exec(). This allows arbitrary code execution. Use a safe alternative.",
        ),
        rule(
            "no-os-system",
            fw,
            PYTHON,
            r"\bos\.system\s*\(",
            "Python code uses os.system(). Use subprocess.run() with shell=False instead.",
        ),
        rule(
            "no-shell-true",
            fw,
            PYTHON,
            r"shell\s*=\s*True",
            "Python code uses shell=True in subprocess. This enables shell injection. Use shell=False and pass args as a list.",
        ),
        rule(
            "no-hardcoded-secrets",
            fw,
            &[],
            r#"(?i)(?:api[_-]?key|api[_-]?secret|password|passwd|secret[_-]?key|access[_-]?token|auth[_-]?token|private[_-]?key)\s*[:=]\s*['"`][A-Za-z0-9+/=_\-]{8,}"#,
            "Code contains what appears to be a hardcoded secret (API key, password, or token). Use environment variables or a secrets manager instead.",
        ),
        rule(
            "no-raw-sql",
            fw,
            &[],
            r#"(?i)(?:f['"`].*(?:SELECT|INSERT|UPDATE|DELETE|DROP|ALTER|CREATE)\s+.*\{|(?:SELECT|INSERT|UPDATE|DELETE|DROP|ALTER|CREATE)\s+.*(?:['"\s]*\+|\+\s*['"]|\$\{|%s|\.format\())"#,
            "Code constructs SQL using string concatenation/interpolation. Use parameterized queries to prevent SQL injection.",
        ),
        rule(
            "no-innerhtml",
            fw,
            JS_TS_HTML,
            r"\.innerHTML\s*=",
            "Code assigns to .innerHTML which enables XSS attacks. Use .textContent or a sanitization library instead.",
        ),
        rule(
            "no-rm-rf",
            sh,
            &[],
            r"(?i)rm\s+(-[a-zA-Z]*)?r[a-zA-Z]*f[a-zA-Z]*\s+(?:/(?:\s|$|\*)|\$HOME|\$\{HOME\}|~/|/root|C:\\)",
            "Command attempts destructive recursive delete on a critical path. This could destroy the system.",
        ),
        rule(
            "no-chmod-777",
            sh,
            &[],
            r"chmod\s+(?:.*\s)?777\b",
            "Command sets world-writable permissions (777). Use more restrictive permissions (e.g. 755 or 644).",
        ),
        rule(
            "no-curl-pipe-sh",
            sh,
            &[],
            r"(?:curl|wget)\s+.*\|\s*(?:ba)?sh",
            "Command pipes downloaded content directly to a shell. Download first, inspect, then execute.",
        ),
        Rule {
            id: "no-insecure-url",
            scope: RuleScope::Only(ToolContext::Web),
            file_types: &[],
            message: "URL uses insecure HTTP instead of HTTPS. Use HTTPS for all non-localhost connections.",
            matcher: RuleMatcher::PatternUnless {
                pattern: Regex::new("http://").expect("catalog pattern"),
                exempt: &["localhost", "127.0.0.1", "0.0.0.0", "[::1]"],
            },
        },
    ]
});

/// The code-quality rule table (cycle 1), in evaluation order.
pub fn quality() -> &'static [Rule] {
    &QUALITY
}

/// The security rule table (cycle 2), in evaluation order.
pub fn security() -> &'static [Rule] {
    &SECURITY
}
