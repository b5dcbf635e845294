//! Session-end research sweep.
//!
//! On `Stop`, the gate walks the project's research directories and
//! runs the claim verifier over every research document, catching
//! files that reached disk without passing through a reviewed write
//! (shell redirection, external edits).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use quadgate_core::Violation;
use quadgate_core::research::is_research_target;
use quadgate_engine::verify_research;
use walkdir::{DirEntry, WalkDir};

/// Directories searched for research documents, in order. Relative to
/// the project root; missing ones are skipped.
const SWEEP_DIRS: &[&str] = &["docs/research", "research", "docs"];

/// How deep the sweep descends into each directory.
const MAX_DEPTH: usize = 5;

/// One failing file found by the sweep.
#[derive(Debug)]
pub struct SweepFinding {
    /// Path relative to the project root where possible.
    pub path: PathBuf,
    /// Verifier violations for this file.
    pub violations: Vec<Violation>,
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| {
        (name.starts_with('.') && name.len() > 1) || name == "node_modules"
    })
}

/// Sweep `project_root` for research documents with failing claims.
///
/// Unreadable files are skipped with a warning rather than reported.
/// A document under both `docs/` and `docs/research/` is only checked
/// once.
pub fn sweep_research(project_root: &Path, disabled: &HashSet<String>) -> Vec<SweepFinding> {
    let mut findings = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for dir in SWEEP_DIRS {
        let base = project_root.join(dir);
        if !base.is_dir() {
            continue;
        }
        let walker = WalkDir::new(&base)
            .max_depth(MAX_DEPTH)
            .into_iter()
            .filter_entry(|e| !is_skipped(e));
        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(project_root).unwrap_or(path);
            if !is_research_target(&relative.to_string_lossy()) {
                continue;
            }
            if !seen.insert(path.to_path_buf()) {
                continue;
            }
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "skipping unreadable file in research sweep");
                    continue;
                }
            };
            let violations = verify_research(&content, disabled);
            if !violations.is_empty() {
                findings.push(SweepFinding {
                    path: relative.to_path_buf(),
                    violations,
                });
            }
        }
    }
    findings
}

/// Render sweep findings as a denial reason.
pub fn sweep_reason(findings: &[SweepFinding]) -> String {
    let mut out = String::from("Quadgate blocked session completion:\n");
    for finding in findings {
        out.push_str(&format!("\nFile: {}\n", finding.path.display()));
        for v in &finding.violations {
            out.push_str(&format!("  [Cycle {} - {}] {}\n", v.cycle, v.rule_id, v.message));
        }
    }
    out
}
