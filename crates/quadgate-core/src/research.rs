//! Path classification: research targets and file extensions.
//!
//! Classification is string-based and separator-agnostic: forward- and
//! back-slash paths classify identically, so content produced on Windows
//! hosts gates the same way.

/// Lowercased file extension of `path`, including the leading dot
/// (`".py"`), or the empty string when there is none.
///
/// Dotfiles (`.gitignore`) and trailing-dot names (`file.`) have no
/// extension. Only the final path component is considered, so directory
/// names containing dots do not leak into the result.
pub fn file_extension(path: &str) -> String {
    let name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);
    match name.rfind('.') {
        // A dot at position 0 is a dotfile; a trailing dot is empty.
        Some(idx) if idx > 0 && idx + 1 < name.len() => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Whether `path` names a research document.
///
/// True iff the path ends in `.md` and either lives under a `research/`
/// directory segment or has "research" in its file name. Comparison is
/// case-insensitive with path separators normalized first.
pub fn is_research_target(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let normalized = path.replace('\\', "/").to_lowercase();
    if !normalized.ends_with(".md") {
        return false;
    }
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
    normalized.contains("/research/")
        || normalized.starts_with("research/")
        || file_name.contains("research")
}
