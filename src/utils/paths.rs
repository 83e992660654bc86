//! Path normalization

use std::path::{Path, PathBuf};

/// Resolve `path` against `base`.
///
/// Absolute inputs are returned unchanged. Existence is not checked.
pub fn normalize_path(path: impl AsRef<Path>, base: &Path) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Strip `root` plus its trailing separator from `key` for display.
///
/// Keys that do not start with `root` are returned as-is.
pub fn display_relative<'a>(key: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return key;
    }
    let root = root.trim_end_matches(['/', '\\']);
    match key.strip_prefix(root) {
        Some(rest) if rest.starts_with(['/', '\\']) => &rest[1..],
        _ => key,
    }
}
