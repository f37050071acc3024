//! Pure path algebra for sandbox resolution.
//!
//! These helpers never touch the filesystem, so the escape checks in the
//! resolver can be tested without fixture trees.

use std::path::{Component, Path, PathBuf};

/// Compute the lexical path from `base` to `path`.
///
/// Mirrors Node's `path.relative`: returns an empty path when the two are
/// equal, a plain subpath when `path` lives under `base`, and a
/// `..`-prefixed path when it does not. `.` segments are dropped; no
/// filesystem access, no symlink awareness.
#[must_use]
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let path: Vec<Component<'_>> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base
        .iter()
        .zip(path.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base.len() {
        out.push("..");
    }
    for component in &path[common..] {
        out.push(component);
    }
    out
}

/// Whether a lexical relative path escapes its base.
///
/// True when the first component is a parent-directory token. The empty
/// path (base and target were equal) does not escape.
#[must_use]
pub fn escapes(rel: &Path) -> bool {
    matches!(rel.components().next(), Some(Component::ParentDir))
}

/// Join `candidate` under `root`, grafting rather than substituting.
///
/// `PathBuf::push` replaces the whole path when given an absolute path;
/// here an absolute candidate must instead land *under* the root (the
/// sandbox layout never lets a candidate climb back out via its root).
/// Parent-directory tokens are kept as-is; the filesystem probe resolves
/// them.
#[must_use]
pub fn join_under(root: &Path, candidate: &Path) -> PathBuf {
    let mut out = root.to_path_buf();
    for component in candidate.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_subpath() {
        assert_eq!(
            relative_to(Path::new("/sandbox/out"), Path::new("/sandbox/out/app/src")),
            PathBuf::from("app/src")
        );
    }

    #[test]
    fn relative_to_equal_is_empty() {
        assert_eq!(
            relative_to(Path::new("app"), Path::new("app")),
            PathBuf::new()
        );
    }

    #[test]
    fn relative_to_sibling_escapes() {
        let rel = relative_to(Path::new("myworkspace"), Path::new("otherworkspace/pkg/mod"));
        assert_eq!(rel, PathBuf::from("../otherworkspace/pkg/mod"));
        assert!(escapes(&rel));
    }

    #[test]
    fn relative_to_strips_workspace_prefix() {
        let rel = relative_to(Path::new("myworkspace"), Path::new("myworkspace/pkg/mod"));
        assert_eq!(rel, PathBuf::from("pkg/mod"));
        assert!(!escapes(&rel));
    }

    #[test]
    fn relative_to_outside_base() {
        let rel = relative_to(Path::new("/sandbox/out"), Path::new("/elsewhere/src"));
        assert!(escapes(&rel));
    }

    #[test]
    fn empty_path_does_not_escape() {
        assert!(!escapes(Path::new("")));
    }

    #[test]
    fn join_under_relative() {
        assert_eq!(
            join_under(Path::new("/sandbox/out"), Path::new("app/src/util")),
            PathBuf::from("/sandbox/out/app/src/util")
        );
    }

    #[test]
    fn join_under_grafts_absolute_candidate() {
        assert_eq!(
            join_under(Path::new("/sandbox/out"), Path::new("/elsewhere/src/util")),
            PathBuf::from("/sandbox/out/elsewhere/src/util")
        );
    }

    #[test]
    fn join_under_drops_curdir_keeps_parent() {
        assert_eq!(
            join_under(Path::new("/out"), Path::new("app/./x")),
            PathBuf::from("/out/app/x")
        );
        assert_eq!(
            join_under(Path::new("/out"), Path::new("app/../x")),
            PathBuf::from("/out/app/../x")
        );
    }
}
