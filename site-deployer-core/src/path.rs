//! Mapping from local paths to bucket keys.

use std::path::{Component, Path, PathBuf};

use crate::error::{DeployError, Result};

/// Bucket key of `target` relative to `root`: forward-slash separated, never with
/// a leading slash. `root` itself maps to the empty key. `.` and `..` are
/// resolved lexically before the comparison.
pub fn relative_key(root: &Path, target: &Path) -> Result<String> {
    let root_abs = normalize_lexically(&absolute(root));
    let target_abs = normalize_lexically(&absolute(target));
    let rel = target_abs
        .strip_prefix(&root_abs)
        .map_err(|_| DeployError::NotUnderRoot {
            root: root_abs.clone(),
            target: target_abs.clone(),
        })?;

    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}

/// `name` under `prefix`. An empty prefix yields `name` unchanged; otherwise the
/// prefix is given a trailing `/` if it lacks one.
pub fn join_prefix(prefix: &str, name: &str) -> String {
    let prefix = normalize_prefix(prefix);
    format!("{prefix}{name}")
}

/// `""` for an empty prefix, otherwise `prefix` with a trailing `/` added if missing.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Drop `.` and fold `..` into its parent without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
