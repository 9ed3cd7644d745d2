//! Path policy for tools that read files from disk.
//!
//! Paths are canonicalized before use, which resolves `.`, `..` and symlinks.
//! When a root directory is configured, the resolved path must lie inside it.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::config::SecurityConfig;

/// Reasons a path can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum PathPolicyError {
    #[error("No such file: {path}")]
    NotFound { path: PathBuf },

    #[error("Path {path} is outside the allowed root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Cannot resolve {path}: {source}")]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve a client-supplied path under the configured policy.
///
/// Returns the canonical path on success.
pub fn resolve_path(input: &str, policy: &SecurityConfig) -> Result<PathBuf, PathPolicyError> {
    let resolved = canonical(Path::new(input))?;

    let Some(root) = policy.root_path.as_deref() else {
        return Ok(resolved);
    };

    let root = canonical(root)?;
    if !resolved.starts_with(&root) {
        warn!("Rejected path outside root: {}", resolved.display());
        return Err(PathPolicyError::OutsideRoot {
            path: resolved,
            root,
        });
    }

    Ok(resolved)
}

fn canonical(path: &Path) -> Result<PathBuf, PathPolicyError> {
    path.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PathPolicyError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PathPolicyError::Unresolvable {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn policy(root: Option<&Path>) -> SecurityConfig {
        SecurityConfig {
            root_path: root.map(Path::to_path_buf),
        }
    }

    #[test]
    fn test_unrestricted_policy_resolves_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.csv");
        fs::write(&file, "a\n1\n").unwrap();

        let resolved = resolve_path(file.to_str().unwrap(), &policy(None)).unwrap();
        assert_eq!(resolved, file.canonicalize().unwrap());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.csv");

        let result = resolve_path(missing.to_str().unwrap(), &policy(Some(temp_dir.path())));
        assert!(matches!(result, Err(PathPolicyError::NotFound { .. })));
    }

    #[test]
    fn test_dot_dot_cannot_escape_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.csv"), "x\n").unwrap();

        let escape = root.join("../secret.csv");
        let result = resolve_path(escape.to_str().unwrap(), &policy(Some(&root)));
        assert!(matches!(result, Err(PathPolicyError::OutsideRoot { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_outside_root() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target = outside_dir.path().join("target.csv");
        let link = root_dir.path().join("link.csv");
        fs::write(&target, "x\n").unwrap();
        symlink(&target, &link).unwrap();

        let result = resolve_path(link.to_str().unwrap(), &policy(Some(root_dir.path())));
        assert!(matches!(result, Err(PathPolicyError::OutsideRoot { .. })));
    }
}
