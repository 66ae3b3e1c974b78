//! Screenshot artifact persistence.
//!
//! Screenshot bytes arrive PNG-encoded from the browser; they are written
//! verbatim. Re-running a script overwrites the same paths, so repeated runs
//! leave no residual state.

use crate::result::VerifyResult;
use std::path::{Path, PathBuf};

/// Resolve an artifact path against the artifact directory.
///
/// Absolute paths pass through untouched.
#[must_use]
pub fn resolve(artifact_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        artifact_dir.join(path)
    }
}

/// Write PNG bytes to a path, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file written
pub fn save_png(path: &Path, bytes: &[u8]) -> VerifyResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "screenshot written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let resolved = resolve(Path::new("verification"), Path::new("homepage.png"));
        assert_eq!(resolved, PathBuf::from("verification/homepage.png"));
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let resolved = resolve(Path::new("verification"), Path::new("/tmp/shot.png"));
        assert_eq!(resolved, PathBuf::from("/tmp/shot.png"));
    }

    #[test]
    fn test_save_png_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/shot.png");
        save_png(&path, b"not-really-png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"not-really-png");
    }

    #[test]
    fn test_save_png_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        save_png(&path, b"first").unwrap();
        save_png(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
