//! Output directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use super::DownloadError;

/// Resolves `output_dir` against `base_dir` and creates it (with parents) if
/// missing. An empty `output_dir` means `base_dir` itself, which is used as-is.
/// An absolute `output_dir` replaces `base_dir`.
pub fn prepare_output_dir(base_dir: &Path, output_dir: &Path) -> Result<PathBuf, DownloadError> {
    if output_dir.as_os_str().is_empty() {
        return Ok(base_dir.to_path_buf());
    }

    let dir = base_dir.join(output_dir);
    if !dir.is_dir() {
        fs::create_dir_all(&dir).map_err(|source| DownloadError::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!("created output directory {}", dir.display());
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_means_base_dir() {
        let base = tempfile::tempdir().unwrap();
        let dir = prepare_output_dir(base.path(), Path::new("")).unwrap();
        assert_eq!(dir, base.path());
    }

    #[test]
    fn creates_nested_dirs_and_tolerates_existing() {
        let base = tempfile::tempdir().unwrap();
        let rel = Path::new("casts/show");
        let dir = prepare_output_dir(base.path(), rel).unwrap();
        assert_eq!(dir, base.path().join("casts/show"));
        assert!(dir.is_dir());
        let again = prepare_output_dir(base.path(), rel).unwrap();
        assert_eq!(again, dir);
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let base = tempfile::tempdir().unwrap();
        fs::write(base.path().join("taken"), b"x").unwrap();
        let err = prepare_output_dir(base.path(), Path::new("taken/sub")).unwrap_err();
        assert!(matches!(err, DownloadError::CreateOutputDir { .. }));
    }
}
