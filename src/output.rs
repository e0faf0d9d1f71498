use std::path::{Path, PathBuf};

use crate::backend::BackendKind;
use crate::error::{AnalyzerError, Result};

/// Create `<build_directory>/<sub_path>` if needed, intermediate
/// directories included. Already existing is success; anything else
/// (a file in the way, permissions) is a filesystem error.
pub fn ensure_output_directory(build_directory: &Path, sub_path: &str) -> Result<PathBuf> {
    let directory = build_directory.join(sub_path);
    std::fs::create_dir_all(&directory).map_err(|e| AnalyzerError::Filesystem {
        path: directory.clone(),
        source: e,
    })?;
    Ok(directory)
}

/// Final report location: the directory joined with the backend's
/// canonical file name.
pub fn output_file_path(directory: &Path, kind: BackendKind) -> PathBuf {
    directory.join(kind.file_name())
}

/// Write the fully rendered report, overwriting any previous one.
///
/// Callers hand over the complete text; a failure here never leaves a
/// partially rendered file from this run behind.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| AnalyzerError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_output_directory(dir.path(), "jaxrs-analyzer").unwrap();
        assert!(first.is_dir());
        let second = ensure_output_directory(dir.path(), "jaxrs-analyzer").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_create_makes_intermediate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let created = ensure_output_directory(dir.path(), "nested/report/dir").unwrap();
        assert!(created.is_dir());
    }

    #[test]
    fn test_create_fails_when_file_occupies_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jaxrs-analyzer"), b"not a dir").unwrap();

        let err = ensure_output_directory(dir.path(), "jaxrs-analyzer").unwrap_err();
        match err {
            AnalyzerError::Filesystem { path, .. } => {
                assert_eq!(path, dir.path().join("jaxrs-analyzer"));
            }
            other => panic!("expected Filesystem error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_file_path_uses_canonical_name() {
        let path = output_file_path(Path::new("/build/jaxrs-analyzer"), BackendKind::Swagger);
        assert_eq!(path, PathBuf::from("/build/jaxrs-analyzer/swagger.json"));

        let path = output_file_path(Path::new("/build/jaxrs-analyzer"), BackendKind::Plaintext);
        assert_eq!(
            path,
            PathBuf::from("/build/jaxrs-analyzer/rest-resources.txt")
        );
    }

    #[test]
    fn test_write_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rest-resources.txt");
        write_report(&path, "first run, longer content").unwrap();
        write_report(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
