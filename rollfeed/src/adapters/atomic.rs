//! Whole-file replacement via a sibling temp file and rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Replace `path` with `contents`. Readers see either the old file or the
/// new one, never a partial write.
pub(crate) async fn write_atomic(path: PathBuf, contents: Vec<u8>) -> Result<(), StoreError> {
    tokio::task::spawn_blocking(move || write_atomic_blocking(&path, &contents))
        .await
        .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

fn write_atomic_blocking(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    // The temp file must live on the same filesystem for rename to be atomic
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Temp files are created owner-only; keep the target readable as before
    let permissions = target_permissions(path);
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions)?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| StoreError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    Ok(())
}

/// Permissions of the file being replaced, or the usual file mode when
/// there is none yet
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_atomic(path.clone(), b"first".to_vec()).await.unwrap();
        write_atomic(path.clone(), b"second".to_vec()).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn fails_when_target_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();

        let result = write_atomic(target, b"data".to_vec()).await;

        assert!(matches!(result, Err(StoreError::Persist { .. })));
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rewrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for existing in [0o644, 0o640] {
            let path = dir.path().join(format!("feed-{:o}.xml", existing));
            fs::write(&path, b"old").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(existing)).unwrap();

            write_atomic(path.clone(), b"new".to_vec()).await.unwrap();

            assert_eq!(mode(&path), existing);
            assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn new_file_is_world_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.xml");

        write_atomic(path.clone(), b"<rss/>".to_vec()).await.unwrap();

        assert_eq!(mode(&path), 0o644);
    }
}
