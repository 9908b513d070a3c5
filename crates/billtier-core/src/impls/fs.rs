//! Filesystem helpers shared by the directory-backed stores.
//!
//! - キーは root 配下の相対パスに限定（絶対パス・`..` は拒否）
//! - 書き込みは一時ファイル + fsync + rename でアトミックに行う

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::TierError;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Join `key` onto `root`, refusing anything that could leave `root`.
pub(crate) fn resolve_key(root: &Path, key: &str) -> Result<PathBuf, TierError> {
    let invalid = |reason| TierError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    let mut relative = PathBuf::new();
    for component in Path::new(key).components() {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid("parent directory segments are not allowed"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute keys are not allowed"));
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(invalid("key has no file name"));
    }
    Ok(root.join(relative))
}

/// Read a whole file; a missing file is `None`.
pub(crate) async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, TierError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TierError::io(path, e)),
    }
}

/// Write `bytes` to `path` so readers see either the old or the new content.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), TierError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TierError::io(parent, e))?;
    }

    let temp = temp_path(path);
    let written = async {
        let mut file = fs::File::create(&temp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp, path).await
    }
    .await;

    if let Err(e) = written {
        // best effort; the temp name is never read back
        let _ = fs::remove_file(&temp).await;
        return Err(TierError::io(path, e));
    }
    Ok(())
}

/// Remove a file; a missing file counts as removed.
pub(crate) async fn remove_if_exists(path: &Path) -> Result<(), TierError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TierError::io(path, e)),
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    target.with_file_name(format!(".{name}.tmp.{}.{n}", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::parent("../escape.json")]
    #[case::nested_parent("billing-archive/../../escape.json")]
    #[case::absolute("/etc/passwd")]
    #[case::empty("")]
    #[case::only_dots("./.")]
    fn rejects_escaping_keys(#[case] key: &str) {
        let result = resolve_key(Path::new("/srv/cold"), key);
        assert!(matches!(result, Err(TierError::InvalidKey { .. })), "{key}");
    }

    #[test]
    fn resolves_relative_keys_under_root() {
        let path = resolve_key(Path::new("/srv/cold"), "billing-archive/A1.json").unwrap();
        assert_eq!(path, Path::new("/srv/cold/billing-archive/A1.json"));
    }

    #[tokio::test]
    async fn write_atomic_creates_parents_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.json");

        write_atomic(&target, b"first").await.unwrap();
        write_atomic(&target, b"second").await.unwrap();

        assert_eq!(read_optional(&target).await.unwrap(), Some(b"second".to_vec()));
        let entries: Vec<_> = std::fs::read_dir(dir.path().join("a/b"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn missing_files_read_as_none_and_remove_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing.json");

        assert!(read_optional(&target).await.unwrap().is_none());
        remove_if_exists(&target).await.unwrap();
    }
}
