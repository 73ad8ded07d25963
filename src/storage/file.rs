use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::StorageMedium;

/// One JSON file per key inside `dir`. Writes land in a temp file that is
/// fsynced and renamed over the target, so readers never see a partial value.
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Maps a key to `<dir>/<key>.json`, replacing anything outside
    /// `[A-Za-z0-9._-]` with `_`. The mapping is lossy (`a/b` and `a_b` share
    /// a file), so callers must use keys that are already filename-safe.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageMedium for FileMedium {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".tmp_{}", uuid::Uuid::new_v4()));

        let result = write_synced(&tmp_path, value).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .with_context(|| format!("failed to replace {}", path.display()))
        });

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
            return result;
        }

        sync_dir(&self.dir);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

fn write_synced(path: &Path, value: &str) -> anyhow::Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(value.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync {}", path.display()))?;
    Ok(())
}

// Best effort: not every platform can open a directory for syncing.
fn sync_dir(dir: &Path) {
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}
