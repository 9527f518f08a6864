//! File-backed repository.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use uuid::Uuid;

use super::{RepositoryError, StateRepository, StorageKey};

/// Repository storing each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// Open (and create if needed) a repository rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file repository");
        Ok(Self { dir })
    }

    /// The directory holding the JSON documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateRepository for FileRepository {
    fn get(&self, key: StorageKey) -> Result<Option<String>, RepositoryError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip_all, fields(key = %key, bytes = value.len()))]
    fn put(&self, key: StorageKey, value: &str) -> Result<(), RepositoryError> {
        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn delete(&self, key: StorageKey) -> Result<(), RepositoryError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("eclat-file-repo-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_round_trip_and_delete() {
        let dir = scratch_dir();
        let repo = FileRepository::open(&dir).unwrap();

        assert_eq!(repo.get(StorageKey::Favorites).unwrap(), None);
        repo.put(StorageKey::Favorites, r#"[{"id":"p5"}]"#).unwrap();
        assert_eq!(
            repo.get(StorageKey::Favorites).unwrap().as_deref(),
            Some(r#"[{"id":"p5"}]"#)
        );
        assert!(dir.join("favorites.json").exists());

        repo.delete(StorageKey::Favorites).unwrap();
        repo.delete(StorageKey::Favorites).unwrap();
        assert_eq!(repo.get(StorageKey::Favorites).unwrap(), None);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = scratch_dir();
        let repo = FileRepository::open(&dir).unwrap();
        repo.put(StorageKey::GuestUser, "{}").unwrap();
        repo.put(StorageKey::GuestUser, "{\"a\":1}").unwrap();

        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["guestUser.json"]);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = scratch_dir();
        FileRepository::open(&dir)
            .unwrap()
            .put(StorageKey::Token, "\"demo-token-1\"")
            .unwrap();
        let reopened = FileRepository::open(&dir).unwrap();
        assert_eq!(
            reopened.get(StorageKey::Token).unwrap().as_deref(),
            Some("\"demo-token-1\"")
        );

        fs::remove_dir_all(dir).unwrap();
    }
}
