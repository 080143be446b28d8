//! File-based ProgressRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quiz_core::LifelineInventory;

use super::{read_json, write_json};
use crate::repository::{ProgressRepository, RepositoryError, Result};

/// Stores each progress value as its own JSON document.
///
/// # File Layout
///
/// ```text
/// base_dir/
/// ├── coins.json       # 120
/// ├── lifelines.json   # {"fifty_fifty": 1, "skip": 0, "extra_time": 2}
/// └── unlocks.json     # ["science/amateur", "history/amateur"]
/// ```
///
/// Saves are serialized so two writers never share a temp file.
pub struct FileProgressRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProgressRepository {
    pub const COINS_FILE: &'static str = "coins.json";
    pub const LIFELINES_FILE: &'static str = "lifelines.json";
    pub const UNLOCKS_FILE: &'static str = "unlocks.json";

    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    fn save<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        write_json(&self.path(file), value)
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load_coins(&self) -> Result<Option<u64>> {
        read_json(&self.path(Self::COINS_FILE))
    }

    fn save_coins(&self, balance: u64) -> Result<()> {
        self.save(Self::COINS_FILE, &balance)
    }

    fn load_lifelines(&self) -> Result<Option<LifelineInventory>> {
        read_json(&self.path(Self::LIFELINES_FILE))
    }

    fn save_lifelines(&self, inventory: &LifelineInventory) -> Result<()> {
        self.save(Self::LIFELINES_FILE, inventory)
    }

    fn load_unlocks(&self) -> Result<Option<Vec<String>>> {
        read_json(&self.path(Self::UNLOCKS_FILE))
    }

    fn save_unlocks(&self, flags: &[String]) -> Result<()> {
        self.save(Self::UNLOCKS_FILE, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::LifelineKind;

    #[test]
    fn empty_directory_is_a_new_player() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileProgressRepository::new(dir.path()).expect("repo");

        assert_eq!(repo.load_coins().expect("coins"), None);
        assert_eq!(repo.load_lifelines().expect("lifelines"), None);
        assert_eq!(repo.load_unlocks().expect("unlocks"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let inventory = LifelineInventory::new()
            .with(LifelineKind::Skip, 2)
            .with(LifelineKind::ExtraTime, 1);

        {
            let repo = FileProgressRepository::new(dir.path()).expect("repo");
            repo.save_coins(42).expect("save coins");
            repo.save_lifelines(&inventory).expect("save lifelines");
            repo.save_unlocks(&["science/amateur".to_string()])
                .expect("save unlocks");
        }

        let repo = FileProgressRepository::new(dir.path()).expect("reopen");
        assert_eq!(repo.load_coins().expect("coins"), Some(42));
        assert_eq!(repo.load_lifelines().expect("lifelines"), Some(inventory));
        assert_eq!(
            repo.load_unlocks().expect("unlocks"),
            Some(vec!["science/amateur".to_string()])
        );
    }

    #[test]
    fn lifelines_are_keyed_by_kind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileProgressRepository::new(dir.path()).expect("repo");
        repo.save_lifelines(&LifelineInventory::new().with(LifelineKind::FiftyFifty, 3))
            .expect("save");

        let raw = std::fs::read_to_string(dir.path().join(FileProgressRepository::LIFELINES_FILE))
            .expect("read");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json["fifty_fifty"], 3);
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(FileProgressRepository::COINS_FILE), "not json")
            .expect("write");
        let repo = FileProgressRepository::new(dir.path()).expect("repo");

        assert!(matches!(
            repo.load_coins(),
            Err(crate::repository::RepositoryError::CorruptedData(_))
        ));
    }
}
