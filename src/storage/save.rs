use std::path::{Path, PathBuf};

use log::debug;
use sled::IVec;

use crate::arcade::errors::ArcadeResult;
use crate::storage::{SaveSnapshot, StatKey, StatStore, UnlockKey, UnlockStore};

const TREE_STATS: &str = "stats";
const TREE_FLAGS: &str = "flags";

/// Sled-backed save data: stat counters and unlock flags.
pub struct SaveStore {
    path: PathBuf,
    _db: sled::Db,
    stats: sled::Tree,
    flags: sled::Tree,
}

impl SaveStore {
    /// Open (or create) the save database rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> ArcadeResult<Self> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let stats = db.open_tree(TREE_STATS)?;
        let flags = db.open_tree(TREE_FLAGS)?;
        debug!("Opened save store at {}", path_ref.display());
        Ok(Self {
            path: path_ref.to_path_buf(),
            _db: db,
            stats,
            flags,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw copy of everything in the save, for `status --json`.
    pub fn snapshot(&self) -> ArcadeResult<SaveSnapshot> {
        SaveSnapshot::capture(self)
    }

    fn serialize<T: serde::Serialize>(value: &T) -> ArcadeResult<Vec<u8>> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> ArcadeResult<T> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }
}

impl StatStore for SaveStore {
    fn get(&self, key: StatKey) -> ArcadeResult<u32> {
        let Some(bytes) = self.stats.get(key.storage_key().as_bytes())? else {
            return Ok(0);
        };
        Self::deserialize(bytes)
    }

    fn set(&mut self, key: StatKey, value: u32) -> ArcadeResult<()> {
        let bytes = Self::serialize(&value)?;
        self.stats.insert(key.storage_key().into_bytes(), bytes)?;
        self.stats.flush()?;
        Ok(())
    }
}

impl UnlockStore for SaveStore {
    fn get_flag(&self, key: UnlockKey) -> ArcadeResult<bool> {
        let Some(bytes) = self.flags.get(key.storage_key().as_bytes())? else {
            return Ok(false);
        };
        Self::deserialize(bytes)
    }

    fn set_flag(&mut self, key: UnlockKey) -> ArcadeResult<()> {
        let bytes = Self::serialize(&true)?;
        self.flags.insert(key.storage_key().into_bytes(), bytes)?;
        self.flags.flush()?;
        Ok(())
    }
}
