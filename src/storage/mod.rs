//! # Storage Module - Save Data Persistence
//!
//! The game corner keeps all cross-session progress in two small key spaces:
//!
//! - **Stats**: `u32` counters (coin balance, per-game high score, per-game play count)
//! - **Flags**: booleans (per-game unlock state)
//!
//! The arcade core only ever talks to the [`StatStore`] and [`UnlockStore`] traits, so the
//! backing storage can be swapped freely:
//!
//! - [`SaveStore`] - sled database on disk, used by the CLI
//! - [`MemoryStore`] - HashMap-backed fake for tests and dry runs
//!
//! ## Key layout
//!
//! ```text
//! stats/
//! ├── stat:coins
//! ├── stat:high_score:<slug>
//! └── stat:play_count:<slug>
//! flags/
//! └── flag:unlocked:<slug>
//! ```
//!
//! Every minigame owns its own high-score and play-count counter; no two games share a key.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::arcade::errors::ArcadeResult;
use crate::arcade::minigame::MinigameId;

mod save;

pub use save::SaveStore;

/// Key into the counter store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Coins,
    HighScore(MinigameId),
    PlayCount(MinigameId),
}

impl StatKey {
    pub fn storage_key(self) -> String {
        match self {
            StatKey::Coins => "stat:coins".to_string(),
            StatKey::HighScore(id) => format!("stat:high_score:{}", id.slug()),
            StatKey::PlayCount(id) => format!("stat:play_count:{}", id.slug()),
        }
    }
}

/// Opaque handle to a persisted unlock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnlockKey(MinigameId);

impl UnlockKey {
    pub fn for_game(id: MinigameId) -> Self {
        UnlockKey(id)
    }

    pub fn storage_key(self) -> String {
        format!("flag:unlocked:{}", self.0.slug())
    }
}

/// Persistent key → counter storage.
pub trait StatStore {
    fn get(&self, key: StatKey) -> ArcadeResult<u32>;
    fn set(&mut self, key: StatKey, value: u32) -> ArcadeResult<()>;

    /// Add one to the counter, saturating at `u32::MAX`.
    fn increment(&mut self, key: StatKey) -> ArcadeResult<()> {
        let current = self.get(key)?;
        self.set(key, current.saturating_add(1))
    }
}

/// Persistent boolean flag storage.
pub trait UnlockStore {
    fn get_flag(&self, key: UnlockKey) -> ArcadeResult<bool>;
    fn set_flag(&mut self, key: UnlockKey) -> ArcadeResult<()>;
}

/// In-memory store. Nothing is persisted; counters start at zero and flags at false.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    stats: HashMap<StatKey, u32>,
    flags: HashMap<UnlockKey, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a coin balance directly, bypassing the ledger (test setup only).
    pub fn with_coins(mut self, coins: u32) -> Self {
        self.stats.insert(StatKey::Coins, coins);
        self
    }
}

impl StatStore for MemoryStore {
    fn get(&self, key: StatKey) -> ArcadeResult<u32> {
        Ok(self.stats.get(&key).copied().unwrap_or(0))
    }

    fn set(&mut self, key: StatKey, value: u32) -> ArcadeResult<()> {
        self.stats.insert(key, value);
        Ok(())
    }
}

impl UnlockStore for MemoryStore {
    fn get_flag(&self, key: UnlockKey) -> ArcadeResult<bool> {
        Ok(self.flags.get(&key).copied().unwrap_or(false))
    }

    fn set_flag(&mut self, key: UnlockKey) -> ArcadeResult<()> {
        self.flags.insert(key, true);
        Ok(())
    }
}

/// Per-game section of a [`SaveSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecordSnapshot {
    pub game: MinigameId,
    pub high_score: u32,
    pub play_count: u32,
    pub unlocked: bool,
}

/// Point-in-time copy of the raw save data, used by `status --json`.
///
/// Values are read as stored: no corruption repair or configuration override is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub coins: u32,
    pub games: Vec<GameRecordSnapshot>,
    pub exported_at: DateTime<Utc>,
}

impl SaveSnapshot {
    pub fn capture<S>(store: &S) -> ArcadeResult<Self>
    where
        S: StatStore + UnlockStore + ?Sized,
    {
        let mut games = Vec::with_capacity(MinigameId::COUNT);
        for id in MinigameId::ALL {
            games.push(GameRecordSnapshot {
                game: id,
                high_score: store.get(StatKey::HighScore(id))?,
                play_count: store.get(StatKey::PlayCount(id))?,
                unlocked: store.get_flag(UnlockKey::for_game(id))?,
            });
        }
        Ok(SaveSnapshot {
            coins: store.get(StatKey::Coins)?,
            games,
            exported_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_defaults_to_zero_and_false() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StatKey::Coins).unwrap(), 0);
        assert!(!store
            .get_flag(UnlockKey::for_game(MinigameId::Derby))
            .unwrap());
    }

    #[test]
    fn increment_saturates_at_counter_width() {
        let mut store = MemoryStore::new();
        let key = StatKey::PlayCount(MinigameId::Gacha);
        store.set(key, u32::MAX - 1).unwrap();
        store.increment(key).unwrap();
        store.increment(key).unwrap();
        assert_eq!(store.get(key).unwrap(), u32::MAX);
    }

    #[test]
    fn keys_are_distinct_per_game() {
        let mut seen = std::collections::HashSet::new();
        for id in MinigameId::ALL {
            assert!(seen.insert(StatKey::HighScore(id).storage_key()));
            assert!(seen.insert(StatKey::PlayCount(id).storage_key()));
            assert!(seen.insert(UnlockKey::for_game(id).storage_key()));
        }
        assert!(seen.insert(StatKey::Coins.storage_key()));
    }

    #[test]
    fn snapshot_reads_every_game() {
        let mut store = MemoryStore::new().with_coins(42);
        store
            .set(StatKey::HighScore(MinigameId::Pinball), 7000)
            .unwrap();
        store
            .set_flag(UnlockKey::for_game(MinigameId::Pinball))
            .unwrap();
        let snap = SaveSnapshot::capture(&store).unwrap();
        assert_eq!(snap.coins, 42);
        assert_eq!(snap.games.len(), MinigameId::COUNT);
        let pinball = &snap.games[MinigameId::Pinball.index()];
        assert_eq!(pinball.high_score, 7000);
        assert!(pinball.unlocked);
        assert_eq!(snap.games[0].high_score, 0);
    }
}
