use log::debug;

use crate::arcade::errors::ArcadeResult;
use crate::arcade::minigame::MinigameId;
use crate::arcade::registry::Registry;
use crate::storage::UnlockStore;

/// Unlock checks against the flag store, honoring the global unlock-all override.
pub struct UnlockLedger<'s, S: UnlockStore + ?Sized> {
    store: &'s mut S,
    unlock_all: bool,
}

impl<'s, S: UnlockStore + ?Sized> UnlockLedger<'s, S> {
    pub fn new(store: &'s mut S, unlock_all: bool) -> Self {
        Self { store, unlock_all }
    }

    pub fn check_unlocked(&self, registry: &Registry, id: MinigameId) -> ArcadeResult<bool> {
        if self.unlock_all {
            return Ok(true);
        }
        self.store.get_flag(registry.lookup(id).unlock_key)
    }

    pub fn unlock(&mut self, registry: &Registry, id: MinigameId) -> ArcadeResult<()> {
        self.store.set_flag(registry.lookup(id).unlock_key)?;
        debug!("unlocked {}", id);
        Ok(())
    }

    pub fn unlock_all(&mut self, registry: &Registry) -> ArcadeResult<()> {
        for id in registry.all_ids() {
            self.unlock(registry, id)?;
        }
        Ok(())
    }

    /// Raw-index variant used by menu code; out-of-range indices report locked.
    pub fn check_unlocked_index(&self, registry: &Registry, index: usize) -> ArcadeResult<bool> {
        match MinigameId::try_from(index) {
            Ok(id) => self.check_unlocked(registry, id),
            Err(_) => Ok(false),
        }
    }

    /// Raw-index variant; out-of-range indices are ignored.
    pub fn unlock_index(&mut self, registry: &Registry, index: usize) -> ArcadeResult<()> {
        match MinigameId::try_from(index) {
            Ok(id) => self.unlock(registry, id),
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntryCosts;
    use crate::storage::MemoryStore;

    #[test]
    fn games_start_locked() {
        let registry = Registry::standard(&EntryCosts::default());
        let mut store = MemoryStore::new();
        let ledger = UnlockLedger::new(&mut store, false);
        for id in MinigameId::ALL {
            assert!(!ledger.check_unlocked(&registry, id).unwrap());
        }
    }

    #[test]
    fn unlock_sets_single_flag() {
        let registry = Registry::standard(&EntryCosts::default());
        let mut store = MemoryStore::new();
        let mut ledger = UnlockLedger::new(&mut store, false);
        ledger.unlock(&registry, MinigameId::Gacha).unwrap();
        assert!(ledger.check_unlocked(&registry, MinigameId::Gacha).unwrap());
        assert!(!ledger.check_unlocked(&registry, MinigameId::Snake).unwrap());
    }

    #[test]
    fn unlock_all_sets_every_flag() {
        let registry = Registry::standard(&EntryCosts::default());
        let mut store = MemoryStore::new();
        let mut ledger = UnlockLedger::new(&mut store, false);
        ledger.unlock_all(&registry).unwrap();
        for id in MinigameId::ALL {
            assert!(ledger.check_unlocked(&registry, id).unwrap());
        }
    }

    #[test]
    fn override_reports_unlocked_without_writing() {
        let registry = Registry::standard(&EntryCosts::default());
        let mut store = MemoryStore::new();
        let ledger = UnlockLedger::new(&mut store, true);
        assert!(ledger.check_unlocked(&registry, MinigameId::Derby).unwrap());
        assert!(!store
            .get_flag(registry.lookup(MinigameId::Derby).unlock_key)
            .unwrap());
    }

    #[test]
    fn out_of_range_indices_are_safe_defaults() {
        let registry = Registry::standard(&EntryCosts::default());
        let mut store = MemoryStore::new();
        let mut ledger = UnlockLedger::new(&mut store, false);
        ledger.unlock_index(&registry, 42).unwrap();
        assert!(!ledger.check_unlocked_index(&registry, 42).unwrap());
        ledger.unlock_index(&registry, 0).unwrap();
        assert!(ledger.check_unlocked_index(&registry, 0).unwrap());
    }
}
