//! Registry for arcade cabinets: static metadata plus one lifecycle implementation per game.
//!
//! The table always holds exactly one entry per [`MinigameId`], in declaration order, and is
//! fixed once built. There is no dynamic registration.

use crate::arcade::errors::{ArcadeError, ArcadeResult};
use crate::arcade::minigame::{Minigame, MinigameId, PlaceholderGame};
use crate::config::EntryCosts;
use crate::storage::UnlockKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinigameMetadata {
    pub id: MinigameId,
    pub name: &'static str,
    pub entry_cost: u32,
    pub unlock_key: UnlockKey,
}

struct RegistryEntry {
    metadata: MinigameMetadata,
    game: Box<dyn Minigame>,
}

pub struct Registry {
    entries: Vec<RegistryEntry>,
}

pub fn display_name(id: MinigameId) -> &'static str {
    match id {
        MinigameId::Snake => "SNAKE",
        MinigameId::FlappyBird => "FLAPPY BIRD",
        MinigameId::Blackjack => "BLACKJACK",
        MinigameId::VoltorbFlip => "VOLTORB FLIP",
        MinigameId::Gacha => "GACHA",
        MinigameId::Pachinko => "PACHINKO",
        MinigameId::BlockStacker => "BLOCK STACKER",
        MinigameId::Pinball => "PINBALL",
        MinigameId::Derby => "DERBY",
    }
}

impl Registry {
    /// Registry with placeholder cabinets for every game.
    pub fn standard(costs: &EntryCosts) -> Self {
        Self::with_games(costs, |_| Box::new(PlaceholderGame))
    }

    /// Build the table, asking `factory` for each game's implementation.
    pub fn with_games<F>(costs: &EntryCosts, mut factory: F) -> Self
    where
        F: FnMut(MinigameId) -> Box<dyn Minigame>,
    {
        let entries = MinigameId::ALL
            .iter()
            .map(|&id| RegistryEntry {
                metadata: MinigameMetadata {
                    id,
                    name: display_name(id),
                    entry_cost: costs.cost_for(id),
                    unlock_key: UnlockKey::for_game(id),
                },
                game: factory(id),
            })
            .collect();
        Registry { entries }
    }

    pub fn lookup(&self, id: MinigameId) -> &MinigameMetadata {
        &self.entries[id.index()].metadata
    }

    /// Lookup by raw index. Indices outside the registered set are an integrity error.
    pub fn lookup_index(&self, index: usize) -> ArcadeResult<&MinigameMetadata> {
        self.entries
            .get(index)
            .map(|entry| &entry.metadata)
            .ok_or(ArcadeError::InvalidId(index))
    }

    /// Every registered id in declaration order. Each call starts a fresh iteration.
    pub fn all_ids(&self) -> impl Iterator<Item = MinigameId> + '_ {
        self.entries.iter().map(|entry| entry.metadata.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn game_mut(&mut self, id: MinigameId) -> &mut dyn Minigame {
        self.entries[id.index()].game.as_mut()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.metadata))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::minigame::{FrameInput, GameResult, ScriptedGame, StepOutcome};

    #[test]
    fn every_id_has_exactly_one_record() {
        let registry = Registry::standard(&EntryCosts::default());
        assert_eq!(registry.len(), MinigameId::COUNT);
        for id in MinigameId::ALL {
            assert_eq!(registry.lookup(id).id, id);
        }
    }

    #[test]
    fn metadata_reflects_costs_and_names() {
        let registry = Registry::standard(&EntryCosts::default());
        let derby = registry.lookup(MinigameId::Derby);
        assert_eq!(derby.name, "DERBY");
        assert_eq!(derby.entry_cost, 100);
        assert_eq!(derby.unlock_key, UnlockKey::for_game(MinigameId::Derby));
        assert_eq!(registry.lookup(MinigameId::FlappyBird).name, "FLAPPY BIRD");
    }

    #[test]
    fn lookup_index_rejects_out_of_range() {
        let registry = Registry::standard(&EntryCosts::default());
        assert_eq!(registry.lookup_index(2).unwrap().id, MinigameId::Blackjack);
        assert!(matches!(
            registry.lookup_index(9),
            Err(ArcadeError::InvalidId(9))
        ));
    }

    #[test]
    fn all_ids_is_restartable_and_ordered() {
        let registry = Registry::standard(&EntryCosts::default());
        let first: Vec<_> = registry.all_ids().collect();
        let second: Vec<_> = registry.all_ids().collect();
        assert_eq!(first, MinigameId::ALL.to_vec());
        assert_eq!(first, second);
    }

    #[test]
    fn factory_supplies_per_game_implementation() {
        let mut registry = Registry::with_games(&EntryCosts::default(), |id| {
            Box::new(ScriptedGame::new(1, id.index() as u32 * 10, 0))
        });
        let game = registry.game_mut(MinigameId::Pachinko);
        game.init();
        assert_eq!(
            game.step(&FrameInput::default()),
            StepOutcome::Finished(GameResult {
                score: 50,
                coins_won: 0
            })
        );
    }
}
