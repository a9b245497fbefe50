//! Per-game best scores and play counts on top of the stat store.
//!
//! Stored high scores above [`HIGH_SCORE_CEILING`] can only come from a damaged save, so
//! every read checks the value and resets it to zero when it is out of range.

use log::{debug, warn};

use crate::arcade::errors::ArcadeResult;
use crate::arcade::minigame::MinigameId;
use crate::metrics;
use crate::storage::{StatKey, StatStore};

/// Largest score a save can legitimately hold.
pub const HIGH_SCORE_CEILING: u32 = 999_999;

pub struct HighScoreLedger<'s, S: StatStore + ?Sized> {
    store: &'s mut S,
    enabled: bool,
}

impl<'s, S: StatStore + ?Sized> HighScoreLedger<'s, S> {
    /// `enabled` mirrors the `high_scores` switch; when false scores read as 0 and never update.
    pub fn new(store: &'s mut S, enabled: bool) -> Self {
        Self { store, enabled }
    }

    pub fn get_high_score(&mut self, id: MinigameId) -> ArcadeResult<u32> {
        if !self.enabled {
            return Ok(0);
        }
        let key = StatKey::HighScore(id);
        let score = self.store.get(key)?;
        if score > HIGH_SCORE_CEILING {
            warn!(
                target: "gamecorner::integrity",
                "high score for {} was {} (above {}); resetting to 0",
                id,
                score,
                HIGH_SCORE_CEILING
            );
            self.store.set(key, 0)?;
            metrics::inc_high_score_repairs();
            return Ok(0);
        }
        Ok(score)
    }

    pub fn is_new_high_score(&mut self, id: MinigameId, score: u32) -> ArcadeResult<bool> {
        if !self.enabled {
            return Ok(false);
        }
        Ok(score > self.get_high_score(id)?)
    }

    /// Raise the stored record to `score` (capped at the ceiling); never lowers it.
    pub fn update_high_score(&mut self, id: MinigameId, score: u32) -> ArcadeResult<()> {
        if !self.enabled {
            return Ok(());
        }
        let score = score.min(HIGH_SCORE_CEILING);
        let key = StatKey::HighScore(id);
        let current = self.store.get(key)?;
        if score > current {
            self.store.set(key, score)?;
            debug!("high score for {}: {} -> {}", id, current, score);
        }
        Ok(())
    }

    pub fn increment_play_count(&mut self, id: MinigameId) -> ArcadeResult<()> {
        self.store.increment(StatKey::PlayCount(id))
    }

    pub fn get_play_count(&self, id: MinigameId) -> ArcadeResult<u32> {
        self.store.get(StatKey::PlayCount(id))
    }
}
