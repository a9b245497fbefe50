use crate::arcade::errors::{ArcadeError, ArcadeResult};
use crate::arcade::minigame::MinigameId;
use crate::config::{Config, EnabledGames, EntryCosts};

/// Validated policy inputs for the ledgers and the session controller.
///
/// Only obtainable through [`ArcadeSettings::from_config`] or [`ArcadeSettingsBuilder::build`],
/// both of which run [`Config::validate`]. Fields are read-only afterwards, so the reward
/// window is always ordered and the multiplier is never zero.
#[derive(Debug, Clone)]
pub struct ArcadeSettings {
    unlock_all: bool,
    high_scores: bool,
    high_score_fanfare: bool,
    coin_multiplier: u32,
    min_coins_per_game: u32,
    max_coins_per_game: u32,
    free_play: bool,
    custom_bgm: bool,
    quick_replay: bool,
    tutorials: bool,
    costs: EntryCosts,
    enabled: EnabledGames,
}

impl ArcadeSettings {
    pub fn from_config(config: &Config) -> ArcadeResult<Self> {
        config.validate().map_err(ArcadeError::InvalidConfig)?;
        Ok(Self::from_valid(config))
    }

    /// Start from the default configuration and adjust individual switches.
    pub fn builder() -> ArcadeSettingsBuilder {
        ArcadeSettingsBuilder {
            config: Config::default(),
        }
    }

    fn from_valid(config: &Config) -> Self {
        let arcade = &config.arcade;
        Self {
            unlock_all: arcade.unlock_all,
            high_scores: arcade.high_scores,
            high_score_fanfare: arcade.high_score_fanfare,
            coin_multiplier: arcade.coin_multiplier,
            min_coins_per_game: arcade.min_coins_per_game,
            max_coins_per_game: arcade.max_coins_per_game,
            free_play: arcade.free_play,
            custom_bgm: arcade.custom_bgm,
            quick_replay: arcade.quick_replay,
            tutorials: arcade.tutorials,
            costs: config.costs.clone(),
            enabled: config.enabled.clone(),
        }
    }

    pub fn unlock_all(&self) -> bool {
        self.unlock_all
    }

    pub fn high_scores(&self) -> bool {
        self.high_scores
    }

    pub fn high_score_fanfare(&self) -> bool {
        self.high_score_fanfare
    }

    pub fn coin_multiplier(&self) -> u32 {
        self.coin_multiplier
    }

    pub fn min_coins_per_game(&self) -> u32 {
        self.min_coins_per_game
    }

    pub fn max_coins_per_game(&self) -> u32 {
        self.max_coins_per_game
    }

    pub fn free_play(&self) -> bool {
        self.free_play
    }

    pub fn custom_bgm(&self) -> bool {
        self.custom_bgm
    }

    pub fn quick_replay(&self) -> bool {
        self.quick_replay
    }

    pub fn tutorials(&self) -> bool {
        self.tutorials
    }

    pub fn costs(&self) -> &EntryCosts {
        &self.costs
    }

    pub fn is_enabled(&self, id: MinigameId) -> bool {
        self.enabled.is_enabled(id)
    }

    /// Clamp a minigame's reward into the per-session window.
    pub fn session_reward(&self, coins_won: u32) -> u32 {
        coins_won.clamp(self.min_coins_per_game, self.max_coins_per_game)
    }
}

impl Default for ArcadeSettings {
    fn default() -> Self {
        Self::from_valid(&Config::default())
    }
}

/// Edits a [`Config`] and validates it on [`build`](ArcadeSettingsBuilder::build).
#[derive(Debug, Clone)]
pub struct ArcadeSettingsBuilder {
    config: Config,
}

impl ArcadeSettingsBuilder {
    pub fn unlock_all(mut self, on: bool) -> Self {
        self.config.arcade.unlock_all = on;
        self
    }

    pub fn high_scores(mut self, on: bool) -> Self {
        self.config.arcade.high_scores = on;
        self
    }

    pub fn high_score_fanfare(mut self, on: bool) -> Self {
        self.config.arcade.high_score_fanfare = on;
        self
    }

    pub fn coin_multiplier(mut self, multiplier: u32) -> Self {
        self.config.arcade.coin_multiplier = multiplier;
        self
    }

    pub fn reward_window(mut self, min: u32, max: u32) -> Self {
        self.config.arcade.min_coins_per_game = min;
        self.config.arcade.max_coins_per_game = max;
        self
    }

    /// Free play is only accepted together with `debug(true)`.
    pub fn free_play(mut self, on: bool) -> Self {
        self.config.arcade.free_play = on;
        self
    }

    pub fn debug(mut self, on: bool) -> Self {
        self.config.debug.enabled = on;
        self
    }

    pub fn custom_bgm(mut self, on: bool) -> Self {
        self.config.arcade.custom_bgm = on;
        self
    }

    pub fn quick_replay(mut self, on: bool) -> Self {
        self.config.arcade.quick_replay = on;
        self
    }

    pub fn tutorials(mut self, on: bool) -> Self {
        self.config.arcade.tutorials = on;
        self
    }

    pub fn costs(mut self, costs: EntryCosts) -> Self {
        self.config.costs = costs;
        self
    }

    pub fn enabled(mut self, id: MinigameId, on: bool) -> Self {
        self.config.enabled.set(id, on);
        self
    }

    pub fn build(self) -> ArcadeResult<ArcadeSettings> {
        ArcadeSettings::from_config(&self.config)
    }
}
