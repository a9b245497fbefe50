//! # Configuration Management Module
//!
//! All game corner switches live in one TOML file that is loaded and validated once at
//! startup. The validated values are then turned into [`ArcadeSettings`] and threaded
//! through the ledgers and the session controller; nothing reads configuration ambiently.
//!
//! ## Configuration Structure
//!
//! - [`ArcadeConfig`] - economy and high-score policy switches
//! - [`EntryCosts`] - coins required to start each minigame
//! - [`EnabledGames`] - which minigames appear at all
//! - [`DebugConfig`] - test-only overrides (free play)
//! - [`StorageConfig`] - location of the save database
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gamecorner::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Coin multiplier: {}", config.arcade.coin_multiplier);
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [arcade]
//! unlock_all = false
//! high_scores = true
//! coin_multiplier = 10   # 10 = x1.0, 20 = x2.0, 5 = x0.5
//! min_coins_per_game = 1
//! max_coins_per_game = 999
//!
//! [costs]
//! snake = 10
//! derby = 100
//!
//! [enabled]
//! pinball = false        # hidden from the menu
//!
//! [storage]
//! data_dir = "./data"
//! ```
//!
//! Every section and field has a default, so a partial file is accepted.
//!
//! [`ArcadeSettings`]: crate::arcade::ArcadeSettings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::arcade::coins::MAX_COINS;
use crate::arcade::minigame::MinigameId;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub arcade: ArcadeConfig,
    #[serde(default)]
    pub costs: EntryCosts,
    #[serde(default)]
    pub enabled: EnabledGames,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Report every minigame as unlocked regardless of saved flags.
    pub unlock_all: bool,
    /// Track high scores across saves. When false, high-score reads return 0 and updates are ignored.
    pub high_scores: bool,
    /// Show the "NEW HIGH SCORE!" message and play the win fanfare on a new record.
    pub high_score_fanfare: bool,
    /// Reward multiplier scaled by 10 (10 = x1.0). Must be at least 1.
    pub coin_multiplier: u32,
    /// Coins awarded per session even for a zero result.
    pub min_coins_per_game: u32,
    /// Per-session reward cap. Cannot exceed the coin system limit (9999).
    pub max_coins_per_game: u32,
    /// Ignore entry costs. Only accepted when `[debug] enabled = true`.
    pub free_play: bool,
    /// Use custom minigame music instead of the shared game corner soundtrack.
    pub custom_bgm: bool,
    /// Offer "Play Again?" after a session settles.
    pub quick_replay: bool,
    /// Show a how-to-play message the first time each minigame is played.
    pub tutorials: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            unlock_all: false,
            high_scores: true,
            high_score_fanfare: true,
            coin_multiplier: 10,
            min_coins_per_game: 1,
            max_coins_per_game: 999,
            free_play: false,
            custom_bgm: false,
            quick_replay: true,
            tutorials: true,
        }
    }
}

/// Coins required to start each minigame. Zero means free to play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntryCosts {
    pub snake: u32,
    pub flappy_bird: u32,
    pub blackjack: u32,
    pub voltorb_flip: u32,
    pub gacha: u32,
    pub pachinko: u32,
    pub block_stacker: u32,
    pub pinball: u32,
    pub derby: u32,
}

impl Default for EntryCosts {
    fn default() -> Self {
        Self {
            snake: 10,
            flappy_bird: 20,
            blackjack: 50,
            voltorb_flip: 0,
            gacha: 20,
            pachinko: 10,
            block_stacker: 30,
            pinball: 50,
            derby: 100,
        }
    }
}

impl EntryCosts {
    pub fn cost_for(&self, id: MinigameId) -> u32 {
        match id {
            MinigameId::Snake => self.snake,
            MinigameId::FlappyBird => self.flappy_bird,
            MinigameId::Blackjack => self.blackjack,
            MinigameId::VoltorbFlip => self.voltorb_flip,
            MinigameId::Gacha => self.gacha,
            MinigameId::Pachinko => self.pachinko,
            MinigameId::BlockStacker => self.block_stacker,
            MinigameId::Pinball => self.pinball,
            MinigameId::Derby => self.derby,
        }
    }

    /// Same cost for every game; handy in tests.
    pub fn uniform(cost: u32) -> Self {
        Self {
            snake: cost,
            flappy_bird: cost,
            blackjack: cost,
            voltorb_flip: cost,
            gacha: cost,
            pachinko: cost,
            block_stacker: cost,
            pinball: cost,
            derby: cost,
        }
    }
}

/// Per-game switches. A disabled minigame is hidden from the menu and cannot be started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EnabledGames {
    pub snake: bool,
    pub flappy_bird: bool,
    pub blackjack: bool,
    pub voltorb_flip: bool,
    pub gacha: bool,
    pub pachinko: bool,
    pub block_stacker: bool,
    pub pinball: bool,
    pub derby: bool,
}

impl Default for EnabledGames {
    fn default() -> Self {
        Self {
            snake: true,
            flappy_bird: true,
            blackjack: true,
            voltorb_flip: true,
            gacha: true,
            pachinko: true,
            block_stacker: true,
            pinball: true,
            derby: true,
        }
    }
}

impl EnabledGames {
    pub fn is_enabled(&self, id: MinigameId) -> bool {
        match id {
            MinigameId::Snake => self.snake,
            MinigameId::FlappyBird => self.flappy_bird,
            MinigameId::Blackjack => self.blackjack,
            MinigameId::VoltorbFlip => self.voltorb_flip,
            MinigameId::Gacha => self.gacha,
            MinigameId::Pachinko => self.pachinko,
            MinigameId::BlockStacker => self.block_stacker,
            MinigameId::Pinball => self.pinball,
            MinigameId::Derby => self.derby,
        }
    }

    pub fn set(&mut self, id: MinigameId, enabled: bool) {
        let slot = match id {
            MinigameId::Snake => &mut self.snake,
            MinigameId::FlappyBird => &mut self.flappy_bird,
            MinigameId::Blackjack => &mut self.blackjack,
            MinigameId::VoltorbFlip => &mut self.voltorb_flip,
            MinigameId::Gacha => &mut self.gacha,
            MinigameId::Pachinko => &mut self.pachinko,
            MinigameId::BlockStacker => &mut self.block_stacker,
            MinigameId::Pinball => &mut self.pinball,
            MinigameId::Derby => &mut self.derby,
        };
        *slot = enabled;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Allow debug-only overrides such as free play.
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

impl StorageConfig {
    /// Directory of the sled save database.
    pub fn save_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("save")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file and validate it.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Enforce the limits the economy relies on.
    pub fn validate(&self) -> Result<(), String> {
        let arcade = &self.arcade;
        if arcade.coin_multiplier < 1 {
            return Err("coin_multiplier must be at least 1".to_string());
        }
        if arcade.max_coins_per_game > MAX_COINS {
            return Err(format!(
                "max_coins_per_game cannot exceed coin system limit ({})",
                MAX_COINS
            ));
        }
        if arcade.min_coins_per_game > arcade.max_coins_per_game {
            return Err("min_coins_per_game cannot exceed max_coins_per_game".to_string());
        }
        if arcade.free_play && !self.debug.enabled {
            return Err("free_play requires [debug] enabled = true".to_string());
        }
        Ok(())
    }
}
