//! # Gamecorner - Arcade Hub Controller
//!
//! Gamecorner runs the game corner of a handheld RPG: nine self-contained minigames behind
//! an unlock system and a bounded coin economy, with per-game high scores and play counts
//! persisted across saves.
//!
//! ## Features
//!
//! - **Minigame Registry**: fixed table of nine cabinets, each driven through a uniform
//!   init / step / exit lifecycle.
//! - **Coin Economy**: 0..=9999 balance, entry fees, configurable reward multiplier and a
//!   per-session reward window.
//! - **High Scores**: ratcheting per-game records with automatic repair of corrupted values.
//! - **Unlocks**: per-game flags with a global unlock-all switch.
//! - **Persistence**: sled-backed save store; an in-memory store for tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gamecorner::arcade::{ArcadeSettings, Registry, SessionController};
//! use gamecorner::arcade::host::RecordingHost;
//! use gamecorner::arcade::minigame::{FrameInput, MinigameId};
//! use gamecorner::config::Config;
//! use gamecorner::storage::SaveStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let settings = ArcadeSettings::from_config(&config)?;
//!     let store = SaveStore::open(config.storage.save_path())?;
//!     let registry = Registry::standard(settings.costs());
//!
//!     let mut arcade = SessionController::new(registry, store, settings);
//!     let mut host = RecordingHost::new();
//!     arcade.play(MinigameId::Pachinko, &mut host, std::iter::empty::<FrameInput>())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`arcade`] - registry, ledgers, session controller and host interfaces
//! - [`storage`] - stat/flag store traits, sled save store and in-memory store
//! - [`config`] - configuration management and validation
//! - [`metrics`] - per-cabinet coin flow and gate counters

pub mod arcade;
pub mod config;
pub mod metrics;
pub mod storage;
