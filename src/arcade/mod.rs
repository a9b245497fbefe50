//! # Arcade Core Module
//!
//! The game corner controller: a fixed registry of minigames, the coin economy that gates
//! them, and the high-score records they leave behind.
//!
//! ## Components
//!
//! - [`registry`] - static table of minigame metadata and lifecycle implementations
//! - [`coins`] - bounded coin balance with multiplier and cap rules
//! - [`high_score`] - per-game best score and play count with corruption repair
//! - [`unlocks`] - unlock flags with the global unlock-all override
//! - [`session`] - the Idle → Gated → Active → Settling state machine
//! - [`menu`] - menu listing and selection parsing
//! - [`host`] - frame driver, messaging and audio services the controller calls out to
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  SessionController  │ ← gates, dispatches and settles one session
//! └─────────────────────┘
//!      │            │
//! ┌──────────┐  ┌──────────────────────────────┐
//! │ Registry │  │ Coin / HighScore / Unlock    │ ← borrow the store per call
//! └──────────┘  │ ledgers                      │
//!               └──────────────────────────────┘
//!                            │
//!               ┌──────────────────────────────┐
//!               │ StatStore + UnlockStore      │ ← injected (sled or in-memory)
//!               └──────────────────────────────┘
//! ```
//!
//! Everything runs on one thread. A minigame's `step` is called once per frame by whoever
//! drives the controller, and only one session can be active at a time.

pub mod coins;
pub mod errors;
pub mod high_score;
pub mod host;
pub mod menu;
pub mod minigame;
pub mod registry;
pub mod session;
pub mod settings;
pub mod unlocks;

pub use errors::{ArcadeError, ArcadeResult};
pub use registry::{MinigameMetadata, Registry};
pub use session::{GateOutcome, PlayOutcome, SessionController, SessionReport, SessionState, Tick};
pub use settings::{ArcadeSettings, ArcadeSettingsBuilder};
