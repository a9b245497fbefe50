//! Minigame identifiers and the lifecycle contract every cabinet implements.
//!
//! The core never looks inside a minigame. It calls [`Minigame::init`] once when a
//! session is admitted, [`Minigame::step`] once per frame tick until the game reports
//! [`StepOutcome::Finished`], and [`Minigame::exit`] once while settling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arcade::errors::ArcadeError;

/// The closed set of arcade minigames, in declaration (menu) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameId {
    Snake,
    FlappyBird,
    Blackjack,
    VoltorbFlip,
    Gacha,
    Pachinko,
    BlockStacker,
    Pinball,
    Derby,
}

impl MinigameId {
    /// Number of registered minigames.
    pub const COUNT: usize = 9;

    pub const ALL: [MinigameId; MinigameId::COUNT] = [
        MinigameId::Snake,
        MinigameId::FlappyBird,
        MinigameId::Blackjack,
        MinigameId::VoltorbFlip,
        MinigameId::Gacha,
        MinigameId::Pachinko,
        MinigameId::BlockStacker,
        MinigameId::Pinball,
        MinigameId::Derby,
    ];

    /// Declaration index, usable as a table offset.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable lowercase name used for store keys and CLI arguments.
    pub fn slug(self) -> &'static str {
        match self {
            MinigameId::Snake => "snake",
            MinigameId::FlappyBird => "flappy_bird",
            MinigameId::Blackjack => "blackjack",
            MinigameId::VoltorbFlip => "voltorb_flip",
            MinigameId::Gacha => "gacha",
            MinigameId::Pachinko => "pachinko",
            MinigameId::BlockStacker => "block_stacker",
            MinigameId::Pinball => "pinball",
            MinigameId::Derby => "derby",
        }
    }

    pub fn from_slug(slug: &str) -> Option<MinigameId> {
        MinigameId::ALL
            .iter()
            .copied()
            .find(|id| id.slug().eq_ignore_ascii_case(slug))
    }
}

impl TryFrom<usize> for MinigameId {
    type Error = ArcadeError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        MinigameId::ALL
            .get(index)
            .copied()
            .ok_or(ArcadeError::InvalidId(index))
    }
}

impl fmt::Display for MinigameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Per-frame input handed to a running minigame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// B or START pressed this frame; games should wrap up and return a result.
    pub quit_requested: bool,
}

/// Terminal value a minigame produces when its session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: u32,
    pub coins_won: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Finished(GameResult),
}

/// Lifecycle contract for a single arcade cabinet.
///
/// `step` is called once per frame and must return promptly. A game that cannot
/// finish normally still has to return a (possibly zero) [`GameResult`].
pub trait Minigame {
    fn init(&mut self);
    fn step(&mut self, input: &FrameInput) -> StepOutcome;
    fn exit(&mut self);
}

/// Stand-in for cabinets that have not been ported yet: finishes on its first frame
/// with an empty result.
#[derive(Debug, Default)]
pub struct PlaceholderGame;

impl Minigame for PlaceholderGame {
    fn init(&mut self) {}

    fn step(&mut self, _input: &FrameInput) -> StepOutcome {
        StepOutcome::Finished(GameResult::default())
    }

    fn exit(&mut self) {}
}

/// Minigame that plays for a fixed number of frames and then reports a preset result.
///
/// A quit request ends the run early with the score scaled by the fraction of frames
/// played and no coins. Used by the CLI `play` command and by tests.
#[derive(Debug, Clone)]
pub struct ScriptedGame {
    frames: u32,
    result: GameResult,
    elapsed: u32,
    initialized: bool,
    exited: bool,
}

impl ScriptedGame {
    pub fn new(frames: u32, score: u32, coins_won: u32) -> Self {
        Self {
            frames,
            result: GameResult { score, coins_won },
            elapsed: 0,
            initialized: false,
            exited: false,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn was_initialized(&self) -> bool {
        self.initialized
    }

    pub fn was_exited(&self) -> bool {
        self.exited
    }
}

impl Minigame for ScriptedGame {
    fn init(&mut self) {
        self.elapsed = 0;
        self.initialized = true;
        self.exited = false;
    }

    fn step(&mut self, input: &FrameInput) -> StepOutcome {
        self.elapsed = self.elapsed.saturating_add(1);
        if input.quit_requested && self.elapsed < self.frames {
            let partial = (self.result.score as u64 * self.elapsed as u64) / self.frames as u64;
            return StepOutcome::Finished(GameResult {
                score: partial as u32,
                coins_won: 0,
            });
        }
        if self.elapsed >= self.frames {
            StepOutcome::Finished(self.result)
        } else {
            StepOutcome::Continue
        }
    }

    fn exit(&mut self) {
        self.exited = true;
    }
}
