//! Services the session controller calls out to: frame/render reset, messaging, audio and
//! the coin-case check. The controller only composes values; rendering and playback belong
//! to the host.

use std::fmt;

use crate::arcade::minigame::MinigameId;
use crate::arcade::registry::display_name;

/// Outcome messages the controller asks the host to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeMessage {
    InsufficientCoins { required: u32 },
    NoCoinCase,
    GameOver { score: u32, coins_won: u32 },
    NewHighScore { score: u32 },
    /// How-to-play text shown before a minigame's first ever session.
    Tutorial(MinigameId),
}

fn tutorial_hint(id: MinigameId) -> &'static str {
    match id {
        MinigameId::Snake => "Eat the berries to grow.\nDon't hit the walls!",
        MinigameId::FlappyBird => "Press A to flap.\nFly through the gaps!",
        MinigameId::Blackjack => "Get close to 21\nwithout going over!",
        MinigameId::VoltorbFlip => "Flip the 2s and 3s.\nAvoid the VOLTORB!",
        MinigameId::Gacha => "Spend coins to spin\nfor a prize!",
        MinigameId::Pachinko => "Drop the balls and\naim for the pockets!",
        MinigameId::BlockStacker => "Clear lines by filling\nevery gap!",
        MinigameId::Pinball => "Use the flippers to\nkeep the ball alive!",
        MinigameId::Derby => "Mash A to run.\nBeat the other racers!",
    }
}

impl fmt::Display for ArcadeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcadeMessage::InsufficientCoins { required } => {
                write!(f, "You need {:04} Coins\nto play this game!", required)
            }
            ArcadeMessage::NoCoinCase => f.write_str("You need a COIN CASE\nto play!"),
            ArcadeMessage::GameOver { score, coins_won } => {
                write!(f, "GAME OVER!\nScore: {}\nCoins: +{}", score, coins_won)
            }
            ArcadeMessage::NewHighScore { score } => write!(f, "NEW HIGH SCORE!\n{}", score),
            ArcadeMessage::Tutorial(id) => {
                write!(f, "HOW TO PLAY {}\n{}", display_name(*id), tutorial_hint(*id))
            }
        }
    }
}

/// Semantic audio events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Win,
    Lose,
    MenuSelect,
    Coin,
    /// Start the minigame soundtrack; `custom` selects dedicated music over the shared track.
    DefaultMusic { custom: bool },
    StopMusic,
}

pub trait ArcadeHost {
    /// Whether the player carries the currency holder required to play.
    fn has_coin_case(&self) -> bool;

    /// Tear down sprite, palette, task and window state before a minigame starts.
    fn reset_common_state(&mut self);

    /// Common cleanup after a session and hand control back to the overworld.
    fn return_to_overworld(&mut self);

    fn show_message(&mut self, message: &ArcadeMessage);

    fn play_audio(&mut self, cue: AudioCue);
}

/// Host that records every call. Used by tests and dry runs.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub coin_case: bool,
    pub messages: Vec<ArcadeMessage>,
    pub audio: Vec<AudioCue>,
    pub resets: u32,
    pub returns: u32,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            coin_case: true,
            messages: Vec::new(),
            audio: Vec::new(),
            resets: 0,
            returns: 0,
        }
    }

    pub fn without_coin_case() -> Self {
        Self {
            coin_case: false,
            ..Self::new()
        }
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeHost for RecordingHost {
    fn has_coin_case(&self) -> bool {
        self.coin_case
    }

    fn reset_common_state(&mut self) {
        self.resets += 1;
    }

    fn return_to_overworld(&mut self) {
        self.returns += 1;
    }

    fn show_message(&mut self, message: &ArcadeMessage) {
        self.messages.push(*message);
    }

    fn play_audio(&mut self, cue: AudioCue) {
        self.audio.push(cue);
    }
}
