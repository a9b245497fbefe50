use log::{debug, info};

use crate::arcade::coins::{CoinLedger, CoinPolicy};
use crate::arcade::errors::{ArcadeError, ArcadeResult};
use crate::arcade::high_score::{HighScoreLedger, HIGH_SCORE_CEILING};
use crate::arcade::host::{ArcadeHost, ArcadeMessage, AudioCue};
use crate::arcade::menu::MenuEntry;
use crate::arcade::minigame::{FrameInput, GameResult, MinigameId, StepOutcome};
use crate::arcade::registry::Registry;
use crate::arcade::settings::ArcadeSettings;
use crate::arcade::unlocks::UnlockLedger;
use crate::metrics;
use crate::storage::{SaveSnapshot, StatStore, UnlockStore};

/// # Play Session Controller
///
/// Runs one minigame session at a time against the injected save store.
///
/// ## Session Lifecycle
///
/// 1. **Idle** - no game selected
/// 2. **Gated** - play requested: enabled, unlock, affordability and coin case checks, then
///    the debit
/// 3. **Active** - minigame initialized; [`SessionController::tick`] steps it once per frame
/// 4. **Settling** - minigame exited; reward credited, records updated, outcome shown
///
/// Gating declines are ordinary [`GateOutcome`] values and leave the controller Idle with the
/// balance untouched. The entry fee is only taken in the same call that admits the session.
///
/// ## Usage
///
/// ```rust
/// use gamecorner::arcade::{ArcadeSettings, Registry, SessionController, PlayOutcome};
/// use gamecorner::arcade::host::RecordingHost;
/// use gamecorner::arcade::minigame::{FrameInput, MinigameId};
/// use gamecorner::storage::MemoryStore;
///
/// let settings = ArcadeSettings::default();
/// let registry = Registry::standard(settings.costs());
/// let mut arcade = SessionController::new(registry, MemoryStore::new().with_coins(50), settings);
/// let mut host = RecordingHost::new();
///
/// arcade.unlock(MinigameId::Snake).unwrap();
/// let outcome = arcade
///     .play(MinigameId::Snake, &mut host, std::iter::empty::<FrameInput>())
///     .unwrap();
/// assert!(matches!(outcome, PlayOutcome::Completed(_)));
/// ```
#[derive(Debug)]
pub struct SessionController<S> {
    registry: Registry,
    store: S,
    settings: ArcadeSettings,
    state: SessionState,
    frames: u32,
    last_played: Option<MinigameId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Gated(MinigameId),
    Active(MinigameId),
    Settling(MinigameId),
}

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session is Active; `cost` coins were debited (0 under free play).
    Admitted { id: MinigameId, cost: u32 },
    /// Switched off in the `[enabled]` table.
    Disabled(MinigameId),
    Locked(MinigameId),
    NoCoinCase,
    InsufficientCoins { required: u32 },
    /// `play_again` with quick replay switched off.
    ReplayDisabled,
    /// `play_again` before any session has settled.
    NothingToReplay,
}

impl GateOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, GateOutcome::Admitted { .. })
    }
}

/// Summary of a settled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub id: MinigameId,
    pub score: u32,
    /// Reward after the per-session min/max window, before the balance multiplier.
    pub coins_won: u32,
    pub balance: u32,
    pub new_high_score: bool,
    pub high_score: u32,
    pub play_count: u32,
    pub frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { frame: u32 },
    Settled(SessionReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Declined(GateOutcome),
    Completed(SessionReport),
}

impl<S> SessionController<S>
where
    S: StatStore + UnlockStore,
{
    pub fn new(registry: Registry, store: S, settings: ArcadeSettings) -> Self {
        Self {
            registry,
            store,
            settings,
            state: SessionState::Idle,
            frames: 0,
            last_played: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_game(&self) -> Option<MinigameId> {
        match self.state {
            SessionState::Active(id) => Some(id),
            _ => None,
        }
    }

    pub fn last_played(&self) -> Option<MinigameId> {
        self.last_played
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &ArcadeSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn coin_policy(&self) -> CoinPolicy {
        CoinPolicy {
            multiplier: self.settings.coin_multiplier(),
            free_play: self.settings.free_play(),
        }
    }

    fn coins(&mut self) -> CoinLedger<'_, S> {
        let policy = self.coin_policy();
        CoinLedger::new(&mut self.store, policy)
    }

    fn high_scores(&mut self) -> HighScoreLedger<'_, S> {
        let enabled = self.settings.high_scores();
        HighScoreLedger::new(&mut self.store, enabled)
    }

    pub fn balance(&mut self) -> ArcadeResult<u32> {
        self.coins().balance()
    }

    /// Credit coins outside a session (prize counter, CLI grants). The multiplier applies.
    pub fn deposit(&mut self, amount: u32) -> ArcadeResult<u32> {
        self.coins().add(amount)
    }

    pub fn high_score(&mut self, id: MinigameId) -> ArcadeResult<u32> {
        self.high_scores().get_high_score(id)
    }

    pub fn play_count(&mut self, id: MinigameId) -> ArcadeResult<u32> {
        self.high_scores().get_play_count(id)
    }

    /// Raw-index variant; unknown indices read as 0.
    pub fn high_score_index(&mut self, index: usize) -> ArcadeResult<u32> {
        match MinigameId::try_from(index) {
            Ok(id) => self.high_score(id),
            Err(_) => Ok(0),
        }
    }

    /// Raw-index variant; unknown indices read as 0.
    pub fn play_count_index(&mut self, index: usize) -> ArcadeResult<u32> {
        match MinigameId::try_from(index) {
            Ok(id) => self.play_count(id),
            Err(_) => Ok(0),
        }
    }

    pub fn is_unlocked(&mut self, id: MinigameId) -> ArcadeResult<bool> {
        UnlockLedger::new(&mut self.store, self.settings.unlock_all())
            .check_unlocked(&self.registry, id)
    }

    /// Raw-index variant; unknown indices report locked.
    pub fn is_unlocked_index(&mut self, index: usize) -> ArcadeResult<bool> {
        UnlockLedger::new(&mut self.store, self.settings.unlock_all())
            .check_unlocked_index(&self.registry, index)
    }

    pub fn unlock(&mut self, id: MinigameId) -> ArcadeResult<()> {
        UnlockLedger::new(&mut self.store, self.settings.unlock_all()).unlock(&self.registry, id)
    }

    pub fn unlock_all(&mut self) -> ArcadeResult<()> {
        let registry = &self.registry;
        UnlockLedger::new(&mut self.store, self.settings.unlock_all()).unlock_all(registry)?;
        info!("unlocked all {} minigames", registry.len());
        Ok(())
    }

    /// Menu rows for every enabled game, in declaration order.
    pub fn menu(&mut self) -> ArcadeResult<Vec<MenuEntry>> {
        let mut entries = Vec::with_capacity(self.registry.len());
        for id in MinigameId::ALL {
            if !self.settings.is_enabled(id) {
                continue;
            }
            let meta = *self.registry.lookup(id);
            let cost = if self.settings.free_play() { 0 } else { meta.entry_cost };
            entries.push(MenuEntry {
                id,
                name: meta.name,
                cost,
                unlocked: self.is_unlocked(id)?,
            });
        }
        Ok(entries)
    }

    pub fn snapshot(&self) -> ArcadeResult<SaveSnapshot> {
        SaveSnapshot::capture(&self.store)
    }

    /// Gate and, if admitted, start a session for `id`.
    ///
    /// Only one session may run at a time; a request while another is in progress fails with
    /// [`ArcadeError::SessionInProgress`].
    pub fn request_play<H>(&mut self, id: MinigameId, host: &mut H) -> ArcadeResult<GateOutcome>
    where
        H: ArcadeHost + ?Sized,
    {
        match self.state {
            SessionState::Idle => {}
            SessionState::Gated(current)
            | SessionState::Active(current)
            | SessionState::Settling(current) => {
                return Err(ArcadeError::SessionInProgress(current))
            }
        }

        let first_play = self.settings.tutorials() && self.play_count(id)? == 0;
        self.state = SessionState::Gated(id);
        match self.gate(id, host) {
            Ok(outcome @ GateOutcome::Admitted { cost, .. }) => {
                self.state = SessionState::Active(id);
                self.frames = 0;
                host.reset_common_state();
                self.registry.game_mut(id).init();
                host.play_audio(AudioCue::DefaultMusic {
                    custom: self.settings.custom_bgm(),
                });
                if first_play {
                    host.show_message(&ArcadeMessage::Tutorial(id));
                }
                metrics::record_session_entry(id.slug(), cost);
                info!("session started: {} (fee {})", id, cost);
                Ok(outcome)
            }
            Ok(declined) => {
                self.state = SessionState::Idle;
                metrics::inc_session_declined();
                debug!("play request for {} declined: {:?}", id, declined);
                Ok(declined)
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    fn gate<H>(&mut self, id: MinigameId, host: &mut H) -> ArcadeResult<GateOutcome>
    where
        H: ArcadeHost + ?Sized,
    {
        if !self.settings.is_enabled(id) {
            return Ok(GateOutcome::Disabled(id));
        }

        let cost = self.registry.lookup(id).entry_cost;

        if !self.is_unlocked(id)? {
            return Ok(GateOutcome::Locked(id));
        }

        let insufficient = ArcadeMessage::InsufficientCoins { required: cost };
        if !self.coins().has_enough(cost)? {
            host.show_message(&insufficient);
            return Ok(GateOutcome::InsufficientCoins { required: cost });
        }

        if !host.has_coin_case() {
            host.show_message(&ArcadeMessage::NoCoinCase);
            return Ok(GateOutcome::NoCoinCase);
        }

        if !self.coins().try_take(cost)? {
            host.show_message(&insufficient);
            return Ok(GateOutcome::InsufficientCoins { required: cost });
        }

        host.play_audio(AudioCue::MenuSelect);
        let charged = if self.settings.free_play() { 0 } else { cost };
        Ok(GateOutcome::Admitted { id, cost: charged })
    }

    /// Advance the active minigame by one frame. Settles the session when the game finishes.
    pub fn tick<H>(&mut self, input: &FrameInput, host: &mut H) -> ArcadeResult<Tick>
    where
        H: ArcadeHost + ?Sized,
    {
        let SessionState::Active(id) = self.state else {
            return Err(ArcadeError::NoActiveSession);
        };

        self.frames = self.frames.saturating_add(1);
        match self.registry.game_mut(id).step(input) {
            StepOutcome::Continue => Ok(Tick::Running { frame: self.frames }),
            StepOutcome::Finished(result) => {
                self.state = SessionState::Settling(id);
                let settled = self.settle(id, result, host);
                self.state = SessionState::Idle;
                host.return_to_overworld();
                let report = settled?;
                metrics::record_session_settled(id.slug(), report.coins_won);
                self.last_played = Some(id);
                Ok(Tick::Settled(report))
            }
        }
    }

    fn settle<H>(&mut self, id: MinigameId, result: GameResult, host: &mut H) -> ArcadeResult<SessionReport>
    where
        H: ArcadeHost + ?Sized,
    {
        self.registry.game_mut(id).exit();
        host.play_audio(AudioCue::StopMusic);

        let reward = self.settings.session_reward(result.coins_won);
        let new_high_score = self.high_scores().is_new_high_score(id, result.score)?;
        let balance = self.coins().add(reward)?;

        let mut scores = self.high_scores();
        scores.update_high_score(id, result.score)?;
        scores.increment_play_count(id)?;
        let high_score = scores.get_high_score(id)?;
        let play_count = scores.get_play_count(id)?;

        let game_over = ArcadeMessage::GameOver {
            score: result.score,
            coins_won: reward,
        };
        host.show_message(&game_over);
        if reward > 0 {
            host.play_audio(AudioCue::Coin);
        }
        if new_high_score && self.settings.high_score_fanfare() {
            host.show_message(&ArcadeMessage::NewHighScore {
                score: result.score.min(HIGH_SCORE_CEILING),
            });
            host.play_audio(AudioCue::Win);
        } else if result.score == 0 {
            host.play_audio(AudioCue::Lose);
        }

        info!(
            "session settled: {} after {} frames: score={} coins_won={} balance={}",
            id, self.frames, result.score, reward, balance
        );

        Ok(SessionReport {
            id,
            score: result.score,
            coins_won: reward,
            balance,
            new_high_score,
            high_score,
            play_count,
            frames: self.frames,
        })
    }

    /// Gate `id`, then tick with successive inputs until the session settles.
    ///
    /// Once `inputs` is exhausted every further frame gets a default (no quit) input, so this
    /// only returns when the minigame finishes.
    pub fn play<H, I>(&mut self, id: MinigameId, host: &mut H, inputs: I) -> ArcadeResult<PlayOutcome>
    where
        H: ArcadeHost + ?Sized,
        I: IntoIterator<Item = FrameInput>,
    {
        let gate = self.request_play(id, host)?;
        if !gate.is_admitted() {
            return Ok(PlayOutcome::Declined(gate));
        }
        let mut inputs = inputs.into_iter();
        loop {
            let input = inputs.next().unwrap_or_default();
            if let Tick::Settled(report) = self.tick(&input, host)? {
                return Ok(PlayOutcome::Completed(report));
            }
        }
    }

    /// "Play Again?" - request the most recently settled game once more.
    pub fn play_again<H>(&mut self, host: &mut H) -> ArcadeResult<GateOutcome>
    where
        H: ArcadeHost + ?Sized,
    {
        if !self.settings.quick_replay() {
            return Ok(GateOutcome::ReplayDisabled);
        }
        match self.last_played {
            Some(id) => self.request_play(id, host),
            None => Ok(GateOutcome::NothingToReplay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arcade::host::RecordingHost;
    use crate::arcade::minigame::ScriptedGame;
    use crate::arcade::settings::ArcadeSettingsBuilder;
    use crate::config::EntryCosts;
    use crate::storage::{MemoryStore, StatKey};

    fn controller(
        settings: ArcadeSettings,
        coins: u32,
        frames: u32,
        score: u32,
        reward: u32,
    ) -> SessionController<MemoryStore> {
        let registry = Registry::with_games(settings.costs(), |_| {
            Box::new(ScriptedGame::new(frames, score, reward))
        });
        SessionController::new(registry, MemoryStore::new().with_coins(coins), settings)
    }

    /// Uniform cost, tutorials off so message assertions only see gate and settle output.
    fn with_cost(cost: u32) -> ArcadeSettingsBuilder {
        ArcadeSettings::builder()
            .costs(EntryCosts::uniform(cost))
            .tutorials(false)
    }

    fn settings_with_cost(cost: u32) -> ArcadeSettings {
        with_cost(cost).build().unwrap()
    }

    fn play_to_end(arcade: &mut SessionController<MemoryStore>, id: MinigameId, host: &mut RecordingHost) -> SessionReport {
        match arcade.play(id, host, std::iter::empty::<FrameInput>()).unwrap() {
            PlayOutcome::Completed(report) => report,
            PlayOutcome::Declined(gate) => panic!("expected completed session, got {:?}", gate),
        }
    }

    #[test]
    fn locked_game_is_declined_without_debit() {
        let mut arcade = controller(settings_with_cost(10), 15, 1, 0, 0);
        let mut host = RecordingHost::new();
        let out = arcade.request_play(MinigameId::Snake, &mut host).unwrap();
        assert_eq!(out, GateOutcome::Locked(MinigameId::Snake));
        assert_eq!(arcade.state(), SessionState::Idle);
        assert_eq!(arcade.balance().unwrap(), 15);
        assert!(host.messages.is_empty());
        assert_eq!(host.resets, 0);
    }

    #[test]
    fn missing_coin_case_is_declined() {
        let mut arcade = controller(settings_with_cost(10), 15, 1, 0, 0);
        arcade.unlock(MinigameId::Snake).unwrap();
        let mut host = RecordingHost::without_coin_case();
        let out = arcade.request_play(MinigameId::Snake, &mut host).unwrap();
        assert_eq!(out, GateOutcome::NoCoinCase);
        assert_eq!(host.messages, vec![ArcadeMessage::NoCoinCase]);
        assert_eq!(arcade.balance().unwrap(), 15);
    }

    #[test]
    fn affordability_is_checked_before_coin_case() {
        let mut arcade = controller(settings_with_cost(10), 3, 1, 0, 0);
        arcade.unlock(MinigameId::Snake).unwrap();
        let mut host = RecordingHost::without_coin_case();
        let out = arcade.request_play(MinigameId::Snake, &mut host).unwrap();
        assert_eq!(out, GateOutcome::InsufficientCoins { required: 10 });
        assert_eq!(
            host.messages,
            vec![ArcadeMessage::InsufficientCoins { required: 10 }]
        );
        assert_eq!(arcade.balance().unwrap(), 3);
    }

    #[test]
    fn insufficient_coins_reports_required_amount() {
        let mut arcade = controller(settings_with_cost(100), 99, 1, 0, 0);
        arcade.unlock(MinigameId::Derby).unwrap();
        let mut host = RecordingHost::new();
        let out = arcade.request_play(MinigameId::Derby, &mut host).unwrap();
        assert_eq!(out, GateOutcome::InsufficientCoins { required: 100 });
        assert_eq!(
            host.messages,
            vec![ArcadeMessage::InsufficientCoins { required: 100 }]
        );
        assert_eq!(arcade.balance().unwrap(), 99);
        assert_eq!(arcade.state(), SessionState::Idle);
    }

    #[test]
    fn disabled_game_is_declined_before_anything_else() {
        let settings = with_cost(10)
            .enabled(MinigameId::Pinball, false)
            .build()
            .unwrap();
        let mut arcade = controller(settings, 50, 1, 0, 0);
        arcade.unlock_all().unwrap();
        let mut host = RecordingHost::without_coin_case();
        let out = arcade.request_play(MinigameId::Pinball, &mut host).unwrap();
        assert_eq!(out, GateOutcome::Disabled(MinigameId::Pinball));
        assert!(host.messages.is_empty());
        assert_eq!(arcade.balance().unwrap(), 50);
        assert_eq!(arcade.state(), SessionState::Idle);
    }

    #[test]
    fn admitted_session_runs_lifecycle() {
        let mut arcade = controller(settings_with_cost(10), 15, 2, 50, 7);
        arcade.unlock(MinigameId::Snake).unwrap();
        let mut host = RecordingHost::new();

        let out = arcade.request_play(MinigameId::Snake, &mut host).unwrap();
        assert_eq!(
            out,
            GateOutcome::Admitted {
                id: MinigameId::Snake,
                cost: 10
            }
        );
        assert_eq!(arcade.state(), SessionState::Active(MinigameId::Snake));
        assert_eq!(arcade.active_game(), Some(MinigameId::Snake));
        assert_eq!(arcade.balance().unwrap(), 5);
        assert_eq!(host.resets, 1);

        let input = FrameInput::default();
        assert_eq!(
            arcade.tick(&input, &mut host).unwrap(),
            Tick::Running { frame: 1 }
        );
        let Tick::Settled(report) = arcade.tick(&input, &mut host).unwrap() else {
            panic!("expected settlement on second frame");
        };
        assert_eq!(report.score, 50);
        assert_eq!(report.coins_won, 7);
        assert_eq!(report.balance, 12);
        assert_eq!(report.play_count, 1);
        assert_eq!(report.frames, 2);
        assert_eq!(arcade.state(), SessionState::Idle);
        assert_eq!(host.returns, 1);
        assert_eq!(
            host.messages[0],
            ArcadeMessage::GameOver {
                score: 50,
                coins_won: 7
            }
        );
    }

    #[test]
    fn tutorial_shows_on_first_play_only() {
        let settings = ArcadeSettings::builder()
            .costs(EntryCosts::uniform(0))
            .unlock_all(true)
            .build()
            .unwrap();
        let mut arcade = controller(settings, 0, 1, 5, 1);
        let mut host = RecordingHost::new();

        play_to_end(&mut arcade, MinigameId::Blackjack, &mut host);
        assert_eq!(host.messages[0], ArcadeMessage::Tutorial(MinigameId::Blackjack));

        host.messages.clear();
        play_to_end(&mut arcade, MinigameId::Blackjack, &mut host);
        assert!(!host
            .messages
            .iter()
            .any(|m| matches!(m, ArcadeMessage::Tutorial(_))));

        play_to_end(&mut arcade, MinigameId::Gacha, &mut host);
        assert!(host
            .messages
            .contains(&ArcadeMessage::Tutorial(MinigameId::Gacha)));
    }

    #[test]
    fn tutorials_can_be_switched_off() {
        let mut arcade = controller(with_cost(0).unlock_all(true).build().unwrap(), 0, 1, 5, 1);
        let mut host = RecordingHost::new();
        play_to_end(&mut arcade, MinigameId::Snake, &mut host);
        assert!(!host
            .messages
            .iter()
            .any(|m| matches!(m, ArcadeMessage::Tutorial(_))));
    }

    #[test]
    fn declined_request_shows_no_tutorial() {
        let settings = ArcadeSettings::builder()
            .costs(EntryCosts::uniform(10))
            .unlock_all(true)
            .build()
            .unwrap();
        let mut arcade = controller(settings, 0, 1, 0, 0);
        let mut host = RecordingHost::new();
        arcade.request_play(MinigameId::Snake, &mut host).unwrap();
        assert_eq!(
            host.messages,
            vec![ArcadeMessage::InsufficientCoins { required: 10 }]
        );
    }

    #[test]
    fn second_request_while_active_is_rejected() {
        let mut arcade = controller(settings_with_cost(0), 0, 5, 1, 1);
        arcade.unlock_all().unwrap();
        let mut host = RecordingHost::new();
        assert!(arcade
            .request_play(MinigameId::Snake, &mut host)
            .unwrap()
            .is_admitted());
        let err = arcade
            .request_play(MinigameId::Gacha, &mut host)
            .unwrap_err();
        assert!(matches!(
            err,
            ArcadeError::SessionInProgress(MinigameId::Snake)
        ));
    }

    #[test]
    fn tick_without_session_fails() {
        let mut arcade = controller(ArcadeSettings::default(), 0, 1, 0, 0);
        let mut host = RecordingHost::new();
        assert!(matches!(
            arcade.tick(&FrameInput::default(), &mut host),
            Err(ArcadeError::NoActiveSession)
        ));
    }

    #[test]
    fn new_high_score_shows_fanfare() {
        let mut arcade = controller(settings_with_cost(0), 0, 1, 50, 5);
        arcade.unlock(MinigameId::Snake).unwrap();
        arcade
            .store
            .set(StatKey::HighScore(MinigameId::Snake), 40)
            .unwrap();
        let mut host = RecordingHost::new();
        let report = play_to_end(&mut arcade, MinigameId::Snake, &mut host);
        assert!(report.new_high_score);
        assert_eq!(report.high_score, 50);
        assert!(host
            .messages
            .contains(&ArcadeMessage::NewHighScore { score: 50 }));
        assert!(host.audio.contains(&AudioCue::Win));
    }

    #[test]
    fn fanfare_can_be_suppressed() {
        let settings = with_cost(0).high_score_fanfare(false).build().unwrap();
        let mut arcade = controller(settings, 0, 1, 50, 5);
        arcade.unlock(MinigameId::Snake).unwrap();
        let mut host = RecordingHost::new();
        let report = play_to_end(&mut arcade, MinigameId::Snake, &mut host);
        assert!(report.new_high_score);
        assert_eq!(host.messages.len(), 1);
        assert!(!host.audio.contains(&AudioCue::Win));
    }

    #[test]
    fn reward_is_clamped_to_session_window() {
        let mut arcade = controller(settings_with_cost(0), 0, 1, 0, 5000);
        arcade.unlock(MinigameId::Gacha).unwrap();
        let mut host = RecordingHost::new();
        let report = play_to_end(&mut arcade, MinigameId::Gacha, &mut host);
        assert_eq!(report.coins_won, 999);
        assert_eq!(report.balance, 999);
    }

    #[test]
    fn zero_reward_still_pays_minimum() {
        let mut arcade = controller(settings_with_cost(0), 0, 1, 0, 0);
        arcade.unlock(MinigameId::Gacha).unwrap();
        let mut host = RecordingHost::new();
        let report = play_to_end(&mut arcade, MinigameId::Gacha, &mut host);
        assert_eq!(report.coins_won, 1);
        assert!(host.audio.contains(&AudioCue::Lose));
    }

    #[test]
    fn play_again_respects_quick_replay() {
        let mut arcade = controller(settings_with_cost(0), 0, 1, 10, 1);
        arcade.unlock(MinigameId::Pachinko).unwrap();
        let mut host = RecordingHost::new();
        assert_eq!(
            arcade.play_again(&mut host).unwrap(),
            GateOutcome::NothingToReplay
        );
        play_to_end(&mut arcade, MinigameId::Pachinko, &mut host);
        assert_eq!(arcade.last_played(), Some(MinigameId::Pachinko));
        assert!(arcade.play_again(&mut host).unwrap().is_admitted());

        let settings = with_cost(0).quick_replay(false).build().unwrap();
        let mut arcade = controller(settings, 0, 1, 10, 1);
        assert_eq!(
            arcade.play_again(&mut host).unwrap(),
            GateOutcome::ReplayDisabled
        );
    }

    #[test]
    fn index_helpers_default_for_unknown_ids() {
        let mut arcade = controller(ArcadeSettings::default(), 0, 1, 0, 0);
        assert_eq!(arcade.high_score_index(99).unwrap(), 0);
        assert_eq!(arcade.play_count_index(99).unwrap(), 0);
        assert!(!arcade.is_unlocked_index(99).unwrap());
    }

    #[test]
    fn menu_lists_every_game_with_lock_state() {
        let mut arcade = controller(ArcadeSettings::default(), 0, 1, 0, 0);
        arcade.unlock(MinigameId::Blackjack).unwrap();
        let menu = arcade.menu().unwrap();
        assert_eq!(menu.len(), MinigameId::COUNT);
        assert!(menu[MinigameId::Blackjack.index()].unlocked);
        assert!(!menu[MinigameId::Snake.index()].unlocked);
        assert_eq!(menu[MinigameId::Blackjack.index()].cost, 50);
    }

    #[test]
    fn menu_hides_disabled_games() {
        let settings = ArcadeSettings::builder()
            .enabled(MinigameId::Snake, false)
            .enabled(MinigameId::Derby, false)
            .build()
            .unwrap();
        let mut arcade = controller(settings, 0, 1, 0, 0);
        let menu = arcade.menu().unwrap();
        assert_eq!(menu.len(), MinigameId::COUNT - 2);
        assert!(menu
            .iter()
            .all(|e| e.id != MinigameId::Snake && e.id != MinigameId::Derby));
        assert_eq!(menu[0].id, MinigameId::FlappyBird);
        assert!(crate::arcade::menu::resolve_selection("snake", &menu).is_none());
        assert_eq!(
            crate::arcade::menu::resolve_selection("G1", &menu).map(|e| e.id),
            Some(MinigameId::FlappyBird)
        );
    }
}
