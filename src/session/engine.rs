//! The round state machine.

use std::time::Duration;

use smallvec::SmallVec;

use crate::core::{ConfigError, EngineConfig, GameRng};
use crate::scoring::ScoringPolicy;
use crate::stats::{StatsStore, Storage};
use crate::tiles::{TileId, TileIds, TileInstance, TilePlacer, TileState};
use crate::words::{Task, WordBank, WORD_LEN};

use super::event::{SessionEvent, SessionInput};
use super::scheduler::{Deferred, Scheduler};
use super::state::{CompletedTask, RoundPhase, SessionRecord};

/// A game session: one player, one stats store, any number of rounds.
///
/// Single-threaded and driven entirely by its inputs. Time only moves
/// through [`Session::advance`], so a seeded session replays exactly.
///
/// ```
/// use rice_tiles::core::EngineConfig;
/// use rice_tiles::session::{Session, SessionEvent};
/// use rice_tiles::stats::MemoryStorage;
///
/// let config = EngineConfig::default().with_seed(7);
/// let mut session = Session::new(config, MemoryStorage::new()).unwrap();
/// session.start_round();
///
/// let events = session.drain_events();
/// assert!(matches!(events[0], SessionEvent::RoundStarted { .. }));
/// assert_eq!(session.tiles().len(), 12);
///
/// session.advance(30.0);
/// assert!(session.is_ended());
/// ```
#[derive(Debug)]
pub struct Session<S: Storage> {
    config: EngineConfig,
    word_rng: GameRng,
    tile_rng: GameRng,
    opponent_rng: GameRng,
    words: WordBank,
    placer: TilePlacer,
    scoring: ScoringPolicy,
    stats: StatsStore<S>,

    phase: RoundPhase,
    record: SessionRecord,
    task: Option<Task>,
    /// False between a completion and the next task.
    task_open: bool,
    tiles: Vec<TileInstance>,
    selection: SmallVec<[TileId; WORD_LEN]>,
    tile_ids: TileIds,

    scheduler: Scheduler,
    epoch: u64,
    clock: Duration,
    events: Vec<SessionEvent>,
    leaderboard_pending: bool,
}

impl<S: Storage> Session<S> {
    /// Create a session with the default word bank.
    pub fn new(config: EngineConfig, storage: S) -> Result<Self, ConfigError> {
        Self::with_word_bank(config, storage, WordBank::default())
    }

    /// Create a session spelling words from `words`.
    pub fn with_word_bank(
        config: EngineConfig,
        storage: S,
        words: WordBank,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let stats = StatsStore::load(storage, config.stats.clone());

        Ok(Self {
            word_rng: rng.for_context("words"),
            tile_rng: rng.for_context("tiles"),
            opponent_rng: rng.for_context("opponent"),
            words,
            placer: TilePlacer::new(config.placement.clone()),
            scoring: ScoringPolicy::from_config(&config),
            stats,
            phase: RoundPhase::Idle,
            record: SessionRecord::new(config.game_time),
            task: None,
            task_open: false,
            tiles: Vec::new(),
            selection: SmallVec::new(),
            tile_ids: TileIds::new(),
            scheduler: Scheduler::new(),
            epoch: 0,
            clock: Duration::ZERO,
            events: Vec::new(),
            leaderboard_pending: false,
            config,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    #[must_use]
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// The current word, once a round has started.
    #[must_use]
    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// The current tile batch.
    #[must_use]
    pub fn tiles(&self) -> &[TileInstance] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&TileInstance> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Tiles matched so far for the current word, in order.
    #[must_use]
    pub fn selection(&self) -> &[TileId] {
        &self.selection
    }

    #[must_use]
    pub fn stats(&self) -> &StatsStore<S> {
        &self.stats
    }

    /// Mutable stats access, e.g. to retry a failed flush.
    pub fn stats_mut(&mut self) -> &mut StatsStore<S> {
        &mut self.stats
    }

    /// Current round generation. Bumped by every [`Session::start_round`].
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Session time accumulated from ticks.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Check if a deferred action is waiting to fire.
    #[must_use]
    pub fn is_pending(&self, action: Deferred) -> bool {
        self.scheduler.contains(action)
    }

    /// Check if the ended round's score can still be entered on the leaderboard.
    #[must_use]
    pub fn can_submit_leaderboard_name(&self) -> bool {
        self.leaderboard_pending
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Inputs ===

    /// Dispatch one input.
    pub fn apply(&mut self, input: SessionInput) {
        match input {
            SessionInput::StartRound => self.start_round(),
            SessionInput::Tick { dt } => self.advance(dt),
            SessionInput::TileTapped { tile } => self.submit_tile_tap(tile),
        }
    }

    /// Begin a new round, abandoning any round in progress.
    pub fn start_round(&mut self) {
        self.scheduler.clear();
        self.epoch += 1;
        self.phase = RoundPhase::Active;
        self.record = SessionRecord::new(self.config.game_time);
        self.record.is_active = true;
        self.leaderboard_pending = false;

        self.events.push(SessionEvent::RoundStarted { epoch: self.epoch });
        self.begin_task();

        if let Some(task) = &self.task {
            log::info!("round {} started with {}", self.epoch, task.word());
        }
    }

    /// Move the clock forward by `dt` seconds.
    ///
    /// The round timer is checked before any deferred action, so a word
    /// finished in the last frame does not outlive the clock.
    pub fn advance(&mut self, dt: f32) {
        if !self.phase.is_active() || !dt.is_finite() || dt < 0.0 {
            return;
        }

        // The clock never runs past the end of the round
        let step = dt.min(self.record.time_left.max(0.0));
        self.clock = self.clock.saturating_add(seconds(step));
        self.record.time_left -= dt;

        if self.record.time_left <= 0.0 {
            self.record.time_left = 0.0;
            self.end_game();
            return;
        }

        self.run_due();
    }

    /// Handle a tap on `tile`.
    ///
    /// Taps outside an open task, on unknown tiles or on tiles already in
    /// play are ignored. Otherwise the tile must carry the next letter of
    /// the word; anything else costs the wrong-tap penalty.
    pub fn submit_tile_tap(&mut self, tile: TileId) {
        if !self.phase.is_active() || !self.task_open || self.selection.len() >= WORD_LEN {
            return;
        }
        let Some(task) = self.task else {
            return;
        };
        let Some(index) = self.tiles.iter().position(|t| t.id == tile) else {
            return;
        };
        if !self.tiles[index].is_idle() {
            return;
        }

        let slot = self.selection.len();
        let letter = self.tiles[index].letter;

        if task.word().letter(slot) == Some(letter) {
            self.tiles[index].state = TileState::Selected;
            self.selection.push(tile);
            log::debug!("{} accepted '{}' in slot {}", tile, letter, slot);
            self.events.push(SessionEvent::TileTapAccepted { tile, slot });

            if self.selection.len() == WORD_LEN {
                self.set_selection_state(TileState::Flying);
                self.schedule(self.config.settle_delay, Deferred::CompleteTask);
            }
        } else {
            self.record.current_score = self.scoring.penalty_for_wrong_tap(self.record.current_score);
            self.record.wrong_tap_count += 1;
            log::debug!("{} rejected '{}', expected slot {}", tile, letter, slot);
            self.events.push(SessionEvent::TileTapRejected { tile });
        }
    }

    /// End the round now, as if the clock had run out.
    pub fn force_timeout(&mut self) {
        if !self.phase.is_active() {
            return;
        }
        self.record.time_left = 0.0;
        self.end_game();
    }

    /// Enter the ended round's score on the leaderboard under `name`.
    ///
    /// Accepted once per eligible round. Returns the 0-based rank.
    pub fn submit_leaderboard_name(&mut self, name: &str) -> Option<usize> {
        if !self.leaderboard_pending {
            return None;
        }
        self.leaderboard_pending = false;
        self.stats
            .insert_leaderboard_entry(name, self.record.current_score)
    }

    // === Internals ===

    /// Session clock to the nearest millisecond.
    fn now_millis(&self) -> u64 {
        let millis = (self.clock.as_nanos() + 500_000) / 1_000_000;
        u64::try_from(millis).unwrap_or(u64::MAX)
    }

    fn schedule(&mut self, delay: f32, action: Deferred) {
        let due = self.clock.saturating_add(seconds(delay));
        self.scheduler.schedule(due, self.epoch, action);
    }

    fn run_due(&mut self) {
        while let Some(scheduled) = self.scheduler.pop_due(self.clock) {
            if scheduled.epoch != self.epoch || !self.phase.is_active() {
                log::debug!("dropping stale {:?} from round {}", scheduled.action, scheduled.epoch);
                continue;
            }

            log::debug!("firing {:?}", scheduled.action);
            match scheduled.action {
                Deferred::CompleteTask => self.complete_task(),
                Deferred::NextTask => self.begin_task(),
                Deferred::EndFlash => {
                    self.record.flash_active = false;
                    self.events.push(SessionEvent::FlashEnded);
                }
            }
        }
    }

    fn begin_task(&mut self) {
        let now = self.now_millis();
        let task = self.words.pick_task(&mut self.word_rng, now);
        self.tiles = self.placer.spawn(&task, &mut self.tile_rng, &mut self.tile_ids);
        self.selection.clear();
        self.task = Some(task);
        self.task_open = true;
        self.record.opponent_task_time = None;

        log::debug!("task {} started with {} tiles", task.word(), self.tiles.len());
        self.events.push(SessionEvent::TaskStarted { word: task.word() });

        if let Some(opponent) = self.config.mode.opponent() {
            let task_time = self.scoring.sample_opponent_time(
                opponent.difficulty,
                self.stats.player(),
                &mut self.opponent_rng,
            );
            self.record.opponent_task_time = Some(task_time);
            self.events.push(SessionEvent::OpponentPaced {
                name: opponent.name.clone(),
                task_time,
            });
        }
    }

    fn complete_task(&mut self) {
        let Some(task) = self.task else {
            return;
        };
        if !self.task_open || self.selection.len() < WORD_LEN {
            return;
        }

        let time_taken = task.elapsed_seconds(self.now_millis());
        let score = self.scoring.score_for_completion(time_taken);

        self.record.completed_tasks.push_back(CompletedTask {
            word: task.word(),
            time_taken,
            score,
        });
        self.record.current_score = self.record.current_score.saturating_add(score);
        self.record.tasks_completed += 1;
        self.record.time_left = self.scoring.time_bonus_on_completion(self.record.time_left);
        self.record.flash_active = true;

        if self.config.mode.is_solo() {
            self.stats.record_task_time(time_taken);
        }

        self.set_selection_state(TileState::Consumed);
        self.selection.clear();
        self.task_open = false;

        log::debug!("task {} completed in {:.2}s for {}", task.word(), time_taken, score);
        self.events.push(SessionEvent::TaskCompleted {
            word: task.word(),
            score,
            time_taken,
        });

        self.schedule(self.config.flash_duration, Deferred::EndFlash);
        self.schedule(self.config.next_task_delay, Deferred::NextTask);
    }

    fn end_game(&mut self) {
        self.phase = RoundPhase::Ended;
        self.record.is_active = false;
        self.record.flash_active = false;
        self.scheduler.clear();
        self.task_open = false;

        if self.config.mode.is_solo() {
            self.stats.increment_games_played();
        }

        let final_score = self.record.current_score;
        let top_ten = self.stats.is_top_ten(final_score);
        self.leaderboard_pending = top_ten;

        log::info!(
            "round {} ended: score {}, {} words, top ten: {}",
            self.epoch,
            final_score,
            self.record.tasks_completed,
            top_ten
        );
        self.events.push(SessionEvent::RoundEnded {
            final_score,
            top_ten,
        });
    }

    fn set_selection_state(&mut self, state: TileState) {
        for tile in self.tiles.iter_mut() {
            if self.selection.contains(&tile.id) {
                tile.state = state;
            }
        }
    }
}

/// Non-negative seconds as a `Duration`, saturating at `Duration::MAX`.
fn seconds(value: f32) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameMode;
    use crate::scoring::{Difficulty, Opponent};
    use crate::stats::MemoryStorage;

    fn session() -> Session<MemoryStorage> {
        let bank = WordBank::new(["RICE"]).unwrap();
        let config = EngineConfig::default().with_seed(11);
        Session::with_word_bank(config, MemoryStorage::new(), bank).unwrap()
    }

    /// Tap the word's letters in order, picking the first idle tile for each.
    fn spell(session: &mut Session<MemoryStorage>) {
        let word = session.task().unwrap().word();
        for &letter in word.letters() {
            let id = session
                .tiles()
                .iter()
                .find(|t| t.is_idle() && t.letter == letter)
                .map(|t| t.id)
                .unwrap();
            session.submit_tile_tap(id);
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.phase(), RoundPhase::Idle);
        assert!(session.task().is_none());
        assert!(session.tiles().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_game_time(-1.0);
        assert!(Session::new(config, MemoryStorage::new()).is_err());
    }

    #[test]
    fn test_start_round() {
        let mut session = session();
        session.start_round();

        assert!(session.is_active());
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.record().time_left, 30.0);
        assert_eq!(session.task().unwrap().word().to_string(), "RICE");
        assert_eq!(session.tiles().len(), 12);

        let events = session.drain_events();
        assert_eq!(events[0], SessionEvent::RoundStarted { epoch: 1 });
        assert!(matches!(events[1], SessionEvent::TaskStarted { .. }));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_taps_ignored_before_round() {
        let mut session = session();
        session.submit_tile_tap(TileId(0));
        session.advance(1.0);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.clock(), Duration::ZERO);
    }

    #[test]
    fn test_fourth_letter_schedules_completion() {
        let mut session = session();
        session.start_round();
        spell(&mut session);

        assert_eq!(session.selection().len(), WORD_LEN);
        assert!(session.is_pending(Deferred::CompleteTask));
        assert!(session
            .tiles()
            .iter()
            .filter(|t| session.selection().contains(&t.id))
            .all(|t| t.state == TileState::Flying));

        // A fifth tap is ignored outright
        let spare = session.tiles().iter().find(|t| t.is_idle()).unwrap().id;
        let score = session.record().current_score;
        session.submit_tile_tap(spare);
        assert_eq!(session.record().current_score, score);
        assert_eq!(session.record().wrong_tap_count, 0);
    }

    #[test]
    fn test_completion_consumes_tiles_and_closes_task() {
        let mut session = session();
        session.start_round();
        spell(&mut session);
        let selected: Vec<TileId> = session.selection().to_vec();

        session.advance(0.7);
        assert_eq!(session.record().tasks_completed, 1);
        assert!(session.record().flash_active);
        assert!(session.selection().is_empty());
        for id in selected {
            assert_eq!(session.tile(id).unwrap().state, TileState::Consumed);
        }

        // Leftover tiles do not count until the next word is up
        let leftover = session.tiles().iter().find(|t| t.is_idle()).unwrap().id;
        session.submit_tile_tap(leftover);
        assert_eq!(session.record().wrong_tap_count, 0);
    }

    #[test]
    fn test_flash_then_next_task() {
        let mut session = session();
        session.start_round();
        spell(&mut session);
        session.advance(0.7);
        session.drain_events();

        session.advance(0.35);
        assert!(!session.record().flash_active);
        assert_eq!(session.drain_events(), vec![SessionEvent::FlashEnded]);

        session.advance(0.5);
        let events = session.drain_events();
        assert!(matches!(events[0], SessionEvent::TaskStarted { .. }));
        assert!(session.tiles().iter().all(|t| t.state == TileState::Idle));
    }

    #[test]
    fn test_force_timeout() {
        let mut session = session();
        session.start_round();
        spell(&mut session);
        session.force_timeout();

        assert!(session.is_ended());
        assert_eq!(session.record().time_left, 0.0);
        assert!(!session.is_pending(Deferred::CompleteTask));
        assert_eq!(session.stats().player().total_games_played, 1);
    }

    #[test]
    fn test_versus_paces_opponent_and_skips_stats() {
        let bank = WordBank::new(["RICE"]).unwrap();
        let opponent = Opponent::new("Siti", Difficulty::HARDEST);
        let config = EngineConfig::default()
            .with_seed(3)
            .with_mode(GameMode::Versus(opponent));
        let mut session = Session::with_word_bank(config, MemoryStorage::new(), bank).unwrap();

        session.start_round();
        let paced = session.record().opponent_task_time.unwrap();
        assert!(session.drain_events().iter().any(|e| matches!(
            e,
            SessionEvent::OpponentPaced { name, task_time } if name == "Siti" && *task_time == paced
        )));

        spell(&mut session);
        session.advance(0.7);
        session.force_timeout();

        assert_eq!(session.record().tasks_completed, 1);
        assert!(session.stats().player().recent_task_times.is_empty());
        assert_eq!(session.stats().player().total_games_played, 0);
    }

    #[test]
    fn test_leaderboard_name_once_per_round() {
        let mut session = session();
        session.start_round();
        assert_eq!(session.submit_leaderboard_name("Early"), None);

        session.force_timeout();
        assert!(session.can_submit_leaderboard_name());
        assert_eq!(session.submit_leaderboard_name("Amir"), Some(0));
        assert_eq!(session.submit_leaderboard_name("Amir"), None);
        assert_eq!(session.stats().leaderboard().len(), 1);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut session = session();
        session.apply(SessionInput::StartRound);
        assert!(session.is_active());

        session.apply(SessionInput::Tick { dt: 1.0 });
        assert_eq!(session.record().time_left, 29.0);

        let tile = session.tiles()[0].id;
        session.apply(SessionInput::TileTapped { tile });
        let events = session.drain_events();
        assert!(matches!(
            events.last(),
            Some(SessionEvent::TileTapAccepted { .. } | SessionEvent::TileTapRejected { .. })
        ));
    }

    #[test]
    fn test_huge_tick_ends_round() {
        let mut session = session();
        session.start_round();
        session.advance(1e20);

        assert!(session.is_ended());
        assert_eq!(session.record().time_left, 0.0);
        assert_eq!(session.clock(), Duration::from_secs(30));
    }

    #[test]
    fn test_huge_delay_never_fires() {
        let bank = WordBank::new(["RICE"]).unwrap();
        let config = EngineConfig::from_json(r#"{ "settle_delay": 1e30, "seed": 4 }"#).unwrap();
        let mut session = Session::with_word_bank(config, MemoryStorage::new(), bank).unwrap();
        session.start_round();
        spell(&mut session);

        assert!(session.is_pending(Deferred::CompleteTask));
        session.advance(10.0);
        assert_eq!(session.record().tasks_completed, 0);
        assert!(session.is_pending(Deferred::CompleteTask));
    }

    #[test]
    fn test_seconds_saturates() {
        assert_eq!(seconds(1e30), Duration::MAX);
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
        assert_eq!(seconds(0.5), Duration::from_millis(500));
    }

    #[test]
    fn test_stale_epoch_deferral_dropped() {
        let mut session = session();
        session.start_round();
        let stale = session.epoch() - 1;
        session.scheduler.schedule(session.clock(), stale, Deferred::EndFlash);
        session.record.flash_active = true;
        session.drain_events();

        session.advance(0.1);
        assert!(session.record().flash_active);
        assert!(session.drain_events().is_empty());
        assert!(!session.is_pending(Deferred::EndFlash));
    }

    #[test]
    fn test_negative_tick_ignored() {
        let mut session = session();
        session.start_round();
        session.advance(-5.0);
        session.advance(f32::NAN);
        assert_eq!(session.record().time_left, 30.0);
    }
}
