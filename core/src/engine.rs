use alloc::string::String;
use alloc::vec::Vec;
use chrono::SecondsFormat;
use core::time::Duration;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Paused,
    Won,
}

/// Everything about the game currently on the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    pub cards: Vec<Card>,
    pub moves: PairCount,
    pub matches: PairCount,
    /// Seconds spent playing, pauses excluded.
    pub time_elapsed: u32,
    pub is_game_won: bool,
    pub is_paused: bool,
    pub is_game_started: bool,
    pub difficulty: Difficulty,
}

impl GameState {
    pub fn new(cards: Vec<Card>, difficulty: Difficulty) -> Self {
        Self {
            cards,
            moves: 0,
            matches: 0,
            time_elapsed: 0,
            is_game_won: false,
            is_paused: false,
            is_game_started: false,
            difficulty,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_won {
            GamePhase::Won
        } else if !self.is_game_started {
            GamePhase::NotStarted
        } else if self.is_paused {
            GamePhase::Paused
        } else {
            GamePhase::InProgress
        }
    }

    pub const fn total_pairs(&self) -> PairCount {
        self.difficulty.pairs()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Whether the elapsed-time ticker should be running.
    fn clock_running(&self) -> bool {
        self.is_game_started && !self.is_paused && !self.is_game_won
    }
}

/// Cards face up and waiting for resolution, never more than two.
pub type FlippedSelection = SmallVec<[CardId; 2]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long both cards of a pair stay visible before they are matched or turned back.
    pub resolve_delay: Duration,
    pub tick_period: Duration,
}

impl EngineConfig {
    pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(1200);
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolve_delay: Self::DEFAULT_RESOLVE_DELAY,
            tick_period: Self::DEFAULT_TICK_PERIOD,
        }
    }
}

/// What a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub state: &'a GameState,
    pub current_score: u32,
    pub is_resolving: bool,
    pub show_win_summary: bool,
    pub is_new_best: bool,
    pub best_score: Option<&'a BestScore>,
}

/// Owns one game session at a time together with the timers that drive it.
pub struct MemoryEngine<S: Scheduler, K> {
    config: EngineConfig,
    scheduler: S,
    scores: BestScoreStore<K>,
    deck: RandomDeckGenerator,
    state: GameState,
    selection: FlippedSelection,
    session: Session,
    ticker: Option<S::Handle>,
    pending_resolve: Option<S::Handle>,
    best_score: Option<BestScore>,
    show_win_summary: bool,
    is_new_best: bool,
}

impl<S: Scheduler, K: KeyValueStore> MemoryEngine<S, K> {
    pub fn new(
        config: EngineConfig,
        scheduler: S,
        store: K,
        seed: u64,
        difficulty: Difficulty,
    ) -> Self {
        let mut deck = RandomDeckGenerator::new(seed);
        let scores = BestScoreStore::new(store);
        let state = GameState::new(deck.generate(difficulty), difficulty);
        let best_score = scores.best_score_for(difficulty);
        log::debug!("new engine, difficulty: {}, best: {:?}", difficulty, best_score);
        Self {
            config,
            scheduler,
            scores,
            deck,
            state,
            selection: SmallVec::new(),
            session: 0,
            ticker: None,
            pending_resolve: None,
            best_score,
            show_win_summary: false,
            is_new_best: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Whether a flipped pair is waiting to be matched or turned back.
    pub fn is_resolving(&self) -> bool {
        self.pending_resolve.is_some()
    }

    /// Provisional score if the game ended right now.
    pub fn current_score(&self) -> u32 {
        calculate_score(self.state.moves, self.state.time_elapsed, self.state.difficulty)
    }

    pub fn stats(&self) -> GameStats {
        GameStats::new(self.state.moves, self.state.time_elapsed, self.state.difficulty)
    }

    /// Best recorded score for the current difficulty.
    pub fn best_score(&self) -> Option<&BestScore> {
        self.best_score.as_ref()
    }

    /// Full leaderboard across all difficulties.
    pub fn best_scores(&self) -> Vec<BestScore> {
        self.scores.best_scores()
    }

    pub fn show_win_summary(&self) -> bool {
        self.show_win_summary
    }

    pub fn is_new_best(&self) -> bool {
        self.is_new_best
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: &self.state,
            current_score: self.current_score(),
            is_resolving: self.is_resolving(),
            show_win_summary: self.show_win_summary,
            is_new_best: self.is_new_best,
            best_score: self.best_score.as_ref(),
        }
    }

    /// Turns a card face up; the second card of a turn starts the resolution delay.
    ///
    /// Flips while a pair is resolving, while paused, after the win, or on unknown or already visible cards are
    /// ignored.
    pub fn flip_card(&mut self, id: CardId) -> FlipOutcome {
        if self.is_resolving() || self.state.is_paused || self.state.is_game_won {
            log::trace!("flip {} ignored, board locked", id);
            return FlipOutcome::Ignored;
        }

        match self.state.card(id) {
            Some(card) if card.can_flip() => {}
            _ => {
                log::trace!("flip {} ignored, not flippable", id);
                return FlipOutcome::Ignored;
            }
        }

        if !self.state.is_game_started {
            log::debug!("game started");
            self.state.is_game_started = true;
            self.sync_ticker();
        }

        if let Some(card) = self.state.card_mut(id) {
            card.is_flipped = true;
        }
        self.selection.push(id);
        log::debug!("flipped {}", id);

        if self.selection.len() < 2 {
            return FlipOutcome::Flipped;
        }

        self.state.moves += 1;
        let task = Task::Resolve(self.session);
        self.pending_resolve = Some(self.scheduler.after(self.config.resolve_delay, task));
        FlipOutcome::PairSelected
    }

    /// Runs a task previously handed to the scheduler.
    pub fn run_task(&mut self, task: Task) -> TaskOutcome {
        if task.session() != self.session {
            log::trace!("dropping stale {:?}, current session {}", task, self.session);
            return TaskOutcome::Stale;
        }

        match task {
            Task::Tick(_) => self.tick(),
            Task::Resolve(_) => self.resolve(),
        }
    }

    /// Pauses or resumes a running game, returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.state.is_game_started || self.state.is_game_won {
            return false;
        }
        self.state.is_paused = !self.state.is_paused;
        log::debug!("paused: {}", self.state.is_paused);
        self.sync_ticker();
        true
    }

    /// Deals a new game on the current difficulty.
    pub fn restart_game(&mut self) {
        self.reset(self.state.difficulty);
    }

    /// Deals a new game on `difficulty` and loads its best score.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.reset(difficulty);
        self.best_score = self.scores.best_score_for(difficulty);
    }

    pub fn dismiss_win_summary(&mut self) {
        self.show_win_summary = false;
    }

    fn reset(&mut self, difficulty: Difficulty) {
        self.ticker = None;
        self.pending_resolve = None;
        self.session = self.session.wrapping_add(1);

        self.state = GameState::new(self.deck.generate(difficulty), difficulty);
        self.selection.clear();
        self.show_win_summary = false;
        self.is_new_best = false;
        log::debug!("new game, session: {}, difficulty: {}", self.session, difficulty);
    }

    fn tick(&mut self) -> TaskOutcome {
        if !self.state.clock_running() {
            return TaskOutcome::Stale;
        }
        self.state.time_elapsed = self.state.time_elapsed.saturating_add(1);
        TaskOutcome::Ticked
    }

    fn resolve(&mut self) -> TaskOutcome {
        if self.pending_resolve.take().is_none() {
            return TaskOutcome::Stale;
        }

        let [first, second] = match self.selection.as_slice() {
            &[first, second] => [first, second],
            other => {
                log::warn!("resolving without a pair: {:?}", other);
                self.selection.clear();
                return TaskOutcome::Stale;
            }
        };
        self.selection.clear();

        let is_match = match (self.state.card(first), self.state.card(second)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };

        for id in [first, second] {
            if let Some(card) = self.state.card_mut(id) {
                if is_match {
                    card.is_matched = true;
                } else {
                    card.is_flipped = false;
                }
            }
        }

        if !is_match {
            log::debug!("no match: {} {}", first, second);
            return TaskOutcome::Mismatched;
        }

        self.state.matches += 1;
        log::debug!("match: {} {} ({}/{})", first, second, self.state.matches, self.state.total_pairs());

        if self.state.matches == self.state.total_pairs() && self.state.matches > 0 {
            self.win()
        } else {
            TaskOutcome::Matched
        }
    }

    fn win(&mut self) -> TaskOutcome {
        self.state.is_game_won = true;
        self.state.is_paused = false;
        self.sync_ticker();

        let score = self.current_score();
        let record = BestScore {
            score,
            moves: self.state.moves,
            time: self.state.time_elapsed,
            difficulty: self.state.difficulty,
            date: self.timestamp(),
        };

        let new_best = self
            .best_score
            .as_ref()
            .is_none_or(|best| score > best.score);
        log::info!("won with {} points in {} moves, new best: {}", score, record.moves, new_best);

        if new_best {
            if let Err(err) = self.scores.save_best_score(record.clone()) {
                log::error!("Could not save best score: {}", err);
            }
            self.best_score = Some(record);
        }

        self.is_new_best = new_best;
        self.show_win_summary = true;
        TaskOutcome::Won { score, new_best }
    }

    fn timestamp(&self) -> String {
        self.scheduler.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Arms or cancels the elapsed-time ticker to match the current state, never running two at once.
    fn sync_ticker(&mut self) {
        if self.state.clock_running() {
            self.ticker = None;
            let task = Task::Tick(self.session);
            self.ticker = Some(self.scheduler.every(self.config.tick_period, task));
        } else {
            self.ticker = None;
        }
    }
}
