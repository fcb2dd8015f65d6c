//! Session state machine
//!
//! ```text
//!            start / correct tap                 delay fires, circle placed
//!   Idle ─────────────────────────▶ AddingCircle ───────────────────────────▶ Idle
//!    │                                   │
//!    │ tap on an old circle              │ delay fires, board full
//!    ▼                                   ▼
//!   Lost ──────── reset ───────▶ AddingCircle ◀──────── reset ──────── Won
//! ```
//!
//! Everything runs on the caller's thread. The only delay is the pause before
//! each placement; it is driven by [`Game::advance`] and guarded by the session
//! epoch so a reset invalidates placements that are still pending.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::circle::{Circle, TapOutcome, classify_tap};
use super::placement::{Bounds, place_new_circle};
use super::schedule::{DelayQueue, PlacementTicket};
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::{SoundEffect, SoundPlayer};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::tuning::Tuning;

pub struct Game<S, P> {
    state: GameState,
    bounds: Bounds,
    tuning: Tuning,
    store: S,
    sound: P,
    rng: Pcg32,
    delays: DelayQueue,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore, P: SoundPlayer> Game<S, P> {
    /// Create an idle session with default tuning
    pub fn new(bounds: Bounds, store: S, sound: P, seed: u64) -> Self {
        Self::with_tuning(bounds, Tuning::default(), store, sound, seed)
    }

    /// Create an idle session. Tuning that fails validation is replaced by
    /// the defaults.
    pub fn with_tuning(bounds: Bounds, tuning: Tuning, store: S, sound: P, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{e:#} - using default tuning");
                Tuning::default()
            }
        };
        Self {
            state: GameState::default(),
            bounds,
            tuning,
            store,
            sound,
            rng: Pcg32::seed_from_u64(seed),
            delays: DelayQueue::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn circles(&self) -> &[Circle] {
        &self.state.circles
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sound_mut(&mut self) -> &mut P {
        &mut self.sound
    }

    /// Placements waiting on their delay, stale ones included
    pub fn pending_placements(&self) -> usize {
        self.delays.len()
    }

    /// New canvas geometry; applies to the next placement
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            log::info!(
                "Canvas bounds {}x{} @{} -> {}x{} @{}",
                self.bounds.width,
                self.bounds.height,
                self.bounds.density,
                bounds.width,
                bounds.height,
                bounds.density
            );
            self.bounds = bounds;
        }
    }

    /// Begin the first level
    pub fn start(&mut self) -> PlacementTicket {
        log::info!("Session started (epoch {})", self.state.epoch);
        self.begin_adding_circle()
    }

    /// Move the timeline forward by `dt` seconds, applying due placements
    pub fn advance(&mut self, dt: f32) {
        for ticket in self.delays.advance(dt) {
            self.complete_placement(ticket);
        }
    }

    /// Apply a delayed placement. Returns false when the ticket is stale.
    pub fn complete_placement(&mut self, ticket: PlacementTicket) -> bool {
        if ticket.epoch != self.state.epoch {
            log::debug!(
                "Discarding placement from epoch {} (now {})",
                ticket.epoch,
                self.state.epoch
            );
            return false;
        }
        if self.state.phase != GamePhase::AddingCircle || ticket.level != self.state.level {
            log::debug!(
                "Discarding placement for level {} in phase {}",
                ticket.level,
                self.state.phase.as_str()
            );
            return false;
        }

        if let Some(high_score) = HighScore::record(&mut self.store, self.state.level) {
            self.events.push(GameEvent::HighScoreChanged(high_score));
        }

        match place_new_circle(&self.state.circles, &self.bounds, &self.tuning, &mut self.rng) {
            Some(circle) => {
                self.state.circles.push(circle);
                self.events.push(GameEvent::CircleAdded(circle));
                self.set_phase(GamePhase::Idle);
            }
            None => {
                log::info!("Board full at level {} - you win!", self.state.level);
                self.events.push(GameEvent::BoardFull);
                self.set_phase(GamePhase::Won);
            }
        }
        true
    }

    /// Handle a tap at `point` (canvas device pixels)
    pub fn tap(&mut self, point: Vec2) -> TapOutcome {
        if self.state.phase != GamePhase::Idle {
            return TapOutcome::Ignored;
        }

        let outcome = classify_tap(point, &self.state.circles);
        match outcome {
            TapOutcome::Correct => {
                self.state.level += 1;
                self.events.push(GameEvent::LevelChanged(self.state.level));
                self.sound.play(SoundEffect::Correct);
                self.events.push(GameEvent::CorrectTap);
                self.begin_adding_circle();
            }
            TapOutcome::Incorrect => {
                log::info!("Wrong circle at level {} - game over", self.state.level);
                self.sound.play(SoundEffect::Incorrect);
                self.events.push(GameEvent::IncorrectTap);
                self.set_phase(GamePhase::Lost);
            }
            TapOutcome::Miss | TapOutcome::Ignored => {}
        }
        outcome
    }

    /// Start over at level 1 with an empty board.
    ///
    /// Placements still pending from before the reset are left in the queue
    /// and dropped by the epoch check when they fire.
    pub fn reset(&mut self) -> PlacementTicket {
        self.state.epoch += 1;
        self.state.circles.clear();
        self.events.push(GameEvent::Reset);
        if self.state.level != 1 {
            self.state.level = 1;
            self.events.push(GameEvent::LevelChanged(1));
        }
        self.set_phase(GamePhase::Idle);
        log::info!("Game reset (epoch {})", self.state.epoch);
        self.begin_adding_circle()
    }

    pub fn high_score(&self) -> u32 {
        HighScore::get(&self.store)
    }

    pub fn clear_high_score(&mut self) {
        HighScore::clear(&mut self.store);
        self.events.push(GameEvent::HighScoreChanged(0));
    }

    /// Drain notifications since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn begin_adding_circle(&mut self) -> PlacementTicket {
        self.set_phase(GamePhase::AddingCircle);
        let ticket = PlacementTicket {
            epoch: self.state.epoch,
            level: self.state.level,
        };
        self.delays.schedule(ticket, self.tuning.add_circle_delay);
        ticket
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.state.phase;
        if from != to {
            self.state.phase = to;
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingPlayer;
    use crate::persistence::MemoryStore;

    type TestGame = Game<MemoryStore, RecordingPlayer>;

    fn roomy() -> TestGame {
        Game::new(
            Bounds::new(1080, 1920, 2.0),
            MemoryStore::new(),
            RecordingPlayer::default(),
            42,
        )
    }

    fn active_center(game: &TestGame) -> Vec2 {
        game.circles().last().unwrap().center()
    }

    /// Start and wait for the first circle
    fn started(mut game: TestGame) -> TestGame {
        game.start();
        game.advance(1.0);
        assert_eq!(game.phase(), GamePhase::Idle);
        game
    }

    #[test]
    fn test_first_circle_after_delay() {
        let mut game = roomy();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.level(), 1);

        game.start();
        assert_eq!(game.phase(), GamePhase::AddingCircle);
        game.advance(0.5);
        assert!(game.circles().is_empty());
        game.advance(0.5);
        assert_eq!(game.circles().len(), 1);
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let tuning = Tuning {
            min_radius_dp: 40,
            max_radius_dp: 20,
            ..Tuning::default()
        };
        let mut game = Game::with_tuning(
            Bounds::new(1080, 1920, 2.0),
            tuning,
            MemoryStore::new(),
            RecordingPlayer::default(),
            3,
        );
        assert_eq!(game.tuning(), &Tuning::default());

        game.start();
        game.advance(1.0);
        assert_eq!(game.circles().len(), 1);
    }

    #[test]
    fn test_correct_tap_advances_level() {
        let mut game = started(roomy());

        assert_eq!(game.tap(active_center(&game)), TapOutcome::Correct);
        assert_eq!(game.level(), 2);
        assert_eq!(game.phase(), GamePhase::AddingCircle);

        game.advance(1.0);
        assert_eq!(game.circles().len(), 2);
        assert_eq!(game.sound_mut().played, vec![SoundEffect::Correct]);
    }

    #[test]
    fn test_taps_ignored_while_adding() {
        let mut game = roomy();
        game.start();
        assert_eq!(game.tap(Vec2::new(10.0, 10.0)), TapOutcome::Ignored);

        game.advance(1.0);
        let target = active_center(&game);
        game.tap(target);
        // Second tap lands during the delay
        assert_eq!(game.tap(target), TapOutcome::Ignored);
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut game = started(roomy());
        game.take_events();
        let before = game.state().clone();

        assert_eq!(game.tap(Vec2::new(-100.0, -100.0)), TapOutcome::Miss);
        assert_eq!(*game.state(), before);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_old_circle_loses() {
        let mut game = started(roomy());
        let first = active_center(&game);
        game.tap(first);
        game.advance(1.0);

        assert_eq!(game.tap(first), TapOutcome::Incorrect);
        assert_eq!(game.phase(), GamePhase::Lost);
        assert_eq!(game.level(), 2);
        assert_eq!(
            game.sound_mut().played,
            vec![SoundEffect::Correct, SoundEffect::Incorrect]
        );

        // Terminal until reset
        assert_eq!(game.tap(active_center(&game)), TapOutcome::Ignored);
        game.advance(5.0);
        assert_eq!(game.phase(), GamePhase::Lost);
    }

    #[test]
    fn test_board_full_wins() {
        // Only one 16px circle fits
        let mut game = Game::new(
            Bounds::new(32, 32, 1.0),
            MemoryStore::new(),
            RecordingPlayer::default(),
            7,
        );
        game.start();
        game.advance(1.0);
        assert_eq!(game.circles(), &[Circle::new(16.0, 16.0, 16.0)]);

        assert_eq!(game.tap(Vec2::new(16.0, 16.0)), TapOutcome::Correct);
        game.take_events();
        game.advance(1.0);

        assert_eq!(game.phase(), GamePhase::Won);
        assert_eq!(game.circles().len(), 1);
        let events = game.take_events();
        assert!(events.contains(&GameEvent::BoardFull));
        assert_eq!(game.high_score(), 2);
    }

    #[test]
    fn test_high_score_written_before_placement() {
        let mut game = roomy();
        game.start();
        assert_eq!(game.high_score(), 0);
        game.advance(1.0);
        assert_eq!(game.high_score(), 1);

        let mut best = 1;
        for _ in 0..5 {
            game.tap(active_center(&game));
            game.advance(1.0);
            let hs = game.high_score();
            assert!(hs >= best);
            best = hs;
        }
        assert_eq!(best, 6);
    }

    #[test]
    fn test_high_score_not_lowered_by_new_session() {
        let mut store = MemoryStore::new();
        HighScore::record(&mut store, 10);
        let mut game = Game::new(
            Bounds::new(800, 600, 1.0),
            store,
            RecordingPlayer::default(),
            1,
        );
        game.start();
        game.advance(1.0);
        assert_eq!(game.high_score(), 10);
        assert!(
            !game
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::HighScoreChanged(_)))
        );
    }

    #[test]
    fn test_reset_discards_pending_placement() {
        let mut game = roomy();
        game.start();
        game.advance(0.5);

        game.reset();
        assert!(game.circles().is_empty());
        assert_eq!(game.phase(), GamePhase::AddingCircle);
        assert_eq!(game.pending_placements(), 2);

        // The pre-reset placement falls due first and must not land
        game.advance(0.5);
        assert!(game.circles().is_empty());
        assert_eq!(game.phase(), GamePhase::AddingCircle);
        assert_eq!(game.pending_placements(), 1);

        game.advance(0.5);
        assert_eq!(game.circles().len(), 1);
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut game = roomy();
        let stale = game.start();
        game.reset();

        assert!(!game.complete_placement(stale));
        assert!(game.circles().is_empty());
        assert_eq!(game.state().epoch, 1);
    }

    #[test]
    fn test_reset_from_lost() {
        let mut game = started(roomy());
        let first = active_center(&game);
        game.tap(first);
        game.advance(1.0);
        game.tap(first);
        assert_eq!(game.phase(), GamePhase::Lost);

        game.reset();
        assert!(game.circles().is_empty());
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::AddingCircle);

        // Again, straight away
        game.reset();
        assert!(game.circles().is_empty());
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::AddingCircle);

        game.advance(1.0);
        assert_eq!(game.circles().len(), 1);
    }

    #[test]
    fn test_reset_from_won() {
        let mut game = Game::new(
            Bounds::new(32, 32, 1.0),
            MemoryStore::new(),
            RecordingPlayer::default(),
            3,
        );
        game.start();
        game.advance(1.0);
        game.tap(Vec2::new(16.0, 16.0));
        game.advance(1.0);
        assert_eq!(game.phase(), GamePhase::Won);

        game.reset();
        assert!(game.circles().is_empty());
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::AddingCircle);
        game.advance(1.0);
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_event_sequence_for_correct_tap() {
        let mut game = started(roomy());
        game.take_events();

        game.tap(active_center(&game));
        assert_eq!(
            game.take_events(),
            vec![
                GameEvent::LevelChanged(2),
                GameEvent::CorrectTap,
                GameEvent::PhaseChanged {
                    from: GamePhase::Idle,
                    to: GamePhase::AddingCircle
                },
            ]
        );
    }

    #[test]
    fn test_resize_applies_to_next_placement() {
        let mut game = roomy();
        game.start();
        game.set_bounds(Bounds::new(200, 200, 1.0));
        game.advance(1.0);

        let placed = game.circles()[0];
        assert!(game.bounds().contains(&placed));
        assert!(placed.r <= 32.0);
    }

    #[test]
    fn test_clear_high_score() {
        let mut game = started(roomy());
        assert_eq!(game.high_score(), 1);
        game.clear_high_score();
        assert_eq!(game.high_score(), 0);
        assert_eq!(
            game.take_events().last(),
            Some(&GameEvent::HighScoreChanged(0))
        );
    }

    #[test]
    fn test_level_monotonic_over_session() {
        let mut game = started(roomy());
        let mut last_level = game.level();
        for _ in 0..20 {
            if game.phase() != GamePhase::Idle {
                break;
            }
            game.tap(active_center(&game));
            assert_eq!(game.level(), last_level + 1);
            last_level = game.level();
            game.advance(1.0);
        }
        assert_eq!(last_level, 21);
    }
}
