//! Game session: lifecycle around the per-tick simulation
//!
//! Owns everything a host needs to run the game: the level catalog, the
//! physics bound to the current settings, the random source, the pause gate
//! and the snapshot of the current attempt.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::LevelCatalog;
use super::physics::Physics;
use super::random::RandomSource;
use super::state::{GameEvent, GamePhase, GameStateData, create_initial_state};
use super::tick::{TickInput, tick};
use crate::config::GameConfig;
use crate::settings::Settings;

pub struct Session<R: RandomSource = Pcg32> {
    catalog: LevelCatalog,
    base_config: GameConfig,
    physics: Physics,
    rng: R,
    paused: bool,
    state: GameStateData,
}

impl Session<Pcg32> {
    /// Session over the standard levels with a seeded PCG source
    pub fn new(config: GameConfig, settings: Settings, seed: u64) -> Self {
        Self::with_random(
            LevelCatalog::standard(),
            config,
            settings,
            Pcg32::seed_from_u64(seed),
        )
    }
}

impl<R: RandomSource> Session<R> {
    pub fn with_random(catalog: LevelCatalog, config: GameConfig, settings: Settings, rng: R) -> Self {
        let physics = Physics::new(config.scaled_by(settings.control_sensitivity));
        let state = create_initial_state(&catalog, 0, settings);
        Self {
            catalog,
            base_config: config,
            physics,
            rng,
            paused: false,
            state,
        }
    }

    pub fn state(&self) -> &GameStateData {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// Begin a fresh run at `level` (unknown index falls back to level 0)
    ///
    /// Allowed from the menu and from the end-of-attempt screens.
    pub fn start(&mut self, level: usize) -> bool {
        if !self.state.phase.can_transition_to(GamePhase::Playing) {
            log::warn!("Cannot start a run from {:?}", self.state.phase);
            return false;
        }
        let previous = self.state.phase;
        let settings = self.state.settings.clone();
        self.state = create_initial_state(&self.catalog, level, settings);
        self.state.phase = previous;
        self.paused = false;
        let started = self.state.transition(GamePhase::Playing);
        log::info!("Starting level {}", self.state.level_number());
        started
    }

    /// Replay the current level from scratch after a game over
    pub fn retry(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            log::warn!("Retry ignored in {:?}", self.state.phase);
            return false;
        }
        self.start(self.state.current_level)
    }

    /// Advance after a completed level
    ///
    /// Past the last level the session stays in `LevelComplete`, flags all
    /// levels cleared and raises `AllLevelsCleared`.
    pub fn next_level(&mut self) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::LevelComplete {
            log::warn!("Next level ignored in {:?}", self.state.phase);
            return Vec::new();
        }
        if self.state.next_level(&self.catalog) {
            log::info!("Starting level {}", self.state.level_number());
            Vec::new()
        } else {
            let score = self.state.player.score;
            log::info!("All levels cleared with score {}", score);
            vec![GameEvent::AllLevelsCleared { score }]
        }
    }

    /// Abandon the current attempt and go back to the menu
    pub fn return_to_menu(&mut self) -> bool {
        if !self.state.transition(GamePhase::Menu) {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn open_high_scores(&mut self) -> bool {
        self.state.transition(GamePhase::HighScores)
    }

    pub fn open_settings(&mut self) -> bool {
        self.state.transition(GamePhase::Settings)
    }

    /// Leave the high-score or settings screen
    pub fn close_overlay(&mut self) -> bool {
        match self.state.phase {
            GamePhase::HighScores | GamePhase::Settings => self.state.transition(GamePhase::Menu),
            phase => {
                log::warn!("No overlay to close in {:?}", phase);
                false
            }
        }
    }

    /// Suspend or resume ticking (only meaningful while playing)
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused && self.state.phase == GamePhase::Playing;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the settings and rebind physics to the new sensitivity
    pub fn update_settings(&mut self, settings: Settings) {
        self.physics = Physics::new(self.base_config.scaled_by(settings.control_sensitivity));
        self.state.settings = settings;
    }

    /// Advance the current attempt by `dt_ms`; a no-op while paused
    pub fn tick(&mut self, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }
        tick(&mut self.state, &self.physics, &mut self.rng, input, dt_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SequenceRandom;
    use glam::Vec2;

    const DT: f32 = 1000.0 / 60.0;

    fn session() -> Session {
        Session::new(GameConfig::default(), Settings::default(), 42)
    }

    fn quiet_session() -> Session<SequenceRandom> {
        Session::with_random(
            LevelCatalog::standard(),
            GameConfig::default(),
            Settings::default(),
            SequenceRandom::constant(0.9),
        )
    }

    /// Put the player on the goal ledge of the current level
    fn reach_goal(session: &mut Session<SequenceRandom>) -> Vec<GameEvent> {
        let goal = session.state.level.goal_position;
        session.state.player.body.position = Vec2::new(goal.x - 7.0, goal.y - 20.0);
        session.state.player.body.velocity = Vec2::ZERO;
        session.tick(&TickInput::default(), DT)
    }

    #[test]
    fn test_start_from_menu() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert!(s.start(1));
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().current_level, 1);
        assert_eq!(s.state().level.id, 2);
    }

    #[test]
    fn test_start_unknown_level_falls_back() {
        let mut s = session();
        assert!(s.start(99));
        assert_eq!(s.state().current_level, 0);
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut s = session();
        s.start(0);
        s.tick(&TickInput::default(), DT);
        let elapsed = s.state().elapsed_ms;
        assert!(!s.start(2));
        assert_eq!(s.state().current_level, 0);
        assert_eq!(s.state().elapsed_ms, elapsed);
    }

    #[test]
    fn test_menu_overlays() {
        let mut s = session();
        assert!(s.open_high_scores());
        assert_eq!(s.phase(), GamePhase::HighScores);
        assert!(!s.start(0), "cannot start from the high-score screen");
        assert!(!s.open_settings());
        assert!(s.close_overlay());
        assert_eq!(s.phase(), GamePhase::Menu);

        assert!(s.open_settings());
        assert!(s.close_overlay());
        assert!(!s.close_overlay());
    }

    #[test]
    fn test_pause_withholds_ticks() {
        let mut s = session();
        // Pausing outside gameplay is ignored
        s.set_paused(true);
        assert!(!s.is_paused());

        s.start(0);
        s.set_paused(true);
        assert!(s.is_paused());
        let before = s.state().clone();
        assert!(s.tick(&TickInput::default(), DT).is_empty());
        assert_eq!(s.state().elapsed_ms, before.elapsed_ms);
        assert_eq!(s.state().player, before.player);

        s.set_paused(false);
        s.tick(&TickInput::default(), DT);
        assert!(s.state().elapsed_ms > before.elapsed_ms);
    }

    #[test]
    fn test_level_progression_to_all_cleared() {
        let mut s = quiet_session();
        s.start(0);
        for level in 1..=3 {
            let events = reach_goal(&mut s);
            assert!(
                matches!(events.as_slice(), [GameEvent::LevelComplete { level: l, .. }] if *l == level),
                "level {level}: {events:?}"
            );
            assert_eq!(s.phase(), GamePhase::LevelComplete);
            let events = s.next_level();
            if level < 3 {
                assert!(events.is_empty());
                assert_eq!(s.phase(), GamePhase::Playing);
            } else {
                assert_eq!(events, vec![GameEvent::AllLevelsCleared { score: 3000 }]);
                assert_eq!(s.phase(), GamePhase::LevelComplete);
                assert!(s.state().all_levels_cleared);
            }
        }
        // Score carried across levels
        assert_eq!(s.state().player.score, 3000);
        assert!(s.return_to_menu());
    }

    #[test]
    fn test_next_level_only_after_completion() {
        let mut s = session();
        s.start(0);
        assert!(s.next_level().is_empty());
        assert_eq!(s.state().current_level, 0);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_retry_after_game_over() {
        let mut s = quiet_session();
        s.start(1);
        s.state.phase = GamePhase::GameOver;
        s.state.player.lives = 0;
        s.state.player.score = 500;
        assert!(s.retry());
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().current_level, 1);
        assert_eq!(s.state().player.lives, 3);
        assert_eq!(s.state().player.score, 0);
    }

    #[test]
    fn test_retry_ignored_while_playing() {
        let mut s = session();
        s.start(0);
        assert!(!s.retry());
    }

    #[test]
    fn test_update_settings_rescales_controls() {
        let mut s = session();
        assert_eq!(s.physics().config.player_speed, 5.0);
        s.update_settings(Settings {
            control_sensitivity: 2.0,
            ..Settings::default()
        });
        assert_eq!(s.physics().config.player_speed, 10.0);
        assert_eq!(s.physics().config.jump_force, -30.0);
        assert_eq!(s.state().settings.control_sensitivity, 2.0);
        // Settings survive a new run
        s.start(0);
        assert_eq!(s.state().settings.control_sensitivity, 2.0);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mut a = session();
        let mut b = session();
        a.start(2);
        b.start(2);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            assert_eq!(a.tick(&input, DT), b.tick(&input, DT));
        }
        assert_eq!(a.state().player, b.state().player);
        assert_eq!(a.state().barrels, b.state().barrels);
        assert_eq!(a.state().stats, b.state().stats);
    }
}
