//! Session state and core simulation types
//!
//! One `GameSession` owns everything that changes frame to frame: the
//! calibration tracker, the last aim, the actor population and whichever
//! menu screen is open. It is passed explicitly into every `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{AllySpec, Arena, Color};
use super::aim::AimVector;
use super::calibration::CalibrationTracker;
use super::population::Population;
use crate::config::GameConfig;
use crate::error::GameError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actors moving, player firing
    Playing,
    /// Frozen while a menu screen is open
    Paused,
    /// Run flag cleared; the outer loop shuts down
    Exited,
}

/// Symbolic result of a recognized touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureOutcome {
    RequestSupport,
    OpenSettings,
    ActivateShield,
}

/// Menu screen shown over the paused game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltScreen {
    Support,
    Settings { current_color: Color },
}

/// What the menu collaborator hands back when a screen closes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AltScreenResult {
    Support(Vec<AllySpec>),
    Settings { bullet_color: Color },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    arena: Arena,
    pub calibration: CalibrationTracker,
    /// Last on-screen aim; the screen center until calibrated
    aim_point: Vec2,
    aim: AimVector,
    pub population: Population,
    pub phase: GamePhase,
    alt_screen: Option<AltScreen>,
    /// Applied at the start of the next tick
    pending_result: Option<AltScreenResult>,
    /// Frames simulated so far
    pub frame: u64,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let arena = Arena::from_config(&config);
        let population = Population::new(&config, &arena);
        let aim_point = arena.center();
        Ok(Self {
            config,
            arena,
            calibration: CalibrationTracker::new(),
            aim_point,
            aim: AimVector::resolve(aim_point, arena.center()),
            population,
            phase: GamePhase::Playing,
            alt_screen: None,
            pending_result: None,
            frame: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn aim_point(&self) -> Vec2 {
        self.aim_point
    }

    pub fn aim(&self) -> &AimVector {
        &self.aim
    }

    pub fn alt_screen(&self) -> Option<&AltScreen> {
        self.alt_screen.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::Exited
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Clear the run flag; checked once per frame by the outer loop
    pub fn request_exit(&mut self) {
        if self.phase != GamePhase::Exited {
            log::info!("Exit requested after {} frames", self.frame);
            self.phase = GamePhase::Exited;
        }
    }

    /// Feed this frame's raw sample through calibration and re-resolve the
    /// aim. Absent or pre-calibration frames keep the previous aim point.
    pub fn update_aim(&mut self, sample: Option<Vec2>) {
        // The sample that completes calibration is already scaled
        self.calibration.observe(sample);
        if let Some(raw) = sample {
            if let Some(point) = self.calibration.scaled_point(raw, self.arena.bounds) {
                self.aim_point = point;
            }
        }
        self.aim = AimVector::resolve(self.aim_point, self.arena.center());
    }

    // === Pause / resume ===

    pub fn pause_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!("Game paused");
        self.phase = GamePhase::Paused;
        self.population.pause();
    }

    pub fn resume_game(&mut self) {
        if self.phase != GamePhase::Paused {
            return;
        }
        log::info!("Game resumed");
        self.phase = GamePhase::Playing;
        self.population.resume();
    }

    // === Gestures and menu screens ===

    /// React to a recognized gesture. Ignored unless playing.
    pub fn apply_gesture(&mut self, gesture: GestureOutcome) {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignoring {gesture:?} while {:?}", self.phase);
            return;
        }
        log::info!("Gesture: {gesture:?}");
        match gesture {
            GestureOutcome::RequestSupport => {
                self.pause_game();
                self.alt_screen = Some(AltScreen::Support);
            }
            GestureOutcome::OpenSettings => {
                self.pause_game();
                self.alt_screen = Some(AltScreen::Settings {
                    current_color: self.population.player().bullet_color,
                });
            }
            GestureOutcome::ActivateShield => {
                let frames = self.config.shield_frames;
                self.population.player_mut().add_shield(frames);
            }
        }
    }

    /// Stash a menu result; it takes effect at the next tick boundary
    pub fn submit_alt_screen(&mut self, result: AltScreenResult) {
        if self.pending_result.replace(result).is_some() {
            log::warn!("Replaced an unapplied menu result");
        }
    }

    /// Apply the stashed menu result, close the screen and resume.
    ///
    /// A result that does not match the open screen is dropped.
    pub fn apply_pending(&mut self) {
        let Some(result) = self.pending_result.take() else {
            return;
        };

        match (self.alt_screen, result) {
            (Some(AltScreen::Support), AltScreenResult::Support(allies)) => {
                for spec in &allies {
                    self.population.add_ally(spec, &self.arena);
                }
                log::info!("Support arrived: {} allies", allies.len());
            }
            (Some(AltScreen::Settings { .. }), AltScreenResult::Settings { bullet_color }) => {
                self.population.change_bullet_color(bullet_color);
            }
            (screen, result) => {
                log::warn!("Dropping menu result {result:?} for screen {screen:?}");
                return;
            }
        }

        self.alt_screen = None;
        self.resume_game();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::AllyClass;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = session();
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(!session.calibration.is_calibrated());
        assert_eq!(session.aim_point(), session.arena().center());
        assert_eq!(*session.aim(), AimVector::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            min_ships: 0,
            ..GameConfig::default()
        };
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn test_absent_sample_keeps_last_aim() {
        let mut session = session();
        for raw in [Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0), Vec2::new(75.0, 25.0)] {
            session.update_aim(Some(raw));
        }
        let aimed = session.aim_point();
        assert_eq!(aimed, Vec2::new(600.0, 150.0));
        session.update_aim(None);
        assert_eq!(session.aim_point(), aimed);
        assert_eq!(session.aim().quadrant.number(), 1);
    }

    #[test]
    fn test_calibrating_sample_moves_aim() {
        let mut session = session();
        session.update_aim(Some(Vec2::new(0.0, 0.0)));
        assert_eq!(session.aim_point(), session.arena().center());
        session.update_aim(Some(Vec2::new(100.0, 100.0)));
        assert!(session.calibration.is_calibrated());
        assert_eq!(session.aim_point(), Vec2::new(800.0, 600.0));
        assert_eq!(session.aim().quadrant.number(), 4);
    }

    #[test]
    fn test_support_flow() {
        let mut session = session();
        let before = session.population.non_player_count();

        session.apply_gesture(GestureOutcome::RequestSupport);
        assert!(session.is_paused());
        assert_eq!(session.alt_screen(), Some(&AltScreen::Support));

        session.submit_alt_screen(AltScreenResult::Support(vec![
            AllySpec::default(),
            AllySpec {
                class: AllyClass::Scout,
                lane: Some(10.0),
            },
        ]));
        // Nothing changes until the tick boundary
        assert_eq!(session.population.non_player_count(), before);

        session.apply_pending();
        assert_eq!(session.population.non_player_count(), before + 2);
        assert!(!session.is_paused());
        assert_eq!(session.alt_screen(), None);
        assert!(session.population.iter().all(|a| !a.is_paused()));
    }

    #[test]
    fn test_settings_flow() {
        let mut session = session();
        session.apply_gesture(GestureOutcome::OpenSettings);
        assert_eq!(
            session.alt_screen(),
            Some(&AltScreen::Settings {
                current_color: Color::RED
            })
        );
        session.submit_alt_screen(AltScreenResult::Settings {
            bullet_color: Color::YELLOW,
        });
        session.apply_pending();
        assert_eq!(session.population.player().bullet_color, Color::YELLOW);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_mismatched_result_is_dropped() {
        let mut session = session();
        session.apply_gesture(GestureOutcome::OpenSettings);
        let before = session.population.non_player_count();
        session.submit_alt_screen(AltScreenResult::Support(vec![AllySpec::default()]));
        session.apply_pending();
        assert_eq!(session.population.non_player_count(), before);
        // Screen stays open and the game stays paused
        assert!(session.is_paused());
        assert!(session.alt_screen().is_some());
    }

    #[test]
    fn test_gestures_ignored_while_paused() {
        let mut session = session();
        session.apply_gesture(GestureOutcome::RequestSupport);
        session.apply_gesture(GestureOutcome::OpenSettings);
        assert_eq!(session.alt_screen(), Some(&AltScreen::Support));
        session.apply_gesture(GestureOutcome::ActivateShield);
        assert!(!session.population.player().shield_active());
    }

    #[test]
    fn test_shield_gesture() {
        let mut session = session();
        session.apply_gesture(GestureOutcome::ActivateShield);
        assert!(session.population.player().shield_active());
        assert!(!session.is_paused());
    }

    #[test]
    fn test_exit() {
        let mut session = session();
        session.request_exit();
        assert!(!session.is_running());
        session.apply_gesture(GestureOutcome::RequestSupport);
        assert_eq!(session.alt_screen(), None);
    }
}
