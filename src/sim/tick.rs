//! Frame-stepped simulation tick
//!
//! One call advances the session by exactly one frame:
//! menu result → gesture → sensor/calibration → aim → population.

use glam::Vec2;

use super::population::TickReport;
use super::state::{AltScreenResult, GamePhase, GameSession, GestureOutcome};

/// Everything the collaborators delivered for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw pupil coordinate, `None` when the sensor saw nothing
    pub sample: Option<Vec2>,
    /// Gesture recognized since the last frame
    pub gesture: Option<GestureOutcome>,
    /// Menu screen closed with this result since the last frame
    pub alt_screen: Option<AltScreenResult>,
    /// Window closed / escape pressed
    pub quit: bool,
}

impl TickInput {
    pub fn with_sample(sample: Option<Vec2>) -> Self {
        Self {
            sample,
            ..Default::default()
        }
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) -> TickReport {
    if input.quit {
        session.request_exit();
    }
    if session.phase == GamePhase::Exited {
        return TickReport::default();
    }

    // Menu results only ever land on a tick boundary
    if let Some(result) = &input.alt_screen {
        session.submit_alt_screen(result.clone());
    }
    session.apply_pending();

    if let Some(gesture) = input.gesture {
        session.apply_gesture(gesture);
    }

    // Calibration keeps learning while paused
    session.update_aim(input.sample);

    let aim = *session.aim();
    let arena = *session.arena();
    let report = session.population.tick(Some(&aim), &arena);
    if report.removed > 0 || report.spawned > 0 {
        log::debug!(
            "Frame {}: removed {}, spawned {}",
            session.frame,
            report.removed,
            report.spawned
        );
    }

    session.frame += 1;
    report
}
