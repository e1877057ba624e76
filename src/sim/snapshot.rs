//! Read-only frame views for the render collaborator

use glam::Vec2;
use serde::Serialize;

use super::actor::{ActorId, ActorKind, Color};
use super::aim::AimVector;
use super::state::{AltScreen, GameSession};
use crate::normalize_degrees;

const PLAYER_COLOR: Color = Color::WHITE;
const HOSTILE_COLOR: Color = Color::rgb(220, 40, 200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorClass {
    Player,
    Hostile,
    Ally,
}

/// One ship as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub id: ActorId,
    pub class: ActorClass,
    pub position: Vec2,
    /// Degrees counterclockwise from +x
    pub facing_angle: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    /// Top-left corner of the bullet square
    pub position: Vec2,
    pub width: f32,
    pub color: Color,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub paused: bool,
    pub calibrated: bool,
    pub aim_point: Vec2,
    pub aim: AimVector,
    pub shield_active: bool,
    pub actors: Vec<ActorView>,
    pub bullets: Vec<BulletView>,
    pub alt_screen: Option<AltScreen>,
}

/// Screen-space velocity to a facing angle (y flipped)
fn heading_deg(velocity: Vec2) -> f32 {
    normalize_degrees((-velocity.y).atan2(velocity.x).to_degrees())
}

impl FrameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let actors = session
            .population
            .iter()
            .map(|actor| {
                let (class, facing_angle, color) = match &actor.kind {
                    ActorKind::Player(ship) => (ActorClass::Player, ship.facing_angle, PLAYER_COLOR),
                    ActorKind::Hostile(ship) => {
                        (ActorClass::Hostile, heading_deg(ship.velocity), HOSTILE_COLOR)
                    }
                    ActorKind::Ally(ship) => {
                        (ActorClass::Ally, heading_deg(ship.velocity), ship.class.color())
                    }
                };
                ActorView {
                    id: actor.id,
                    class,
                    position: actor.position(),
                    facing_angle,
                    color,
                }
            })
            .collect();

        let player = session.population.player();
        let width = session.config().bullet_width;
        let bullets = player
            .bullets
            .iter()
            .map(|bullet| BulletView {
                position: bullet.body.pos,
                width,
                color: bullet.color,
            })
            .collect();

        Self {
            frame: session.frame,
            paused: session.is_paused(),
            calibrated: session.calibration.is_calibrated(),
            aim_point: session.aim_point(),
            aim: *session.aim(),
            shield_active: player.shield_active(),
            actors,
            bullets,
            alt_screen: session.alt_screen().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        tick(&mut session, &TickInput::default());
        tick(&mut session, &TickInput::default());

        let snapshot = FrameSnapshot::capture(&session);
        assert_eq!(snapshot.frame, 2);
        assert!(!snapshot.calibrated);
        assert_eq!(snapshot.actors.len(), session.population.iter().count());
        assert_eq!(snapshot.actors[0].class, ActorClass::Player);
        assert_eq!(snapshot.bullets.len(), 2);
        assert!(snapshot.bullets.iter().all(|b| b.width == 5.0 && b.color == Color::RED));
        assert!(
            snapshot.actors[1..]
                .iter()
                .all(|a| a.class == ActorClass::Hostile && a.color == HOSTILE_COLOR)
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        let json = serde_json::to_string(&FrameSnapshot::capture(&session)).unwrap();
        assert!(json.contains("\"actors\""));
    }

    #[test]
    fn test_heading() {
        assert!((heading_deg(Vec2::new(0.0, 4.0)) - 270.0).abs() < 1e-4);
        assert!((heading_deg(Vec2::new(6.0, 0.0)) - 0.0).abs() < 1e-4);
    }
}
