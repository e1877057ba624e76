//! Moving screen entities
//!
//! Ships live in the population as tagged `ActorKind` variants; bullets are
//! owned by the player ship. Every mover shares a `Body` carrying position,
//! the off-screen flag and the pause flag, and each variant supplies its own
//! update policy.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aim::{AimVector, Quadrant};
use crate::config::{BoundsPolicy, GameConfig};
use crate::consts::HOSTILE_MAX_DRIFT;

/// Stable identity of a population member
pub type ActorId = u32;

/// RGB color handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-frame motion parameters shared by every actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Window size
    pub bounds: Vec2,
    pub policy: BoundsPolicy,
    pub bullet_speed: i32,
    pub hostile_speed: f32,
    pub ally_speed: f32,
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            bounds: config.bounds(),
            policy: config.bounds_policy,
            bullet_speed: config.base_bullet_speed,
            hostile_speed: config.hostile_speed,
            ally_speed: config.ally_speed,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds / 2.0
    }

    #[inline]
    pub fn is_outside(&self, pos: Vec2) -> bool {
        self.policy.is_outside(pos, self.bounds)
    }
}

/// State common to every mover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub out_of_range: bool,
    pub paused: bool,
}

impl Body {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            out_of_range: false,
            paused: false,
        }
    }

    /// Move by `delta` and refresh the off-screen flag
    fn advance(&mut self, delta: Vec2, arena: &Arena) {
        self.pos += delta;
        self.out_of_range = arena.is_outside(self.pos);
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    /// Signed pixels per frame, fixed at spawn
    pub velocity: IVec2,
    pub quadrant_at_spawn: Quadrant,
    pub color: Color,
}

impl Bullet {
    pub fn new(origin: Vec2, aim: &AimVector, speed: i32, color: Color) -> Self {
        Self {
            body: Body::at(origin),
            velocity: aim.integer_velocity(speed),
            quadrant_at_spawn: aim.quadrant,
            color,
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        if self.body.paused {
            return;
        }
        self.body.advance(self.velocity.as_vec2(), arena);
    }
}

/// The turret at screen center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShip {
    pub body: Body,
    /// Degrees, counterclockwise from +x
    pub facing_angle: f32,
    pub bullet_color: Color,
    /// In-flight bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Unpaused frames of shield remaining
    pub shield_frames: u32,
}

impl PlayerShip {
    pub fn new(center: Vec2) -> Self {
        Self {
            body: Body::at(center),
            facing_angle: 0.0,
            bullet_color: Color::RED,
            bullets: Vec::new(),
            shield_frames: 0,
        }
    }

    /// Face the aim, fire one bullet, then move and cull the bullets in flight.
    ///
    /// Without an aim the ship holds its facing and does not fire.
    pub fn update(&mut self, aim: Option<&AimVector>, arena: &Arena) {
        if self.body.paused {
            return;
        }

        if let Some(aim) = aim {
            self.facing_angle = aim.angle_deg;
            self.bullets.push(Bullet::new(
                self.body.pos,
                aim,
                arena.bullet_speed,
                self.bullet_color,
            ));
        }

        for bullet in &mut self.bullets {
            bullet.update(arena);
        }
        self.bullets.retain(|b| !b.body.out_of_range);

        self.shield_frames = self.shield_frames.saturating_sub(1);
    }

    /// Color for bullets fired from now on; bullets in flight keep theirs
    pub fn change_bullet_color(&mut self, color: Color) {
        self.bullet_color = color;
    }

    pub fn add_shield(&mut self, frames: u32) {
        self.shield_frames = self.shield_frames.max(frames);
    }

    pub fn shield_active(&self) -> bool {
        self.shield_frames > 0
    }

    fn set_paused(&mut self, paused: bool) {
        self.body.paused = paused;
        for bullet in &mut self.bullets {
            bullet.body.paused = paused;
        }
    }
}

/// An enemy drifting down from the top edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileShip {
    pub body: Body,
    pub velocity: Vec2,
}

impl HostileShip {
    /// Random column along the top edge with a small sideways drift
    pub fn spawn<R: Rng>(rng: &mut R, arena: &Arena) -> Self {
        let x = rng.random_range(0.0..=arena.bounds.x);
        let drift = rng.random_range(-HOSTILE_MAX_DRIFT..=HOSTILE_MAX_DRIFT);
        Self {
            body: Body::at(Vec2::new(x, 0.0)),
            velocity: Vec2::new(drift, arena.hostile_speed),
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        if self.body.paused {
            return;
        }
        self.body.advance(self.velocity, arena);
    }
}

/// Kind of support ship a player can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AllyClass {
    #[default]
    Fighter,
    Bomber,
    Scout,
}

impl AllyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllyClass::Fighter => "Fighter",
            AllyClass::Bomber => "Bomber",
            AllyClass::Scout => "Scout",
        }
    }

    /// Multiplier on the configured ally speed
    pub fn speed_factor(&self) -> f32 {
        match self {
            AllyClass::Fighter => 1.0,
            AllyClass::Bomber => 0.6,
            AllyClass::Scout => 1.6,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AllyClass::Fighter => Color::GREEN,
            AllyClass::Bomber => Color::BLUE,
            AllyClass::Scout => Color::YELLOW,
        }
    }
}

/// One entry of a fulfilled support request
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllySpec {
    pub class: AllyClass,
    /// Screen y of the flight lane; random when unset
    pub lane: Option<f32>,
}

/// A friendly ship sweeping left to right across a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllyShip {
    pub body: Body,
    pub class: AllyClass,
    pub velocity: Vec2,
}

impl AllyShip {
    pub fn spawn<R: Rng>(spec: &AllySpec, rng: &mut R, arena: &Arena) -> Self {
        let lane = match spec.lane {
            Some(y) => y.clamp(0.0, arena.bounds.y),
            None => rng.random_range(0.0..=arena.bounds.y),
        };
        Self {
            body: Body::at(Vec2::new(0.0, lane)),
            class: spec.class,
            velocity: Vec2::new(arena.ally_speed * spec.class.speed_factor(), 0.0),
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        if self.body.paused {
            return;
        }
        self.body.advance(self.velocity, arena);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Player(PlayerShip),
    Hostile(HostileShip),
    Ally(AllyShip),
}

/// A population member: identity plus variant state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind) -> Self {
        Self { id, kind }
    }

    /// Advance one frame. Only the player consumes the aim.
    pub fn update(&mut self, aim: Option<&AimVector>, arena: &Arena) {
        match &mut self.kind {
            ActorKind::Player(ship) => ship.update(aim, arena),
            ActorKind::Hostile(ship) => ship.update(arena),
            ActorKind::Ally(ship) => ship.update(arena),
        }
    }

    pub fn body(&self) -> &Body {
        match &self.kind {
            ActorKind::Player(ship) => &ship.body,
            ActorKind::Hostile(ship) => &ship.body,
            ActorKind::Ally(ship) => &ship.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match &mut self.kind {
            ActorKind::Player(ship) => &mut ship.body,
            ActorKind::Hostile(ship) => &mut ship.body,
            ActorKind::Ally(ship) => &mut ship.body,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body().pos
    }

    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        self.body().out_of_range
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.body().paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        match &mut self.kind {
            ActorKind::Player(ship) => ship.set_paused(paused),
            ActorKind::Hostile(ship) => ship.body.paused = paused,
            ActorKind::Ally(ship) => ship.body.paused = paused,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player(_))
    }
}
