//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order, compacted after each pass)
//! - No rendering or platform dependencies

pub mod actor;
pub mod aim;
pub mod calibration;
pub mod population;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::{
    Actor, ActorId, ActorKind, AllyClass, AllyShip, AllySpec, Arena, Body, Bullet, Color,
    HostileShip, PlayerShip,
};
pub use aim::{AimVector, Quadrant};
pub use calibration::{CalibrationTracker, RawSample};
pub use population::{Population, TickReport};
pub use snapshot::{ActorClass, ActorView, BulletView, FrameSnapshot};
pub use state::{AltScreen, AltScreenResult, GamePhase, GameSession, GestureOutcome};
pub use tick::{TickInput, tick};
