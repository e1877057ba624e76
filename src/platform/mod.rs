//! Platform abstraction layer
//!
//! The simulation only talks to the outside world through these seams:
//! - `Sensor`: one bounded-latency gaze poll per frame
//! - `Controls`: gestures, menu results and quit requests
//! - `Renderer`: draws a read-only `FrameSnapshot`
//!
//! `run` is the frame-rate-limited outer loop tying them together.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use crate::sim::{FrameSnapshot, GameSession, TickInput, tick};

/// Source of raw pupil coordinates
pub trait Sensor {
    /// This frame's sample, or `None` when no pupil was found. Must return
    /// within the frame budget.
    fn poll_frame(&mut self) -> Option<Vec2>;

    /// Release the capture device
    fn release(&mut self) {}
}

/// Gesture/menu/window events for the coming frame
pub trait Controls {
    /// Fill in everything except the sensor sample
    fn poll(&mut self, last_frame: &FrameSnapshot, input: &mut TickInput);
}

pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);

    /// Close any auxiliary windows
    fn close(&mut self) {}
}

/// Replays a fixed list of samples, then reports no signal
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    samples: VecDeque<Option<Vec2>>,
    released: bool,
}

impl ScriptedSensor {
    pub fn new(samples: impl IntoIterator<Item = Option<Vec2>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            released: false,
        }
    }

    /// A gaze sweeping an ellipse of radius `radius` around `center`
    pub fn sweep(center: Vec2, radius: Vec2, frames: usize) -> Self {
        Self::new((0..frames).map(|i| {
            let t = i as f32 * 0.15;
            // Every eighth frame the detector loses the pupil
            (i % 8 != 7).then(|| center + Vec2::new(t.cos(), t.sin()) * radius)
        }))
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Sensor for ScriptedSensor {
    fn poll_frame(&mut self) -> Option<Vec2> {
        if self.released {
            return None;
        }
        self.samples.pop_front().flatten()
    }

    fn release(&mut self) {
        self.released = true;
        self.samples.clear();
        log::info!("Sensor released");
    }
}

/// Controls that never produce events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoControls;

impl Controls for NoControls {
    fn poll(&mut self, _last_frame: &FrameSnapshot, _input: &mut TickInput) {}
}

/// Renderer that logs a one-line summary per frame
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    pub frames_drawn: u64,
    pub closed: bool,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames_drawn += 1;
        log::trace!(
            "frame {} aim {:?} q{} ships {} bullets {}{}",
            frame.frame,
            frame.aim_point,
            frame.aim.quadrant.number(),
            frame.actors.len(),
            frame.bullets.len(),
            if frame.paused { " [paused]" } else { "" }
        );
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Drive frames until the run flag clears or `max_frames` have run, then
/// shut the collaborators down. Returns the number of frames simulated.
pub fn run<S, C, R>(
    session: &mut GameSession,
    sensor: &mut S,
    controls: &mut C,
    renderer: &mut R,
    max_frames: Option<u64>,
) -> u64
where
    S: Sensor,
    C: Controls,
    R: Renderer,
{
    let delay = Duration::from_millis(session.config().frame_delay_ms);
    let mut last_frame = FrameSnapshot::capture(session);
    let mut frames = 0;

    while session.is_running() && max_frames.is_none_or(|max| frames < max) {
        let mut input = TickInput::with_sample(sensor.poll_frame());
        controls.poll(&last_frame, &mut input);
        tick(session, &input);
        if !session.is_running() {
            break;
        }
        frames += 1;

        last_frame = FrameSnapshot::capture(session);
        renderer.draw(&last_frame);

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    log::info!("Exiting after {frames} frames");
    sensor.release();
    renderer.close();
    frames
}
