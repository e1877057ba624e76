//! Spaceship Battle entry point
//!
//! Native headless runner: drives the simulation with a simulated gaze sweep
//! and a logging renderer. Camera capture and on-screen drawing plug in
//! through the `platform` traits.
//!
//! Usage: `spaceship-battle [config.json|-] [frames] [upper-only|symmetric]`

use glam::Vec2;

use spaceship_battle::{BoundsPolicy, GameConfig};
use spaceship_battle::platform::{self, LogRenderer, NoControls, ScriptedSensor};
use spaceship_battle::sim::GameSession;

const DEFAULT_FRAMES: u64 = 300;

fn main() {
    env_logger::init();
    log::info!("Spaceship Battle (native) starting...");

    let mut args = std::env::args().skip(1);
    let mut config = match args.next().filter(|path| path != "-") {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);
    if let Some(arg) = args.next() {
        match BoundsPolicy::from_str(&arg) {
            Some(policy) => config.bounds_policy = policy,
            None => log::warn!(
                "Unknown bounds policy '{arg}', keeping {}",
                config.bounds_policy.as_str()
            ),
        }
    }
    log::info!("Bounds policy: {}", config.bounds_policy.as_str());

    let mut session = match GameSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    // Pupil coordinates roughly as a webcam detector reports them
    let mut sensor =
        ScriptedSensor::sweep(Vec2::new(320.0, 240.0), Vec2::new(25.0, 12.0), frames as usize);
    let mut renderer = LogRenderer::default();

    let ran = platform::run(&mut session, &mut sensor, &mut NoControls, &mut renderer, Some(frames));

    let player = session.population.player();
    log::info!(
        "Done: {ran} frames, calibrated: {}, ships: {} (floor {}), bullets in flight: {}",
        session.calibration.is_calibrated(),
        session.population.non_player_count(),
        session.population.floor(),
        player.bullets.len()
    );
}
