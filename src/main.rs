//! Paredão entry point
//!
//! Runs a headless scripted round: window/event-loop integration lives
//! with the host, so the binary exercises the simulation end to end and
//! logs what happens.

use std::path::Path;

use paredao::consts::SIM_DT;
use paredao::sim::{Action, GamePhase, InputSet, World, tick};
use paredao::tuning::Tuning;
use paredao::ui::overlay_message;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    let tuning = Tuning::load(Path::new("tuning.json"));

    log::info!("paredao (headless demo) starting with seed {seed}");
    let mut world = World::with_tuning(seed, tuning);
    let mut input = InputSet::default();

    // 30 seconds of scripted play: sweep the paddle back and forth and
    // fire in short bursts.
    let frames = (30.0 / SIM_DT) as u32;
    for frame in 0..frames {
        input.clear();
        if (frame / 120) % 2 == 0 {
            input.press(Action::Right);
        } else {
            input.press(Action::Left);
        }
        if frame % 20 < 2 {
            input.press(Action::Fire);
        }

        let before = world.phase;
        tick(&mut world, &input, SIM_DT);
        if world.phase != before {
            let t = frame as f32 * SIM_DT;
            match overlay_message(world.phase) {
                Some(message) => log::info!("[{t:6.2}s] {message}"),
                None => log::info!("[{t:6.2}s] new round"),
            }
        }
    }

    println!(
        "demo finished: phase {:?}, {} targets, {} projectiles in flight",
        world.phase,
        world.targets.len(),
        world.projectiles.len()
    );
}
