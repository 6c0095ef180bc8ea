//! Per-frame update orchestration
//!
//! One `tick` per frame: paddle, targets, projectiles, collision passes,
//! win check - in that order. Gameplay only advances while Playing; after a
//! round ends, only the restart-wait timer runs until the world resets.

use super::collision::resolve_collisions;
use super::state::{GamePhase, InputSet, World};

/// Advance the world by one frame of `dt` seconds.
pub fn tick(world: &mut World, input: &InputSet, dt: f32) {
    if world.phase != GamePhase::Playing {
        world.restart_timer += dt;
        if world.restart_timer >= world.tuning.restart_wait {
            log::info!("restarting after {:?}", world.phase);
            world.restart();
        }
        return;
    }

    world.paddle.update(input, &world.tuning, dt);
    let paddle_vel = world.paddle.vel;
    world.targets.update(paddle_vel, dt);
    world
        .projectiles
        .update(&world.paddle, input, &world.tuning, dt);

    resolve_collisions(world);

    if world.phase == GamePhase::Playing && world.targets.is_empty() {
        log::info!("all targets destroyed");
        world.phase = GamePhase::Win;
        world.restart_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Action, Projectile, Target};
    use glam::Vec2;

    fn plain_target(pos: Vec2, scale: f32) -> Target {
        Target {
            pos,
            vel: Vec2::ZERO,
            scale,
            color: [1.0; 4],
            profile: vec![1.0; TARGET_SIDES],
            hit: false,
        }
    }

    /// Park the single starting target far from everything.
    fn quiet_world(seed: u64) -> World {
        let mut world = World::new(seed);
        world.targets.targets.clear();
        world
            .targets
            .targets
            .push(plain_target(Vec2::new(0.0, 0.9), TARGET_SCALE));
        world.targets.targets[0].vel = Vec2::ZERO;
        world
    }

    #[test]
    fn test_paddle_bound_holds_under_large_dt() {
        let mut world = quiet_world(1);
        let mut input = InputSet::default();
        input.press(Action::Right);

        tick(&mut world, &input, 50.0);
        assert!(world.paddle.pos.x <= PADDLE_X_BOUND);
    }

    #[test]
    fn test_win_within_same_frame() {
        let mut world = World::new(2);
        world.targets.targets.clear();

        tick(&mut world, &InputSet::default(), SIM_DT);
        assert_eq!(world.phase, GamePhase::Win);
    }

    #[test]
    fn test_loss_within_same_frame() {
        let mut world = quiet_world(3);
        world.targets.targets[0].pos = world.paddle.pos;

        tick(&mut world, &InputSet::default(), SIM_DT);
        assert_eq!(world.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_after_wait() {
        let mut world = quiet_world(4);
        world.targets.targets[0].pos = world.paddle.pos;
        let input = InputSet::default();

        tick(&mut world, &input, SIM_DT);
        assert_eq!(world.phase, GamePhase::GameOver);

        // Leave a stale projectile around to prove the reset clears it
        world.projectiles.projectiles.push(Projectile {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            dead: false,
        });

        // Short of the wait: still waiting
        let almost_wait = world.tuning.restart_wait - 0.1;
        tick(&mut world, &input, almost_wait);
        assert_eq!(world.phase, GamePhase::GameOver);

        tick(&mut world, &input, 0.1);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.targets.len(), world.tuning.initial_targets);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.paddle.pos, Vec2::new(0.0, PADDLE_Y));
    }

    #[test]
    fn test_no_gameplay_while_waiting() {
        let mut world = quiet_world(5);
        world.phase = GamePhase::Win;
        let before = world.targets.targets[0].pos;

        let mut input = InputSet::default();
        input.press(Action::Left);
        input.press(Action::Fire);
        tick(&mut world, &input, 1.0);

        assert_eq!(world.targets.targets[0].pos, before);
        assert_eq!(world.paddle.pos.x, 0.0);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_destroys_lone_target_then_win() {
        let mut world = quiet_world(6);
        // Sub-threshold target directly in the line of fire
        world.targets.targets[0] = plain_target(Vec2::new(0.0, 0.5), 0.05);

        let mut input = InputSet::default();
        input.press(Action::Fire);
        tick(&mut world, &input, SIM_DT);
        input.release(Action::Fire);

        let mut frames = 0;
        while world.phase == GamePhase::Playing && frames < 600 {
            tick(&mut world, &input, SIM_DT);
            frames += 1;
        }
        assert_eq!(world.phase, GamePhase::Win);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999);
        let mut b = World::new(99999);

        let mut input = InputSet::default();
        for frame in 0..600 {
            input.clear();
            if frame % 3 == 0 {
                input.press(Action::Right);
            }
            if frame % 40 < 2 {
                input.press(Action::Fire);
            }
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.paddle.pos, b.paddle.pos);
        assert_eq!(a.targets.len(), b.targets.len());
        for (ta, tb) in a.targets.targets.iter().zip(&b.targets.targets) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.vel, tb.vel);
        }
    }
}
