//! Collision detection for the toroidal play area
//!
//! Distance checks against all nine 3x3 tiling offsets make hits register
//! seamlessly across the wrap seam, mirroring how targets are rendered.

use glam::Vec2;

use super::state::{GamePhase, Paddle, ProjectileSet, TargetSet, World};
use crate::consts::*;

/// The 3x3 set of positional duplicates of every target: the target itself
/// plus its eight wrap-around ghosts, offset by one play area in each
/// direction.
pub const TILING_OFFSETS: [Vec2; 9] = [
    Vec2::new(-2.0, -2.0),
    Vec2::new(-2.0, 0.0),
    Vec2::new(-2.0, 2.0),
    Vec2::new(0.0, -2.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 2.0),
    Vec2::new(2.0, -2.0),
    Vec2::new(2.0, 0.0),
    Vec2::new(2.0, 2.0),
];

/// Paddle-target pass: true once the first target within contact distance
/// is found; remaining targets are not evaluated that frame.
pub fn paddle_hits_target(paddle: &Paddle, targets: &TargetSet) -> bool {
    targets.targets.iter().any(|t| {
        paddle.pos.distance(t.pos)
            < paddle.scale * PADDLE_RADIUS_FACTOR + t.scale * TARGET_RADIUS_FACTOR
    })
}

/// Projectile-target pass: flag targets hit and projectiles dead.
///
/// Every live projectile is checked against every target at all nine tiling
/// offsets. A projectile marked dead mid-pass keeps scanning the remaining
/// targets, so one shot may flag several overlapping targets in a frame;
/// the dead flag is only acted on by the next projectile update.
fn mark_projectile_hits(projectiles: &mut ProjectileSet, targets: &mut TargetSet) {
    for projectile in &mut projectiles.projectiles {
        if projectile.dead {
            continue;
        }
        for target in &mut targets.targets {
            for offset in TILING_OFFSETS {
                let distance = projectile.pos.distance(target.pos + offset);
                if distance < PROJECTILE_RADIUS + target.scale * TARGET_RADIUS_FACTOR {
                    target.hit = true;
                    projectile.dead = true;
                }
            }
        }
    }
}

/// Run both collision passes, then the split/sweep, for one frame.
///
/// Splitting and removal only run after all pairwise checks complete.
pub fn resolve_collisions(world: &mut World) {
    if paddle_hits_target(&world.paddle, &world.targets) {
        log::info!("target reached the paddle");
        world.phase = GamePhase::GameOver;
        world.restart_timer = 0.0;
    }

    mark_projectile_hits(&mut world.projectiles, &mut world.targets);
    world.targets.split_and_sweep(&world.tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Projectile, Target};

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

    #[test]
    fn test_paddle_contact_threshold() {
        let paddle = Paddle::default();
        let contact = paddle.scale * PADDLE_RADIUS_FACTOR + TARGET_SCALE * TARGET_RADIUS_FACTOR;

        let mut targets = TargetSet::new(0);
        targets
            .targets
            .push(plain_target(paddle.pos + Vec2::new(contact + 0.001, 0.0), TARGET_SCALE));
        assert!(!paddle_hits_target(&paddle, &targets));

        targets.targets[0].pos = paddle.pos + Vec2::new(contact - 0.001, 0.0);
        assert!(paddle_hits_target(&paddle, &targets));
    }

    #[test]
    fn test_projectile_flags_target_and_dies() {
        let mut targets = TargetSet::new(0);
        targets.targets.push(plain_target(Vec2::new(0.2, 0.3), TARGET_SCALE));

        let mut shots = ProjectileSet::default();
        shots.projectiles.push(Projectile {
            pos: Vec2::new(0.2, 0.3),
            vel: Vec2::ZERO,
            dead: false,
        });

        mark_projectile_hits(&mut shots, &mut targets);
        assert!(targets.targets[0].hit);
        assert!(shots.projectiles[0].dead);
    }

    #[test]
    fn test_hit_detected_across_wrap_seam() {
        // Target hugging the left edge; its ghost sits just past the right
        // edge at the +2 tiling offset
        let mut targets = TargetSet::new(0);
        targets.targets.push(plain_target(Vec2::new(-0.98, 0.0), TARGET_SCALE));

        let mut shots = ProjectileSet::default();
        shots.projectiles.push(Projectile {
            pos: Vec2::new(0.99, 0.0),
            vel: Vec2::ZERO,
            dead: false,
        });

        mark_projectile_hits(&mut shots, &mut targets);
        assert!(targets.targets[0].hit);
    }

    #[test]
    fn test_one_projectile_flags_overlapping_targets() {
        let mut targets = TargetSet::new(0);
        targets.targets.push(plain_target(Vec2::new(0.5, 0.5), TARGET_SCALE));
        targets.targets.push(plain_target(Vec2::new(0.52, 0.5), TARGET_SCALE));

        let mut shots = ProjectileSet::default();
        shots.projectiles.push(Projectile {
            pos: Vec2::new(0.51, 0.5),
            vel: Vec2::ZERO,
            dead: false,
        });

        mark_projectile_hits(&mut shots, &mut targets);
        assert!(targets.targets[0].hit);
        assert!(targets.targets[1].hit);
    }

    #[test]
    fn test_dead_projectile_skipped() {
        let mut targets = TargetSet::new(0);
        targets.targets.push(plain_target(Vec2::new(0.0, 0.5), TARGET_SCALE));

        let mut shots = ProjectileSet::default();
        shots.projectiles.push(Projectile {
            pos: Vec2::new(0.0, 0.5),
            vel: Vec2::ZERO,
            dead: true,
        });

        mark_projectile_hits(&mut shots, &mut targets);
        assert!(!targets.targets[0].hit);
    }

    #[test]
    fn test_resolve_splits_after_passes() {
        let mut world = World::new(11);
        world.targets.targets.clear();
        world
            .targets
            .targets
            .push(plain_target(Vec2::new(0.5, 0.5), TARGET_SCALE));
        world.projectiles.projectiles.push(Projectile {
            pos: Vec2::new(0.5, 0.5),
            vel: Vec2::ZERO,
            dead: false,
        });

        resolve_collisions(&mut world);

        // Parent gone, three children in its place, projectile still
        // awaiting its reap in the next update
        assert_eq!(world.targets.len(), SPLIT_CHILDREN);
        assert!(world.targets.targets.iter().all(|t| !t.hit));
        assert!(world.projectiles.projectiles[0].dead);
    }
}
