//! Game state and core simulation types
//!
//! The whole mutable game world lives in [`World`], one owned aggregate that
//! is passed by exclusive reference into each subsystem's update - there are
//! no ambient globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_coord;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A target reached the paddle
    GameOver,
    /// Every target destroyed
    Win,
}

/// Logical input actions the host maps keyboard/mouse events onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Set of currently held actions, one bit per [`Action`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSet(u8);

impl InputSet {
    pub fn press(&mut self, action: Action) {
        self.0 |= 1 << action as u8;
    }

    pub fn release(&mut self, action: Action) {
        self.0 &= !(1 << action as u8);
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.0 & (1 << action as u8) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Position; x is clamped to ±PADDLE_X_BOUND, y stays on the rail
    pub pos: Vec2,
    pub scale: f32,
    pub color: [f32; 4],
    /// Velocity of this frame's actual displacement, consumed by targets
    /// and projectiles as an opposite frame-shift
    pub vel: Vec2,
    /// Thruster blink accumulator, wraps at TRAIL_BLINK_PERIOD
    trail_timer: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.0, PADDLE_Y),
            scale: PADDLE_SCALE,
            color: [1.0, 1.0, 1.0, 1.0],
            vel: Vec2::ZERO,
            trail_timer: 0.0,
        }
    }
}

impl Paddle {
    /// Move left/right within the horizontal bound.
    ///
    /// The position is clamped after integration, so no `dt` can carry the
    /// paddle across the bound. `vel` reflects the displacement that
    /// actually happened.
    pub fn update(&mut self, input: &InputSet, tuning: &Tuning, dt: f32) {
        let prev_x = self.pos.x;

        let mut dx = 0.0;
        if input.is_down(Action::Left) {
            dx -= tuning.paddle_speed * dt;
        }
        if input.is_down(Action::Right) {
            dx += tuning.paddle_speed * dt;
        }
        self.pos.x = (self.pos.x + dx).clamp(-PADDLE_X_BOUND, PADDLE_X_BOUND);

        self.vel = if dt > 0.0 {
            Vec2::new((self.pos.x - prev_x) / dt, 0.0)
        } else {
            Vec2::ZERO
        };

        self.trail_timer = (self.trail_timer + dt) % TRAIL_BLINK_PERIOD;
    }

    /// Direct horizontal override from mouse motion
    pub fn set_cursor_x(&mut self, x: f32) {
        self.pos.x = x.clamp(-PADDLE_X_BOUND, PADDLE_X_BOUND);
    }

    /// Whether the thruster trail overlay is visible this frame.
    ///
    /// The trail blinks: visible for the first TRAIL_BLINK_WINDOW of each
    /// TRAIL_BLINK_PERIOD cycle, and only while Up is held.
    pub fn thruster_visible(&self, input: &InputSet) -> bool {
        input.is_down(Action::Up) && self.trail_timer < TRAIL_BLINK_WINDOW
    }
}

/// A drifting destructible blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Halves on each split; at or below the split threshold a hit just
    /// removes the target
    pub scale: f32,
    pub color: [f32; 4],
    /// Per-vertex radius profile of the irregular polygon, TARGET_SIDES
    /// samples in [TARGET_RADIUS_MIN, TARGET_RADIUS_MAX]
    pub profile: Vec<f32>,
    /// Transient flag set by collision detection, consumed by the sweep
    pub hit: bool,
}

/// The target collection. Owns its own RNG so spawns are reproducible
/// under an injected seed.
#[derive(Debug, Clone)]
pub struct TargetSet {
    pub targets: Vec<Target>,
    rng: Pcg32,
}

impl TargetSet {
    pub fn new(seed: u64) -> Self {
        Self {
            targets: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// (Re)initialize the collection with `count` freshly generated targets.
    ///
    /// Spawn positions are rejected and resampled until they are at least
    /// MIN_SPAWN_DISTANCE from the origin, keeping fresh targets off the
    /// paddle's half of the board.
    pub fn create(&mut self, count: usize, tuning: &Tuning) {
        self.targets.clear();
        for _ in 0..count {
            let pos = loop {
                let candidate = Vec2::new(
                    self.rng.random_range(-PLAY_AREA_EXTENT..PLAY_AREA_EXTENT),
                    self.rng.random_range(-PLAY_AREA_EXTENT..PLAY_AREA_EXTENT),
                );
                if candidate.length() > MIN_SPAWN_DISTANCE {
                    break candidate;
                }
            };
            let target = self.make_target(pos, TARGET_SCALE, tuning);
            self.targets.push(target);
        }
        log::debug!("spawned {} targets", count);
    }

    /// Build one target at `pos` with independently sampled velocity,
    /// grayscale color and blob geometry.
    fn make_target(&mut self, pos: Vec2, scale: f32, tuning: &Tuning) -> Target {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = self
            .rng
            .random_range(tuning.target_speed_min..tuning.target_speed_max);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;

        let intensity = self
            .rng
            .random_range(TARGET_INTENSITY_MIN..TARGET_INTENSITY_MAX);

        let profile = (0..TARGET_SIDES)
            .map(|_| self.rng.random_range(TARGET_RADIUS_MIN..TARGET_RADIUS_MAX))
            .collect();

        Target {
            pos,
            vel,
            scale,
            color: [intensity, intensity, intensity, 1.0],
            profile,
            hit: false,
        }
    }

    /// Advance every target and wrap positions across the play-area edges.
    ///
    /// Paddle motion shows up as an opposite shift of the target frame.
    pub fn update(&mut self, paddle_vel: Vec2, dt: f32) {
        for target in &mut self.targets {
            target.pos += (target.vel - paddle_vel) * dt;
            target.pos.x = wrap_coord(target.pos.x);
            target.pos.y = wrap_coord(target.pos.y);
        }
    }

    /// Split hit targets above the threshold into three children, then
    /// sweep out every hit-flagged entry.
    ///
    /// Two explicit passes over an index-stable snapshot: children go into
    /// a pending list first, are appended after the scan, and survive the
    /// sweep because they are never hit-flagged.
    pub fn split_and_sweep(&mut self, tuning: &Tuning) {
        let mut pending = Vec::new();
        for i in 0..self.targets.len() {
            let (hit, scale, pos) = {
                let t = &self.targets[i];
                (t.hit, t.scale, t.pos)
            };
            if !hit || scale <= tuning.split_threshold {
                continue;
            }
            let child_scale = scale * 0.5;
            for _ in 0..SPLIT_CHILDREN {
                let offset = Vec2::new(
                    self.rng.random_range(-1.0..1.0),
                    self.rng.random_range(-1.0..1.0),
                );
                pending.push(self.make_target(pos + offset * child_scale, child_scale, tuning));
            }
        }
        self.targets.append(&mut pending);
        self.targets.retain(|t| !t.hit);
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

/// A player-fired shot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub dead: bool,
}

/// The projectile collection plus fire-gating state
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    pub projectiles: Vec<Projectile>,
    /// Seconds until the next shot is allowed
    cooldown: f32,
    /// Fire state last frame, for rising-edge detection
    prev_fire: bool,
}

impl ProjectileSet {
    /// Spawn on the rising edge of Fire (subject to the cooldown), advance
    /// live projectiles, and drop any that left the play area or were
    /// flagged dead by collision detection.
    pub fn update(&mut self, paddle: &Paddle, input: &InputSet, tuning: &Tuning, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let fire = input.is_down(Action::Fire);
        if fire && !self.prev_fire && self.cooldown <= 0.0 {
            self.projectiles.push(Projectile {
                pos: paddle.pos + Vec2::new(0.0, PADDLE_HALF_HEIGHT * paddle.scale),
                vel: Vec2::new(0.0, tuning.projectile_speed),
                dead: false,
            });
            self.cooldown = tuning.fire_cooldown;
        }
        self.prev_fire = fire;

        for p in &mut self.projectiles {
            p.pos += (p.vel - paddle.vel) * dt;
            if p.pos.x.abs() > PROJECTILE_BOUND || p.pos.y.abs() > PROJECTILE_BOUND {
                p.dead = true;
            }
        }
        self.projectiles.retain(|p| !p.dead);
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.cooldown = 0.0;
        self.prev_fire = false;
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

/// Complete game world
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Counts up while not Playing; the round restarts once it reaches
    /// the tuned wait
    pub restart_timer: f32,
    pub paddle: Paddle,
    pub targets: TargetSet,
    pub projectiles: ProjectileSet,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self {
            seed,
            tuning,
            phase: GamePhase::Playing,
            restart_timer: 0.0,
            paddle: Paddle::default(),
            targets: TargetSet::new(seed),
            projectiles: ProjectileSet::default(),
        };
        world.restart();
        world
    }

    /// Full round reset: paddle back on its rail, a fresh target set,
    /// no projectiles. The target RNG is seeded once at world creation
    /// and keeps its stream across restarts.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.restart_timer = 0.0;
        self.paddle = Paddle::default();
        self.targets.create(self.tuning.initial_targets, &self.tuning);
        self.projectiles.clear();
    }
}
